//! `OVER`/`XOVER` and `HDR`/`XHDR` (RFC 3977 Sections 8.3, 8.5).

use crate::support::{read_block, read_greeting, read_single, send, spawn_session, TestCaps};

#[tokio::test]
async fn over_a_range_lists_one_line_per_article() {
    let (mut client, server) = spawn_session(TestCaps::with_sample_group());
    read_greeting(&mut client).await;

    send(&mut client, "GROUP misc.test").await;
    read_single(&mut client).await;

    send(&mut client, "OVER 1-2").await;
    let (status, body) = read_block(&mut client).await;
    assert_eq!(status, "224 Overview information follows");
    assert_eq!(body.len(), 2);
    assert!(body[0].starts_with("1\tone\t<1@test>"));
    assert!(body[1].starts_with("2\ttwo\t<2@test>"));

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

#[tokio::test]
async fn xover_is_an_alias_for_over() {
    let (mut client, server) = spawn_session(TestCaps::with_sample_group());
    read_greeting(&mut client).await;

    send(&mut client, "GROUP misc.test").await;
    read_single(&mut client).await;

    send(&mut client, "XOVER 3-3").await;
    let (status, body) = read_block(&mut client).await;
    assert_eq!(status, "224 Overview information follows");
    assert_eq!(body, vec!["3\tthree\t<3@test>".to_string()]);

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

#[tokio::test]
async fn hdr_returns_one_value_per_matching_article() {
    let (mut client, server) = spawn_session(TestCaps::with_sample_group());
    read_greeting(&mut client).await;

    send(&mut client, "GROUP misc.test").await;
    read_single(&mut client).await;

    send(&mut client, "HDR subject 1-3").await;
    let (status, body) = read_block(&mut client).await;
    assert_eq!(status, "225 Headers follow");
    assert_eq!(body, vec!["1 one", "2 two", "3 three"]);

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

#[tokio::test]
async fn over_without_a_group_or_argument_is_412() {
    let (mut client, server) = spawn_session(TestCaps::default());
    read_greeting(&mut client).await;

    send(&mut client, "OVER").await;
    assert_eq!(read_single(&mut client).await, "412 No newsgroup selected");

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}
