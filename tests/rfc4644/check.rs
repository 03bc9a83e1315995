//! `CHECK` (RFC 4644 Section 2.1): a single-line, non-continuation
//! response deciding whether the peer should bother sending the article.

use crate::support::{read_greeting, read_single, send, spawn_session, TestCaps};

#[tokio::test]
async fn check_reports_send_for_an_unknown_article() {
    let (mut client, server) = spawn_session(TestCaps::with_sample_group());
    read_greeting(&mut client).await;

    send(&mut client, "CHECK <unseen@test>").await;
    assert_eq!(
        read_single(&mut client).await,
        "238 <unseen@test> send article to be transferred"
    );

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

#[tokio::test]
async fn check_reports_not_wanted_for_a_known_article() {
    let (mut client, server) = spawn_session(TestCaps::with_sample_group());
    read_greeting(&mut client).await;

    send(&mut client, "CHECK <1@test>").await;
    assert_eq!(read_single(&mut client).await, "438 <1@test> not wanted");

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

#[tokio::test]
async fn check_without_an_argument_is_a_syntax_error() {
    let (mut client, server) = spawn_session(TestCaps::with_sample_group());
    read_greeting(&mut client).await;

    send(&mut client, "CHECK").await;
    assert_eq!(read_single(&mut client).await, "501 not supported, or syntax error");

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

#[tokio::test]
async fn check_defers_when_posting_is_disabled() {
    let (mut client, server) = spawn_session(TestCaps::without_posting());
    read_greeting(&mut client).await;

    send(&mut client, "CHECK <anything@test>").await;
    assert_eq!(
        read_single(&mut client).await,
        "431 <anything@test> try again later"
    );

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}
