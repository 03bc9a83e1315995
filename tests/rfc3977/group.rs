//! `GROUP` and `LISTGROUP` (RFC 3977 Sections 6.1.1, 6.1.2).

use crate::support::{read_block, read_greeting, read_single, send, spawn_session, TestCaps};

#[tokio::test]
async fn group_selects_and_reports_watermarks() {
    let (mut client, server) = spawn_session(TestCaps::with_sample_group());
    read_greeting(&mut client).await;

    send(&mut client, "GROUP misc.test").await;
    assert_eq!(read_single(&mut client).await, "211 3 1 3 misc.test");

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

#[tokio::test]
async fn group_unknown_is_411() {
    let (mut client, server) = spawn_session(TestCaps::default());
    read_greeting(&mut client).await;

    send(&mut client, "GROUP no.such.group").await;
    assert_eq!(read_single(&mut client).await, "411 No such newsgroup");

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

#[tokio::test]
async fn listgroup_lists_article_numbers() {
    let (mut client, server) = spawn_session(TestCaps::with_sample_group());
    read_greeting(&mut client).await;

    send(&mut client, "LISTGROUP misc.test").await;
    let (status, body) = read_block(&mut client).await;
    assert_eq!(status, "211 3 1 3 misc.test");
    assert_eq!(body, vec!["1", "2", "3"]);

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

#[tokio::test]
async fn listgroup_on_a_different_group_does_not_change_selection() {
    let caps = TestCaps::with_sample_group();
    caps.add_group(b"alt.other", &[(1, b"<o1@test>", b"Subject: o\r\n\r\nbody\r\n")]);
    let (mut client, server) = spawn_session(caps);
    read_greeting(&mut client).await;

    send(&mut client, "GROUP misc.test").await;
    read_single(&mut client).await;

    send(&mut client, "LISTGROUP alt.other").await;
    read_block(&mut client).await;

    // The selected group is still misc.test; STAT with no args should
    // report no current article there (cursor unaffected by LISTGROUP on
    // another group), not fail for lack of a selected group.
    send(&mut client, "STAT").await;
    assert_eq!(read_single(&mut client).await, "420 Current article number is invalid");

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}
