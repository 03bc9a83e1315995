//! `POST` and `IHAVE` (RFC 3977 Section 6.3), including the two-phase
//! continuation-then-body flow both commands require.

use crate::support::{read_greeting, read_single, send, spawn_session, TestCaps};

#[tokio::test]
async fn post_accepts_a_well_formed_article() {
    let (mut client, server) = spawn_session(TestCaps::with_sample_group());
    read_greeting(&mut client).await;

    send(&mut client, "POST").await;
    let continuation = read_single(&mut client).await;
    assert_eq!(continuation, "340 Input article; end with <CRLF>.<CRLF>");

    client
        .write_body(
            "Subject: new\r\nMessage-ID: <new@test>\r\n\r\nbrand new body\r\n.\r\n",
        )
        .await;
    assert_eq!(read_single(&mut client).await, "240 Article received OK");

    send(&mut client, "STAT <new@test>").await;
    assert_eq!(read_single(&mut client).await, "223 0 <new@test>");

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

#[tokio::test]
async fn post_is_refused_when_posting_is_disabled() {
    let (mut client, server) = spawn_session(TestCaps::without_posting());
    read_greeting(&mut client).await;

    send(&mut client, "POST").await;
    assert_eq!(read_single(&mut client).await, "440 Posting not permitted");

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

#[tokio::test]
async fn ihave_declines_an_already_known_article() {
    let (mut client, server) = spawn_session(TestCaps::with_sample_group());
    read_greeting(&mut client).await;

    send(&mut client, "IHAVE <1@test>").await;
    assert_eq!(read_single(&mut client).await, "435 Article not wanted");

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

#[tokio::test]
async fn ihave_accepts_a_new_article() {
    let (mut client, server) = spawn_session(TestCaps::with_sample_group());
    read_greeting(&mut client).await;

    send(&mut client, "IHAVE <fresh@test>").await;
    let continuation = read_single(&mut client).await;
    assert_eq!(continuation, "335 Send article to be transferred");

    client
        .write_body("Subject: fresh\r\n\r\nfresh body\r\n.\r\n")
        .await;
    assert_eq!(read_single(&mut client).await, "235 Article transferred OK");

    send(&mut client, "QUIT").await;
    read_single(&mut client).await;
    server.await.unwrap();
}

/// A thin extension so posting tests can write a raw dot-terminated body
/// without going through [`send`], which appends a bare CRLF to a single
/// command line rather than a whole multi-line block.
#[allow(async_fn_in_trait)]
trait WriteBody {
    async fn write_body(&mut self, body: &str);
}

impl WriteBody for tokio::io::BufReader<tokio::io::DuplexStream> {
    async fn write_body(&mut self, body: &str) {
        use tokio::io::AsyncWriteExt;
        self.write_all(body.as_bytes()).await.unwrap();
    }
}
