//! Shared end-to-end test harness: an in-memory [`Capabilities`] backed by
//! real maps instead of a database, and a small duplex-stream client for
//! driving a full [`Session`] the way a real peer would.
//!
//! The unit tests under `src/commands/*.rs` exercise each handler directly
//! against `crate::test_support::FakeCaps`; these integration tests instead
//! go through the whole command loop (`Session::run`), so the capability
//! double here is richer — it needs real group/article storage to make
//! `GROUP` -> `NEXT` -> `ARTICLE` -> `OVER` sequences behave consistently
//! across several commands in one connection.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use nntp_server_core::{
    Article, ArticleCaps, ArticleRange, Group, GroupCaps, GroupListingCaps, LoginCaps, PostOutcome,
    PostingCaps, Privilege, Session, SessionConfig, WildMat,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};

struct GroupRecord {
    low: i64,
    high: i64,
    articles: BTreeMap<i64, Bytes>,
}

/// A small in-memory news store: enough group/article/auth state to drive
/// realistic multi-command sessions.
pub struct TestCaps {
    groups: Mutex<HashMap<Bytes, GroupRecord>>,
    articles: Mutex<HashMap<Bytes, Bytes>>,
    posting_allowed: bool,
    auth_password: Option<(&'static [u8], &'static [u8])>,
}

impl Default for TestCaps {
    fn default() -> Self {
        Self {
            groups: Mutex::new(HashMap::new()),
            articles: Mutex::new(HashMap::new()),
            posting_allowed: true,
            auth_password: None,
        }
    }
}

impl TestCaps {
    /// A store pre-populated with `misc.test`, articles 1..=3.
    pub fn with_sample_group() -> Self {
        let caps = Self::default();
        caps.add_group(b"misc.test", &[
            (1, b"<1@test>", b"Subject: one\r\nMessage-ID: <1@test>\r\n\r\nbody one\r\n"),
            (2, b"<2@test>", b"Subject: two\r\nMessage-ID: <2@test>\r\n\r\nbody two\r\n"),
            (3, b"<3@test>", b"Subject: three\r\nMessage-ID: <3@test>\r\n\r\nbody three\r\n"),
        ]);
        caps
    }

    pub fn add_group(&self, name: &[u8], articles: &[(i64, &[u8], &[u8])]) {
        let mut store = self.articles.lock().unwrap();
        let mut numbered = BTreeMap::new();
        for &(num, id, content) in articles {
            let id = Bytes::copy_from_slice(id);
            store.insert(id.clone(), Bytes::copy_from_slice(content));
            numbered.insert(num, id);
        }
        let (low, high) = (
            numbered.keys().next().copied().unwrap_or(0),
            numbered.keys().next_back().copied().unwrap_or(0),
        );
        self.groups.lock().unwrap().insert(
            Bytes::copy_from_slice(name),
            GroupRecord { low, high, articles: numbered },
        );
    }

    pub fn without_posting() -> Self {
        Self { posting_allowed: false, ..Self::default() }
    }

    pub fn with_auth(user: &'static [u8], password: &'static [u8]) -> Self {
        Self { auth_password: Some((user, password)), ..Self::default() }
    }
}

#[async_trait]
impl GroupCaps for TestCaps {
    async fn get_group(&self, g: &mut Group) -> bool {
        let groups = self.groups.lock().unwrap();
        match groups.get(g.name.as_ref()) {
            Some(rec) => {
                g.count = rec.articles.len() as i64;
                g.low = rec.low;
                g.high = rec.high;
                true
            }
            None => false,
        }
    }

    async fn list_group(&self, g: &Group, first: i64, last: i64, out: &mut Vec<u8>) {
        let groups = self.groups.lock().unwrap();
        let Some(rec) = groups.get(g.name.as_ref()) else { return };
        for &num in rec.articles.keys() {
            if num >= first && num <= last {
                nntp_server_core::helpers::append_uint(out, num);
                out.extend_from_slice(b"\r\n");
            }
        }
    }

    async fn cursor_move_group(&self, g: &Group, i: i64, backward: bool) -> Option<(i64, Bytes)> {
        let groups = self.groups.lock().unwrap();
        let rec = groups.get(g.name.as_ref())?;
        if backward {
            rec.articles.range(..i).next_back().map(|(&n, id)| (n, id.clone()))
        } else {
            rec.articles.range(i + 1..).next().map(|(&n, id)| (n, id.clone()))
        }
    }
}

#[async_trait]
impl ArticleCaps for TestCaps {
    async fn stat_article(&self, a: &mut Article) -> bool {
        if let Some(id) = self.resolve_id(a) {
            a.message_id = Some(id.clone());
            self.articles.lock().unwrap().contains_key(&id)
        } else {
            false
        }
    }

    async fn get_article(&self, a: &mut Article, head: bool, body: bool, out: &mut Vec<u8>) -> bool {
        let Some(id) = self.resolve_id(a) else { return false };
        let articles = self.articles.lock().unwrap();
        let Some(content) = articles.get(&id) else { return false };
        a.message_id = Some(id);
        let (headers, body_bytes) = split_article(content);
        if head {
            out.extend_from_slice(headers);
        }
        if head && body {
            out.extend_from_slice(b"\r\n");
        }
        if body {
            out.extend_from_slice(body_bytes);
        }
        true
    }

    async fn write_overview(&self, ar: &ArticleRange, out: &mut Vec<u8>) -> bool {
        if ar.article.group.is_none() && ar.article.message_id.is_none() {
            return false;
        }
        if let Some(group_name) = &ar.article.group {
            let groups = self.groups.lock().unwrap();
            let Some(rec) = groups.get(group_name.as_ref()) else { return false };
            let articles = self.articles.lock().unwrap();
            for (&num, id) in rec.articles.range(ar.article.number.unwrap_or(0)..=ar.last_number) {
                if let Some(content) = articles.get(id) {
                    write_overview_line(out, num, id, content);
                }
            }
        } else if let Some(id) = &ar.article.message_id {
            let articles = self.articles.lock().unwrap();
            let Some(content) = articles.get(id) else { return false };
            write_overview_line(out, 0, id, content);
        }
        true
    }

    async fn write_header(&self, header: &[u8], ar: &ArticleRange, out: &mut Vec<u8>) -> bool {
        if ar.article.group.is_none() && ar.article.message_id.is_none() {
            return false;
        }
        let header_lc = header.to_ascii_lowercase();
        if let Some(group_name) = &ar.article.group {
            let groups = self.groups.lock().unwrap();
            let Some(rec) = groups.get(group_name.as_ref()) else { return false };
            let articles = self.articles.lock().unwrap();
            for (&num, id) in rec.articles.range(ar.article.number.unwrap_or(0)..=ar.last_number) {
                if let Some(content) = articles.get(id) {
                    if let Some(value) = header_value(content, &header_lc) {
                        nntp_server_core::helpers::append_uint(out, num);
                        out.push(b' ');
                        out.extend_from_slice(value);
                        out.extend_from_slice(b"\r\n");
                    }
                }
            }
        }
        true
    }
}

impl TestCaps {
    fn resolve_id(&self, a: &Article) -> Option<Bytes> {
        if let Some(id) = &a.message_id {
            return Some(id.clone());
        }
        let group_name = a.group.as_ref()?;
        let number = a.number?;
        let groups = self.groups.lock().unwrap();
        groups.get(group_name.as_ref())?.articles.get(&number).cloned()
    }
}

/// Splits a raw article into `(headers, body)`, with the blank separator
/// line consumed by neither half: `headers` ends right after the last
/// header's own `\r\n`, and `body` starts at the first body byte.
fn split_article(content: &Bytes) -> (&[u8], &[u8]) {
    let marker = b"\r\n\r\n";
    match content.windows(4).position(|w| w == marker) {
        Some(pos) => (&content[..pos + 2], &content[pos + 4..]),
        None => (&content[..], b""),
    }
}

fn header_value<'a>(content: &'a Bytes, header_lc: &[u8]) -> Option<&'a [u8]> {
    let (headers, _) = split_article(content);
    for line in headers.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if let Some(colon) = line.iter().position(|&b| b == b':') {
            if line[..colon].eq_ignore_ascii_case(header_lc) {
                return Some(line[colon + 1..].trim_ascii_start());
            }
        }
    }
    None
}

fn write_overview_line(out: &mut Vec<u8>, num: i64, id: &[u8], content: &Bytes) {
    let subject = header_value(content, b"subject").unwrap_or(b"");
    nntp_server_core::helpers::append_uint(out, num);
    out.push(b'\t');
    out.extend_from_slice(subject);
    out.push(b'\t');
    out.extend_from_slice(id);
    out.extend_from_slice(b"\r\n");
}

#[async_trait]
impl PostingCaps for TestCaps {
    async fn check_post_id(&self, id: &[u8]) -> (bool, bool) {
        let wanted = !self.articles.lock().unwrap().contains_key(id);
        (wanted, self.posting_allowed)
    }

    async fn check_post(&self) -> bool {
        self.posting_allowed
    }

    async fn perform_post(&self, id: Option<&[u8]>, article: &[u8]) -> PostOutcome {
        if !self.posting_allowed {
            return PostOutcome::Failed;
        }
        let id = match id {
            Some(id) => Bytes::copy_from_slice(id),
            None => header_value(&Bytes::copy_from_slice(article), b"message-id")
                .map(Bytes::copy_from_slice)
                .unwrap_or_else(|| Bytes::from_static(b"<generated@test>")),
        };
        self.articles.lock().unwrap().insert(id, Bytes::copy_from_slice(article));
        PostOutcome::Accepted
    }
}

#[async_trait]
impl GroupListingCaps for TestCaps {
    async fn list_groups(&self, wm: Option<&WildMat>, out: &mut Vec<u8>) -> bool {
        let groups = self.groups.lock().unwrap();
        for (name, rec) in groups.iter() {
            let matches = match wm {
                Some(wm) => wm.matches(&String::from_utf8_lossy(name)),
                None => true,
            };
            if matches {
                out.extend_from_slice(name);
                out.push(b' ');
                nntp_server_core::helpers::append_uint(out, rec.high);
                out.push(b' ');
                nntp_server_core::helpers::append_uint(out, rec.low);
                out.extend_from_slice(b" y\r\n");
            }
        }
        true
    }
}

#[async_trait]
impl LoginCaps for TestCaps {
    async fn authinfo_done(&self) -> bool {
        self.auth_password.is_none()
    }

    async fn check_privilege(&self, _p: Privilege) -> bool {
        true
    }

    async fn authinfo_user_only(&self, _user: &[u8]) -> bool {
        false
    }

    async fn authinfo_user_pass(&self, user: &[u8], password: &[u8]) -> bool {
        self.auth_password == Some((user, password))
    }
}

/// Spawns `caps` behind a fresh [`Session`] connected to a client-side
/// [`DuplexStream`] wrapped in a [`BufReader`] for line-oriented reads.
/// Returns the client handle and the server task's join handle.
pub fn spawn_session(
    caps: TestCaps,
) -> (BufReader<DuplexStream>, tokio::task::JoinHandle<()>) {
    let (client, server) = tokio::io::duplex(8192);
    let handle = tokio::spawn(async move {
        let session = Session::new(server, caps, SessionConfig::default());
        session.run().await.unwrap();
    });
    (BufReader::new(client), handle)
}

/// Reads and discards the greeting line a fresh session writes on connect.
pub async fn read_greeting(client: &mut BufReader<DuplexStream>) {
    let line = read_line(client).await;
    assert!(line.starts_with(b"200 "), "unexpected greeting: {line:?}");
}

/// Writes `cmd` (without a trailing CRLF) followed by `\r\n`.
pub async fn send(client: &mut BufReader<DuplexStream>, cmd: &str) {
    client.write_all(cmd.as_bytes()).await.unwrap();
    client.write_all(b"\r\n").await.unwrap();
}

/// Reads one CRLF-terminated line.
pub async fn read_line(client: &mut BufReader<DuplexStream>) -> Vec<u8> {
    let mut buf = Vec::new();
    let n = client.read_until(b'\n', &mut buf).await.unwrap();
    assert!(n > 0, "connection closed unexpectedly while reading a line");
    buf
}

/// Reads a single-line response and returns it with the trailing CRLF
/// stripped.
pub async fn read_single(client: &mut BufReader<DuplexStream>) -> String {
    let line = read_line(client).await;
    String::from_utf8(line).unwrap().trim_end().to_string()
}

/// Reads a status line followed by a dot-terminated block, returning
/// `(status_line, body_lines)` with CRLFs stripped from each body line and
/// the terminator line itself excluded.
pub async fn read_block(client: &mut BufReader<DuplexStream>) -> (String, Vec<String>) {
    let status = read_single(client).await;
    let mut lines = Vec::new();
    loop {
        let line = read_line(client).await;
        if line == b".\r\n" {
            break;
        }
        lines.push(String::from_utf8(line).unwrap().trim_end().to_string());
    }
    (status, lines)
}
