//! Article ingestion: `POST` (RFC 3977 Section 6.3), `IHAVE` (Section 6.3.2),
//! and the RFC 4644 streaming extension `CHECK`/`TAKETHIS`.
//!
//! Grounded on `structures.go`'s `PostingCaps` interface for the capability
//! contract and on the posting-body handling the `posting` subpackage
//! documents (`ConsumePostedArticle`'s dot-reader-into-buffer pattern) —
//! this crate has no direct port of `cmds2.go`'s POST/IHAVE/CHECK/TAKETHIS
//! handlers since the retrieved origin sources stop short of including
//! them; the response codes and state machine instead follow RFC 3977
//! Section 6.3 and RFC 4644 Section 2 directly.
//!
//! `POST` and `IHAVE` both need to send an intermediate `340`/`335`
//! continuation line *before* reading the posted body, unlike every other
//! command in this crate, which only ever writes its response after the
//! fact. That continuation has to reach the client before more bytes are
//! read, so these two handlers take the connection's writer half directly
//! and flush past the usual per-command output buffering.

use bytes::Bytes;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};

use crate::capabilities::{Capabilities, PostOutcome, Privilege};
use crate::error::Result;
use crate::io::line::{DotReader, LineReader};
use crate::response::{self, codes};
use crate::session::state::SessionState;

/// Fully drains a posted article body into one contiguous, destuffed
/// buffer. The dot-terminator line itself is consumed but not appended.
///
/// Every capability in this crate exchanges fully-buffered `&[u8]`/
/// `&mut Vec<u8>` data rather than streaming readers/writers (see
/// `ArticleCaps::get_article`), so posted bodies are read to completion
/// here rather than handed to the capability as a live reader — this also
/// means the "callback must drain the reader" hazard other NNTP server
/// designs have to document simply doesn't exist in this one.
async fn read_posted_article<R: AsyncBufRead + Unpin>(
    reader: &mut LineReader<R>,
) -> std::io::Result<Vec<u8>> {
    let mut article = Vec::new();
    let mut dot = reader.dot_reader();
    let mut line = Vec::new();
    loop {
        line.clear();
        let n = dot.next_line(&mut line).await?;
        if n == 0 {
            break;
        }
        if dot.is_done() {
            break;
        }
        article.extend_from_slice(DotReader::<R>::unstuff(&line));
    }
    Ok(article)
}

fn write_id_status(out: &mut Vec<u8>, code: u16, id: &[u8], text: &str) {
    crate::helpers::append_uint(out, i64::from(code));
    out.push(b' ');
    out.extend_from_slice(id);
    out.push(b' ');
    out.extend_from_slice(text.as_bytes());
    out.extend_from_slice(b"\r\n");
}

async fn flush_continuation<W: AsyncWrite + Unpin>(writer: &mut W, out: &mut Vec<u8>) -> Result<()> {
    writer.write_all(out).await?;
    out.clear();
    Ok(())
}

/// `POST` (RFC 3977 Section 6.3.1): the client supplies the whole article,
/// including its own `Message-ID` header if it wants one honored.
pub async fn handle_post<R, W, C>(
    caps: &C,
    reader: &mut LineReader<R>,
    writer: &mut W,
    out: &mut Vec<u8>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    C: Capabilities,
{
    if !caps.check_privilege(Privilege::Post).await {
        response::write_status(out, response::AUTH_REQUIRED);
        return Ok(());
    }
    if !caps.check_post().await {
        response::write_status_line(out, codes::POSTING_NOT_PERMITTED, b"Posting not permitted");
        return Ok(());
    }

    response::write_status_line(out, codes::SEND_ARTICLE_POSTING, b"Input article; end with <CRLF>.<CRLF>");
    flush_continuation(writer, out).await?;

    let article = read_posted_article(reader).await?;
    match caps.perform_post(None, &article).await {
        PostOutcome::Accepted => {
            response::write_status_line(out, codes::ARTICLE_POSTED, b"Article received OK")
        }
        PostOutcome::Rejected | PostOutcome::Failed => {
            response::write_status_line(out, codes::POSTING_FAILED, b"posting failed")
        }
    }
    Ok(())
}

/// `IHAVE` (RFC 3977 Section 6.3.2): the peer announces a message-id up
/// front so the server can decline the transfer before any bytes move.
pub async fn handle_ihave<R, W, C>(
    caps: &C,
    args: &[Vec<u8>],
    reader: &mut LineReader<R>,
    writer: &mut W,
    out: &mut Vec<u8>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    C: Capabilities,
{
    let Some(id) = args.first() else {
        response::write_status(out, response::SYNTAX_ERROR);
        return Ok(());
    };

    if !caps.check_privilege(Privilege::Post).await {
        response::write_status(out, response::AUTH_REQUIRED);
        return Ok(());
    }

    let (wanted, possible) = caps.check_post_id(id).await;
    if !wanted {
        response::write_status(out, response::IHAVE_NOT_WANTED);
        return Ok(());
    }
    if !possible {
        response::write_status(out, response::TRANSFER_NOT_POSSIBLE);
        return Ok(());
    }

    response::write_status_line(out, codes::SEND_ARTICLE_TRANSFER, b"Send article to be transferred");
    flush_continuation(writer, out).await?;

    let article = read_posted_article(reader).await?;
    match caps.perform_post(Some(id), &article).await {
        PostOutcome::Accepted => {
            response::write_status_line(out, codes::ARTICLE_TRANSFERRED, b"Article transferred OK")
        }
        PostOutcome::Rejected => response::write_status(out, response::TRANSFER_REJECTED),
        PostOutcome::Failed => response::write_status(out, response::TRANSFER_NOT_POSSIBLE),
    }
    Ok(())
}

/// `CHECK` (RFC 4644 Section 2): ask whether a transfer is wanted, with no
/// payload exchanged either way.
pub async fn handle_check<C: Capabilities>(
    caps: &C,
    args: &[Vec<u8>],
    out: &mut Vec<u8>,
) -> Result<()> {
    let Some(id) = args.first() else {
        response::write_status(out, response::SYNTAX_ERROR);
        return Ok(());
    };

    let (wanted, possible) = caps.check_post_id(id).await;
    if !possible {
        write_id_status(out, codes::CHECK_DEFER, id, "try again later");
    } else if !wanted {
        write_id_status(out, codes::CHECK_NOT_WANTED, id, "not wanted");
    } else {
        write_id_status(out, codes::CHECK_SEND, id, "send article to be transferred");
    }
    Ok(())
}

/// `TAKETHIS` (RFC 4644 Section 2): unlike `IHAVE`, the payload always
/// follows immediately — the client commits to sending it as soon as it
/// sends the command line, so the body has to be read (and acknowledged
/// or rejected) even if the engine already knows the article is unwanted.
///
/// A zero-argument `TAKETHIS` is unrecoverable framing: the engine cannot
/// tell whether a payload follows, so it answers `501` and ends the
/// session rather than trying to resynchronize.
pub async fn handle_takethis<R, C>(
    state: &mut SessionState,
    caps: &C,
    args: &[Vec<u8>],
    reader: &mut LineReader<R>,
    out: &mut Vec<u8>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    C: Capabilities,
{
    let Some(id) = args.first() else {
        response::write_status(out, response::SYNTAX_ERROR);
        state.end = true;
        return Ok(());
    };
    let id = Bytes::copy_from_slice(id);

    let article = read_posted_article(reader).await?;
    match caps.perform_post(Some(&id), &article).await {
        PostOutcome::Accepted => write_id_status(out, codes::TAKETHIS_RECEIVED, &id, "article received OK"),
        PostOutcome::Rejected | PostOutcome::Failed => {
            write_id_status(out, codes::TAKETHIS_FAILED, &id, "transfer failed")
        }
    }
    Ok(())
}
