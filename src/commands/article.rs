//! Article retrieval commands: `STAT`, `HEAD`, `BODY`, `ARTICLE`.
//!
//! Grounded on `nntpdecoder.go`'s `handleStat`/`handleArticleInternal`. All
//! three of `HEAD`/`BODY`/`ARTICLE` share one internal dispatch that
//! differs only in which parts of the article are written and which
//! status code introduces the response, exactly as in the origin.

use std::io::Write;

use bytes::Bytes;

use crate::capabilities::Capabilities;
use crate::error::Result;
use crate::helpers::{append_uint, parse_uint};
use crate::io::dot_writer::DotWriter;
use crate::response::{self, codes};
use crate::session::state::{Article, SessionState};

fn write_stat_line(out: &mut Vec<u8>, code: u16, number: i64, id: &[u8]) {
    append_uint(out, i64::from(code));
    out.push(b' ');
    append_uint(out, number);
    out.push(b' ');
    out.extend_from_slice(id);
    out.extend_from_slice(b"\r\n");
}

fn is_number_arg(arg: &[u8]) -> bool {
    arg.first().is_some_and(u8::is_ascii_digit)
}

/// `STAT` (RFC 3977 Section 6.2.4): like `ARTICLE`/`HEAD`/`BODY` but
/// reports only the article number and message-id, with no data block.
pub async fn handle_stat<C: Capabilities>(
    state: &SessionState,
    caps: &C,
    args: &[Vec<u8>],
    out: &mut Vec<u8>,
) -> Result<()> {
    if args.is_empty() {
        let Some(_group) = &state.selected_group else {
            response::write_status(out, response::NO_GROUP_SELECTED);
            return Ok(());
        };
        if state.cursor_id.is_empty() {
            response::write_status(out, response::NO_CURRENT_ARTICLE);
            return Ok(());
        }
        write_stat_line(out, codes::ARTICLE_STAT, state.cursor, &state.cursor_id);
        return Ok(());
    }

    let arg = &args[0];
    let use_num = is_number_arg(arg);
    if use_num && state.selected_group.is_none() {
        response::write_status(out, response::NO_GROUP_SELECTED);
        return Ok(());
    }

    let mut article = Article::default();
    if use_num {
        let num = parse_uint(arg);
        article.number = Some(num);
        article.group = state.selected_group.as_ref().map(|g| g.name.clone());
        if num == state.cursor {
            article.message_id = Some(state.cursor_id.clone());
        }
    } else {
        article.message_id = Some(Bytes::copy_from_slice(arg));
    }

    if !caps.stat_article(&mut article).await {
        let status = if use_num {
            response::NO_SUCH_ARTICLE_NUMBER
        } else {
            response::NO_SUCH_MESSAGE_ID
        };
        response::write_status(out, status);
        return Ok(());
    }

    write_stat_line(
        out,
        codes::ARTICLE_STAT,
        article.number.unwrap_or(0),
        article.message_id.as_deref().unwrap_or(b""),
    );
    Ok(())
}

async fn handle_article_internal<C: Capabilities>(
    state: &SessionState,
    caps: &C,
    args: &[Vec<u8>],
    code: u16,
    head: bool,
    body: bool,
    out: &mut Vec<u8>,
) -> Result<()> {
    let use_nothing = args.is_empty();
    let use_num = !use_nothing && is_number_arg(&args[0]);

    let mut article = Article::default();
    if use_nothing {
        let Some(group) = &state.selected_group else {
            response::write_status(out, response::NO_GROUP_SELECTED);
            return Ok(());
        };
        if state.cursor_id.is_empty() {
            response::write_status(out, response::NO_CURRENT_ARTICLE);
            return Ok(());
        }
        article.group = Some(group.name.clone());
        article.number = Some(state.cursor);
        article.message_id = Some(state.cursor_id.clone());
    } else if use_num {
        let Some(group) = &state.selected_group else {
            response::write_status(out, response::NO_GROUP_SELECTED);
            return Ok(());
        };
        let num = parse_uint(&args[0]);
        article.number = Some(num);
        article.group = Some(group.name.clone());
        if num == state.cursor {
            article.message_id = Some(state.cursor_id.clone());
        }
    } else {
        article.message_id = Some(Bytes::copy_from_slice(&args[0]));
    }

    let mut body_buf = Vec::new();
    let found = caps.get_article(&mut article, head, body, &mut body_buf).await;
    if !found {
        let status = if use_nothing {
            response::NO_CURRENT_ARTICLE
        } else if use_num {
            response::NO_SUCH_ARTICLE_NUMBER
        } else {
            response::NO_SUCH_MESSAGE_ID
        };
        response::write_status(out, status);
        return Ok(());
    }

    write_stat_line(
        out,
        code,
        article.number.unwrap_or(0),
        article.message_id.as_deref().unwrap_or(b""),
    );
    let mut dw = DotWriter::new(out);
    dw.write_all(&body_buf)?;
    dw.close()?;
    Ok(())
}

/// `HEAD` (RFC 3977 Section 6.2.1): headers only.
pub async fn handle_head<C: Capabilities>(
    state: &SessionState,
    caps: &C,
    args: &[Vec<u8>],
    out: &mut Vec<u8>,
) -> Result<()> {
    handle_article_internal(state, caps, args, codes::HEAD_FOLLOWS, true, false, out).await
}

/// `BODY` (RFC 3977 Section 6.2.2): body only.
pub async fn handle_body<C: Capabilities>(
    state: &SessionState,
    caps: &C,
    args: &[Vec<u8>],
    out: &mut Vec<u8>,
) -> Result<()> {
    handle_article_internal(state, caps, args, codes::BODY_FOLLOWS, false, true, out).await
}

/// `ARTICLE` (RFC 3977 Section 6.2.1): headers and body.
pub async fn handle_article<C: Capabilities>(
    state: &SessionState,
    caps: &C,
    args: &[Vec<u8>],
    out: &mut Vec<u8>,
) -> Result<()> {
    handle_article_internal(state, caps, args, codes::ARTICLE_FOLLOWS, true, true, out).await
}
