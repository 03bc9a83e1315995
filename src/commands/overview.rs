//! Overview and header-range retrieval: `OVER`/`XOVER` (RFC 3977 Section
//! 8.3) and `HDR`/`XHDR` (RFC 3977 Section 8.5).
//!
//! Not present in the origin server (it predates these extensions), but
//! RFC 3977 Section 9.5-9.6 documents `XOVER`/`XHDR` as the legacy
//! (RFC 2980) command names clients still send, aliased straight onto
//! `OVER`/`HDR` — both names are wired to the same handler here.

use std::io::Write;

use bytes::Bytes;

use crate::capabilities::Capabilities;
use crate::commands::group::parse_range;
use crate::error::Result;
use crate::io::dot_writer::DotWriter;
use crate::response::{self, codes};
use crate::session::state::{Article, ArticleRange, SessionState};

/// Resolves the shared `[range|message-id]` argument form used by both
/// `OVER` and `HDR`: no argument means the current article, a leading `<`
/// means a message-id (single-article range), anything else is a
/// `first[-[last]]` range within the selected group.
fn resolve_range(state: &SessionState, arg: Option<&[u8]>) -> std::result::Result<ArticleRange, response::StatusText> {
    match arg {
        None => {
            let group = state
                .selected_group
                .as_ref()
                .ok_or(response::NO_GROUP_SELECTED)?;
            if state.cursor_id.is_empty() {
                return Err(response::NO_CURRENT_ARTICLE);
            }
            Ok(ArticleRange {
                article: Article {
                    group: Some(group.name.clone()),
                    number: Some(state.cursor),
                    message_id: Some(state.cursor_id.clone()),
                },
                last_number: state.cursor,
            })
        }
        Some(arg) if arg.first() == Some(&b'<') => Ok(ArticleRange {
            article: Article {
                group: None,
                number: None,
                message_id: Some(Bytes::copy_from_slice(arg)),
            },
            last_number: 0,
        }),
        Some(arg) => {
            let group = state
                .selected_group
                .as_ref()
                .ok_or(response::NO_GROUP_SELECTED)?;
            let (first, last) = parse_range(Some(arg));
            Ok(ArticleRange {
                article: Article {
                    group: Some(group.name.clone()),
                    number: Some(first),
                    message_id: None,
                },
                last_number: last,
            })
        }
    }
}

/// `OVER`/`XOVER`.
pub async fn handle_over<C: Capabilities>(
    state: &SessionState,
    caps: &C,
    args: &[Vec<u8>],
    out: &mut Vec<u8>,
) -> Result<()> {
    let range = match resolve_range(state, args.first().map(|v| v.as_slice())) {
        Ok(r) => r,
        Err(status) => {
            response::write_status(out, status);
            return Ok(());
        }
    };

    let mut body = Vec::new();
    if !caps.write_overview(&range, &mut body).await {
        response::write_status(out, response::NO_SUCH_ARTICLE_NUMBER);
        return Ok(());
    }

    response::write_status_line(out, codes::OVERVIEW_FOLLOWS, b"Overview information follows");
    let mut dw = DotWriter::new(out);
    dw.write_all(&body)?;
    dw.close()?;
    Ok(())
}

/// `HDR`/`XHDR`: `HDR header [range|message-id]`.
pub async fn handle_hdr<C: Capabilities>(
    state: &SessionState,
    caps: &C,
    args: &[Vec<u8>],
    out: &mut Vec<u8>,
) -> Result<()> {
    let Some(header) = args.first() else {
        response::write_status(out, response::SYNTAX_ERROR);
        return Ok(());
    };
    let range = match resolve_range(state, args.get(1).map(|v| v.as_slice())) {
        Ok(r) => r,
        Err(status) => {
            response::write_status(out, status);
            return Ok(());
        }
    };

    let mut body = Vec::new();
    if !caps.write_header(header, &range, &mut body).await {
        response::write_status(out, response::NO_SUCH_ARTICLE_NUMBER);
        return Ok(());
    }

    response::write_status_line(out, codes::HEADERS_FOLLOW, b"Headers follow");
    let mut dw = DotWriter::new(out);
    dw.write_all(&body)?;
    dw.close()?;
    Ok(())
}
