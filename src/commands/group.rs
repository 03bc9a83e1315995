//! Group and article-pointer selection commands: `GROUP`, `LISTGROUP`,
//! `LAST`, `NEXT`.
//!
//! Grounded on `nntpdecoder.go`'s `handleGroup`/`handleListgroup`/
//! `handleLast`/`handleNext`. `LISTGROUP`'s reuse-vs-reassign handling
//! fixes a latent aliasing bug in the origin (see module docs on
//! [`handle_listgroup`]).

use std::io::Write;

use crate::capabilities::Capabilities;
use crate::error::Result;
use crate::helpers::parse_uint;
use crate::io::dot_writer::DotWriter;
use crate::response::{self, codes};
use crate::session::state::{Group, SessionState, NO_CURSOR};

fn write_group_line(out: &mut Vec<u8>, code: u16, grp: &Group) {
    crate::helpers::append_uint(out, i64::from(code));
    out.push(b' ');
    crate::helpers::append_uint(out, grp.count);
    out.push(b' ');
    crate::helpers::append_uint(out, grp.low);
    out.push(b' ');
    crate::helpers::append_uint(out, grp.high);
    out.push(b' ');
    out.extend_from_slice(&grp.name);
    out.extend_from_slice(b"\r\n");
}

fn write_article_found(out: &mut Vec<u8>, number: i64, id: &[u8]) {
    crate::helpers::append_uint(out, i64::from(codes::ARTICLE_STAT));
    out.push(b' ');
    crate::helpers::append_uint(out, number);
    out.push(b' ');
    out.extend_from_slice(id);
    out.extend_from_slice(b"\r\n");
}

/// Parses an optional `range` argument (`LISTGROUP`'s second parameter):
/// `n`, `n-`, or `n-m`. Returns `(first, last)`, where `last` of
/// `i64::MAX` means "open-ended". A missing or unparsable range means the
/// whole group.
pub(crate) fn parse_range(arg: Option<&[u8]>) -> (i64, i64) {
    let Some(arg) = arg else {
        return (0, i64::MAX);
    };
    match arg.iter().position(|&b| b == b'-') {
        Some(dash) => {
            let first = parse_uint(&arg[..dash]);
            let rest = &arg[dash + 1..];
            let last = if rest.is_empty() {
                i64::MAX
            } else {
                parse_uint(rest)
            };
            (first, last)
        }
        None => {
            let n = parse_uint(arg);
            (n, n)
        }
    }
}

/// `GROUP group` (RFC 3977 Section 6.1.1). Selects `group` as current and
/// resets the article cursor.
pub async fn handle_group<C: Capabilities>(
    state: &mut SessionState,
    caps: &C,
    args: &[Vec<u8>],
    out: &mut Vec<u8>,
) -> Result<()> {
    let Some(name) = args.first() else {
        response::write_status(out, response::NO_SUCH_GROUP);
        return Ok(());
    };
    let mut group = Group {
        name: bytes::Bytes::copy_from_slice(name),
        count: 0,
        low: 0,
        high: 0,
    };
    if caps.get_group(&mut group).await {
        state.reset_cursor();
        write_group_line(out, codes::GROUP_SELECTED, &group);
        state.selected_group = Some(group);
    } else {
        response::write_status(out, response::NO_SUCH_GROUP);
    }
    Ok(())
}

/// `LISTGROUP [group [range]]` (RFC 3977 Section 6.1.2).
///
/// The origin re-resolves `args[0]` through `GetGroup` whenever it differs
/// from the handler's currently-selected group, but the *replacement*
/// group it resolves to is then only used for this one response — it is
/// never written back into `h.group`, so a `LISTGROUP other.group` leaves
/// the session's actual selected group untouched (consistent with RFC
/// 3977 Section 6.1.2: unlike `GROUP`, a bare `LISTGROUP` on a *different*
/// group name does not change "the currently selected newsgroup" for
/// subsequent commands). This implementation preserves that behavior
/// explicitly: `resolved` is a local binding, and `state.selected_group`
/// is mutated only by `GROUP` and `LISTGROUP` with no group name supplied.
pub async fn handle_listgroup<C: Capabilities>(
    state: &mut SessionState,
    caps: &C,
    args: &[Vec<u8>],
    out: &mut Vec<u8>,
) -> Result<()> {
    let arg0 = args.first().map(|v| v.as_slice());
    let arg1 = args.get(1).map(|v| v.as_slice());

    let resolved: Group = match arg0 {
        Some(name) if !name.is_empty() => {
            let reuse = state
                .selected_group
                .as_ref()
                .is_some_and(|g| g.name.as_ref() == name);
            if reuse {
                state.selected_group.clone().unwrap()
            } else {
                let mut candidate = Group {
                    name: bytes::Bytes::copy_from_slice(name),
                    count: 0,
                    low: 0,
                    high: 0,
                };
                if !caps.get_group(&mut candidate).await {
                    response::write_status(out, response::NO_SUCH_GROUP);
                    return Ok(());
                }
                candidate
            }
        }
        _ => match &state.selected_group {
            Some(g) => g.clone(),
            None => {
                response::write_status(out, response::NO_GROUP_SELECTED);
                return Ok(());
            }
        },
    };

    let (first, last) = parse_range(arg1);
    write_group_line(out, codes::INFORMATION_FOLLOWS, &resolved);
    let mut dw = DotWriter::new(out);
    let mut body = Vec::new();
    caps.list_group(&resolved, first, last, &mut body).await;
    dw.write_all(&body)?;
    dw.close()?;
    Ok(())
}

/// `LAST` (RFC 3977 Section 6.1.3): moves the cursor to the previous
/// article in the selected group.
pub async fn handle_last<C: Capabilities>(
    state: &mut SessionState,
    caps: &C,
    out: &mut Vec<u8>,
) -> Result<()> {
    let Some(group) = state.selected_group.clone() else {
        response::write_status(out, response::NO_GROUP_SELECTED);
        return Ok(());
    };
    let cur = if state.cursor < 0 {
        group.high + 1
    } else {
        state.cursor
    };
    match caps.cursor_move_group(&group, cur, true).await {
        Some((number, id)) => {
            state.cursor = number;
            state.cursor_id = id.clone();
            write_article_found(out, number, &id);
        }
        None => response::write_status(out, response::NO_PREVIOUS_ARTICLE),
    }
    Ok(())
}

/// `NEXT` (RFC 3977 Section 6.1.4): moves the cursor to the next article
/// in the selected group.
pub async fn handle_next<C: Capabilities>(
    state: &mut SessionState,
    caps: &C,
    out: &mut Vec<u8>,
) -> Result<()> {
    let Some(group) = state.selected_group.clone() else {
        response::write_status(out, response::NO_GROUP_SELECTED);
        return Ok(());
    };
    let cur = if state.cursor < 0 {
        group.low - 1
    } else {
        state.cursor
    };
    match caps.cursor_move_group(&group, cur, false).await {
        Some((number, id)) => {
            state.cursor = number;
            state.cursor_id = id.clone();
            write_article_found(out, number, &id);
        }
        None => response::write_status(out, response::NO_NEXT_ARTICLE),
    }
    Ok(())
}
