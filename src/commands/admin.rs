//! Session administration and information commands: `CAPABILITIES`, `MODE`,
//! `DATE`, `HELP`, `NEWGROUPS`.
//!
//! Grounded on `cmds2.go`. One deliberate fix relative to the origin: its
//! `handleDate` has a stray `%%02d` literal in the format string
//! (`"111 %04d%02d%02d%%02d%02d%02d\r\n"`), which prints a literal `%02d`
//! in place of the hour field. This engine formats all six fields
//! correctly.

use chrono::{Datelike, Timelike, Utc};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::helpers::{append_uint, ascii_lowercase_inplace};
use crate::io::dot_writer::DotWriter;
use crate::response::{self, codes};
use std::io::Write;

/// `CAPABILITIES` (RFC 3977 Section 5.2). The capability list is static:
/// it reflects what this crate's command loop knows how to dispatch, not
/// what the embedder's capability implementations actually support — an
/// embedder that declines every `POST` via [`PostingCaps::check_post`]
/// still advertises `POST`, the same way the origin does.
pub async fn handle_capabilities(out: &mut Vec<u8>) -> Result<()> {
    response::write_status_line(out, codes::CAPABILITY_LIST, b"Capability list follows");
    let mut dw = DotWriter::new(out);
    for line in CAPABILITIES_DATA {
        dw.write_all(line.as_bytes())?;
    }
    dw.close()?;
    Ok(())
}

const CAPABILITIES_DATA: &[&str] = &[
    "VERSION 2\r\n",
    "READER\r\n",
    "IHAVE\r\n",
    "POST\r\n",
    "LIST ACTIVE NEWSGROUPS OVERVIEW.FMT\r\n",
    "OVER MSGID RANGE\r\n",
    "HDR MSGID RANGE\r\n",
    "STREAMING\r\n",
];

/// `MODE READER` (the only `MODE` subcommand this engine recognizes).
pub async fn handle_mode(args: &[Vec<u8>], out: &mut Vec<u8>) -> Result<()> {
    let Some(sub) = args.first() else {
        response::write_status(out, response::SYNTAX_ERROR);
        return Ok(());
    };
    let mut sub = sub.clone();
    ascii_lowercase_inplace(&mut sub);
    if sub == b"reader" {
        response::write_status_line(out, codes::POSTING_ALLOWED, b"Posting allowed");
    } else {
        response::write_status(out, response::SYNTAX_ERROR);
    }
    Ok(())
}

/// `DATE` (RFC 3977 Section 7.1): current UTC time as `yyyymmddhhmmss`.
pub async fn handle_date(out: &mut Vec<u8>) -> Result<()> {
    let now = Utc::now();
    append_uint(out, 111);
    out.push(b' ');
    write_padded(out, now.year() as i64, 4);
    write_padded(out, i64::from(now.month()), 2);
    write_padded(out, i64::from(now.day()), 2);
    write_padded(out, i64::from(now.hour()), 2);
    write_padded(out, i64::from(now.minute()), 2);
    write_padded(out, i64::from(now.second()), 2);
    out.extend_from_slice(b"\r\n");
    Ok(())
}

fn write_padded(out: &mut Vec<u8>, n: i64, width: usize) {
    let start = out.len();
    append_uint(out, n);
    let written = out.len() - start;
    if written < width {
        let pad = width - written;
        out.splice(start..start, std::iter::repeat(b'0').take(pad));
    }
}

/// `HELP` (RFC 3977 Section 7.2).
pub async fn handle_help(config: &SessionConfig, out: &mut Vec<u8>) -> Result<()> {
    response::write_status_line(out, codes::HELP_TEXT_FOLLOWS, b"Help text follows");
    let mut dw = DotWriter::new(out);
    dw.write_all(config.help_text.as_bytes())?;
    dw.write_all(b"\r\n")?;
    dw.close()?;
    Ok(())
}

/// `NEWGROUPS` (RFC 3977 Section 7.3). This engine has no notion of group
/// creation timestamps to filter on, so it always reports an empty list,
/// matching the origin's `handleNewgroups` comment ("Creation date is not
/// available for any group").
pub async fn handle_newgroups(out: &mut Vec<u8>) -> Result<()> {
    response::write_status_line(
        out,
        codes::NEW_NEWSGROUPS_FOLLOW,
        b"list of new newsgroups follows",
    );
    out.extend_from_slice(b".\r\n");
    Ok(())
}
