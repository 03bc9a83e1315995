//! NNTP response status codes (RFC 3977 + RFC 4643 + RFC 4644) and the
//! single-line response framing helper used throughout the command
//! dispatcher.

use crate::helpers::append_uint;

/// NNTP response codes this engine emits.
///
/// Kept as plain `u16` constants rather than an enum — the dispatcher
/// always has a constant in hand at the call site, so the extra type
/// doesn't buy anything here.
#[allow(dead_code)]
pub mod codes {
    // 1xx - Informational
    /// Help text follows (multi-line).
    pub const HELP_TEXT_FOLLOWS: u16 = 100;
    /// Capability list follows (multi-line).
    pub const CAPABILITY_LIST: u16 = 101;
    /// Server date/time (RFC 3977 Section 7.1).
    pub const SERVER_DATE: u16 = 111;

    // 2xx - Success
    /// Posting allowed greeting / MODE READER reply.
    pub const POSTING_ALLOWED: u16 = 200;
    /// Connection closing.
    pub const CLOSING: u16 = 205;
    /// Group successfully selected.
    pub const GROUP_SELECTED: u16 = 211;
    /// Information follows (multi-line) — LIST, LISTGROUP header.
    pub const INFORMATION_FOLLOWS: u16 = 215;
    /// List of new newsgroups follows (multi-line).
    pub const NEW_NEWSGROUPS_FOLLOW: u16 = 231;
    /// Article follows (multi-line).
    pub const ARTICLE_FOLLOWS: u16 = 220;
    /// Head follows (multi-line).
    pub const HEAD_FOLLOWS: u16 = 221;
    /// Body follows (multi-line).
    pub const BODY_FOLLOWS: u16 = 222;
    /// Article exists (STAT / LAST / NEXT).
    pub const ARTICLE_STAT: u16 = 223;
    /// Overview information follows (multi-line).
    pub const OVERVIEW_FOLLOWS: u16 = 224;
    /// Headers follow (multi-line).
    pub const HEADERS_FOLLOW: u16 = 225;
    /// Article transferred OK (IHAVE).
    pub const ARTICLE_TRANSFERRED: u16 = 235;
    /// CHECK: article wanted, send it.
    pub const CHECK_SEND: u16 = 238;
    /// TAKETHIS: article received OK.
    pub const TAKETHIS_RECEIVED: u16 = 239;
    /// POST: article received OK.
    pub const ARTICLE_POSTED: u16 = 240;
    /// AUTHINFO accepted.
    pub const AUTH_ACCEPTED: u16 = 281;

    // 3xx - Continuation
    /// POST: send article to be posted.
    pub const SEND_ARTICLE_POSTING: u16 = 340;
    /// IHAVE: send article to be transferred.
    pub const SEND_ARTICLE_TRANSFER: u16 = 335;
    /// AUTHINFO USER: password required.
    pub const AUTH_PASSWORD_REQUIRED: u16 = 381;

    // 4xx - Errors
    /// No such newsgroup.
    pub const NO_SUCH_GROUP: u16 = 411;
    /// No newsgroup selected.
    pub const NO_GROUP_SELECTED: u16 = 412;
    /// Current article number is invalid (no current article).
    pub const NO_CURRENT_ARTICLE: u16 = 420;
    /// No next article in this group.
    pub const NO_NEXT_ARTICLE: u16 = 421;
    /// No previous article in this group.
    pub const NO_PREVIOUS_ARTICLE: u16 = 422;
    /// No article with that number.
    pub const NO_SUCH_ARTICLE_NUMBER: u16 = 423;
    /// No article with that message-id.
    pub const NO_SUCH_MESSAGE_ID: u16 = 430;
    /// IHAVE: article not wanted.
    pub const IHAVE_NOT_WANTED: u16 = 435;
    /// IHAVE/TAKETHIS: transfer not possible, try later.
    pub const TRANSFER_NOT_POSSIBLE: u16 = 436;
    /// IHAVE: transfer rejected, do not retry.
    pub const TRANSFER_REJECTED: u16 = 437;
    /// CHECK: busy, try again later.
    pub const CHECK_DEFER: u16 = 431;
    /// CHECK: article not wanted, do not send.
    pub const CHECK_NOT_WANTED: u16 = 438;
    /// TAKETHIS: transfer failed.
    pub const TAKETHIS_FAILED: u16 = 439;
    /// AUTHINFO: authentication required.
    pub const AUTH_REQUIRED: u16 = 480;
    /// AUTHINFO: authentication failed/rejected.
    pub const AUTH_REJECTED: u16 = 481;
    /// AUTHINFO: out-of-sequence AUTHINFO PASS.
    pub const AUTH_OUT_OF_SEQUENCE: u16 = 482;
    /// Posting not permitted.
    pub const POSTING_NOT_PERMITTED: u16 = 440;
    /// Posting failed.
    pub const POSTING_FAILED: u16 = 441;
    /// Unknown command.
    pub const UNKNOWN_COMMAND: u16 = 500;
    /// Syntax error / unsupported.
    pub const SYNTAX_ERROR: u16 = 501;
    /// Command unavailable (AUTHINFO after auth already done, MODE, etc).
    pub const COMMAND_UNAVAILABLE: u16 = 502;
}

/// A canned `(code, text)` pair the command loop writes verbatim. These are
/// the RFC-published wordings; the origin server was inconsistent about some
/// of them (`411 No such newsgroup` vs `411 no such group` across files) —
/// this crate standardizes on one spelling everywhere.
#[derive(Debug, Clone, Copy)]
pub struct StatusText {
    /// The 3-digit response code.
    pub code: u16,
    /// The canonical reason text (without leading code or trailing CRLF).
    pub text: &'static str,
}

impl StatusText {
    /// Constructs a canned status.
    pub const fn new(code: u16, text: &'static str) -> Self {
        Self { code, text }
    }
}

pub const NO_SUCH_GROUP: StatusText = StatusText::new(codes::NO_SUCH_GROUP, "No such newsgroup");
pub const NO_GROUP_SELECTED: StatusText =
    StatusText::new(codes::NO_GROUP_SELECTED, "No newsgroup selected");
pub const NO_CURRENT_ARTICLE: StatusText = StatusText::new(
    codes::NO_CURRENT_ARTICLE,
    "Current article number is invalid",
);
pub const NO_NEXT_ARTICLE: StatusText =
    StatusText::new(codes::NO_NEXT_ARTICLE, "No next article to retrieve");
pub const NO_PREVIOUS_ARTICLE: StatusText = StatusText::new(
    codes::NO_PREVIOUS_ARTICLE,
    "No previous article to retrieve",
);
pub const NO_SUCH_ARTICLE_NUMBER: StatusText = StatusText::new(
    codes::NO_SUCH_ARTICLE_NUMBER,
    "No article with that number",
);
pub const NO_SUCH_MESSAGE_ID: StatusText = StatusText::new(
    codes::NO_SUCH_MESSAGE_ID,
    "No article with that message-id",
);
pub const UNKNOWN_COMMAND: StatusText = StatusText::new(codes::UNKNOWN_COMMAND, "Unknown command");
pub const SYNTAX_ERROR: StatusText =
    StatusText::new(codes::SYNTAX_ERROR, "not supported, or syntax error");
pub const POSTING_NOT_PERMITTED: StatusText =
    StatusText::new(codes::POSTING_NOT_PERMITTED, "Posting not permitted");
pub const POSTING_FAILED: StatusText = StatusText::new(codes::POSTING_FAILED, "posting failed");
pub const IHAVE_NOT_WANTED: StatusText =
    StatusText::new(codes::IHAVE_NOT_WANTED, "Article not wanted");
pub const TRANSFER_NOT_POSSIBLE: StatusText = StatusText::new(
    codes::TRANSFER_NOT_POSSIBLE,
    "Transfer not possible; try again later",
);
pub const TRANSFER_REJECTED: StatusText = StatusText::new(
    codes::TRANSFER_REJECTED,
    "Transfer rejected; do not retry",
);
pub const AUTH_REQUIRED: StatusText =
    StatusText::new(codes::AUTH_REQUIRED, "authentication required");

/// Appends `CODE SP TEXT CRLF` to `out`. This is the single framing routine
/// every single-line response in the dispatcher goes through, so the wire
/// format only needs to be gotten right once.
pub fn write_status_line(out: &mut Vec<u8>, code: u16, text: &[u8]) {
    append_uint(out, i64::from(code));
    out.push(b' ');
    out.extend_from_slice(text);
    out.extend_from_slice(b"\r\n");
}

/// Appends a canned [`StatusText`] as a status line.
pub fn write_status(out: &mut Vec<u8>, status: StatusText) {
    write_status_line(out, status.code, status.text.as_bytes());
}
