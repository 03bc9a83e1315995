//! Per-connection session state and the data types capability
//! implementations exchange with the engine.
//!
//! Grounded on `structures.go`'s `Group`/`Article`/`ArticleRange` and the
//! `nntpHandler` struct fields in `nntpdecoder.go` (`group`, `groupCursor`,
//! `groupCurId`, `end`). The origin pools these through `sync.Pool`; here
//! they're owned directly by the `Session` and live for the connection's
//! lifetime, so there's nothing to return to a pool.

use bytes::Bytes;

/// A newsgroup, as resolved by [`GroupCaps::get_group`](crate::capabilities::GroupCaps::get_group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// The group's name, exactly as the client supplied it.
    pub name: Bytes,
    /// Estimated article count (RFC 3977 calls this a non-binding estimate).
    pub count: i64,
    /// Lowest article number currently in the group.
    pub low: i64,
    /// Highest article number currently in the group.
    pub high: i64,
}

/// An article reference: at least one of `number`/`message_id` is known,
/// and capability methods fill in the other on success.
#[derive(Debug, Clone, Default)]
pub struct Article {
    /// Group the article was requested within, if the request was
    /// number-relative (`STAT 42` against the selected group).
    pub group: Option<Bytes>,
    /// Article number, if known.
    pub number: Option<i64>,
    /// Message-id (including the angle brackets), if known.
    pub message_id: Option<Bytes>,
}

impl Article {
    /// Whether a message-id is present.
    pub fn has_id(&self) -> bool {
        self.message_id.is_some()
    }

    /// Whether an article number is present.
    pub fn has_number(&self) -> bool {
        self.number.is_some()
    }
}

/// A range of article numbers within a group, used by `OVER`/`XOVER`.
#[derive(Debug, Clone)]
pub struct ArticleRange {
    /// The group and starting article.
    pub article: Article,
    /// The last article number in the range, inclusive.
    pub last_number: i64,
}

/// Sentinel cursor value meaning "no current article", matching the
/// origin's use of a negative `groupCursor` before the first `GROUP`.
pub const NO_CURSOR: i64 = -1;

/// Mutable per-connection state threaded through the command dispatcher.
///
/// Grounded on the `nntpHandler` struct's bare fields in `nntpdecoder.go`;
/// this plays the same role, minus the pooled scratch buffers (each
/// command handler owns its own temporary `Vec<u8>` instead of reusing
/// fields on this struct).
#[derive(Debug, Default)]
pub struct SessionState {
    /// The currently selected group, if any (`GROUP`/`LISTGROUP`).
    pub selected_group: Option<Group>,
    /// Current article number within `selected_group`, or [`NO_CURSOR`].
    pub cursor: i64,
    /// Message-id of the article at `cursor`, if known.
    pub cursor_id: Bytes,
    /// Authenticated username, set by a successful `AUTHINFO`.
    pub auth_user: Option<Bytes>,
    /// Username from an `AUTHINFO USER` awaiting its `AUTHINFO PASS`,
    /// matching the origin's `nntpHandler.userName` field.
    pub pending_user: Option<Bytes>,
    /// Set once the session has processed `QUIT`; the command loop exits
    /// after writing the `205` response.
    pub end: bool,
}

impl SessionState {
    /// A fresh session: no group selected, cursor unset, not authenticated.
    pub fn new() -> Self {
        Self {
            selected_group: None,
            cursor: NO_CURSOR,
            cursor_id: Bytes::new(),
            auth_user: None,
            pending_user: None,
            end: false,
        }
    }

    /// Clears cursor and cursor-id, used whenever a new `GROUP` is
    /// selected (RFC 3977 Section 6.1.1: selecting a group resets the
    /// current article pointer).
    pub fn reset_cursor(&mut self) {
        self.cursor = NO_CURSOR;
        self.cursor_id = Bytes::new();
    }
}
