//! Capability traits the embedder implements to back a [`Session`] with a
//! real article store.
//!
//! Grounded on `structures.go`'s `GroupCaps`/`ArticleCaps`/`PostingCaps`/
//! `GroupListingCaps`/`LoginCaps` interfaces and its `Handler` struct, which
//! composes them by embedding. Go interface embedding has no direct Rust
//! equivalent; the idiomatic substitute used throughout this crate is a
//! single object-safe supertrait (`Capabilities`) stored behind a `Box<dyn
//! _>`, with [`DefaultCaps`] — a reject-everything implementation of all
//! five traits — available for embedders that only want to back a subset
//! of them (delegate the rest to a `DefaultCaps` field, mirroring the
//! origin's `Handler::fill`).
//!
//! These traits are `#[async_trait]` so they stay object-safe: a real
//! implementation almost always needs to hit a database or filesystem, and
//! `async fn` in a plain trait isn't dyn-compatible.
//!
//! One liberty taken relative to the origin: `AuthinfoUserOnly`/
//! `AuthinfoUserPass` there can swap in a whole new `Handler` on successful
//! login (e.g. to grant posting rights). This crate has no equivalent —
//! authentication only grants/denies; an embedder that wants per-user
//! capabilities should branch on [`Session::auth_user`](crate::session::Session::auth_user)
//! inside its own capability methods instead.

use async_trait::async_trait;
use bytes::Bytes;

use crate::session::state::{Article, ArticleRange, Group};
use crate::wildmat::WildMat;

/// Privilege checked via [`LoginCaps::check_privilege`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// Permission to use `POST`/`IHAVE`/`TAKETHIS`.
    Post,
}

/// Outcome of [`PostingCaps::perform_post`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    /// The article was stored.
    Accepted,
    /// The article was read but deliberately not stored (duplicate, spam).
    Rejected,
    /// Storage failed for a reason the client might succeed at retrying.
    Failed,
}

/// Newsgroup lookup, listing, and cursor navigation.
#[async_trait]
pub trait GroupCaps: Send + Sync {
    /// Looks up `g.name` and fills in `count`/`low`/`high` on success.
    async fn get_group(&self, g: &mut Group) -> bool;

    /// Writes one line per article number in `[first, last]` present in
    /// `g` to `out` (the body of a `LISTGROUP` response), dot-stuffed by
    /// the caller.
    async fn list_group(&self, g: &Group, first: i64, last: i64, out: &mut Vec<u8>);

    /// Moves the group cursor from article number `i`. `backward` selects
    /// `LAST`-style motion over `NEXT`-style motion. Returns the new
    /// article number and its message-id on success.
    async fn cursor_move_group(&self, g: &Group, i: i64, backward: bool) -> Option<(i64, Bytes)>;
}

/// Article retrieval by number or message-id.
#[async_trait]
pub trait ArticleCaps: Send + Sync {
    /// Fills in whichever of `a.number`/`a.message_id` is missing and
    /// returns whether the article exists (`STAT`/`LAST`/`NEXT`).
    async fn stat_article(&self, a: &mut Article) -> bool;

    /// Writes the selected parts of the article (`head`, `body`, or both)
    /// to `out`, dot-stuffed, and fills in the other identifier on `a` the
    /// same way [`stat_article`](Self::stat_article) does. Returns whether
    /// the article was found.
    async fn get_article(&self, a: &mut Article, head: bool, body: bool, out: &mut Vec<u8>) -> bool;

    /// Writes one tab-separated overview line per article in `ar` to
    /// `out` (`OVER`/`XOVER`). Returns whether the range resolved to at
    /// least the group itself existing.
    async fn write_overview(&self, ar: &ArticleRange, out: &mut Vec<u8>) -> bool;

    /// Writes one `number SP value` line per article in `ar` that carries
    /// `header`, to `out` (`HDR`/`XHDR`, RFC 3977 Section 8.5 — not present
    /// in the origin server, added per RFC 3977's recommendation that
    /// `HDR` accompany `OVER`). Returns whether the range resolved.
    async fn write_header(&self, header: &[u8], ar: &ArticleRange, out: &mut Vec<u8>) -> bool;
}

/// Accepting posted and transferred articles.
#[async_trait]
pub trait PostingCaps: Send + Sync {
    /// `CHECK`/`IHAVE`: whether `id` is wanted, and whether posting is
    /// possible at all right now (`(wanted, possible)`).
    async fn check_post_id(&self, id: &[u8]) -> (bool, bool);

    /// `POST`: whether posting is possible at all right now.
    async fn check_post(&self) -> bool;

    /// Stores a fully-read article. `id` is `Some` for `IHAVE`/`TAKETHIS`
    /// (message-id announced up front) and `None` for `POST` (message-id,
    /// if any, comes from the article's own headers).
    async fn perform_post(&self, id: Option<&[u8]>, article: &[u8]) -> PostOutcome;
}

/// Enumerating newsgroups (`LIST ACTIVE`, `LIST NEWSGROUPS`).
#[async_trait]
pub trait GroupListingCaps: Send + Sync {
    /// Writes one line per matching group to `out`. `wm` is `None` when the
    /// client didn't supply a wildmat argument (list everything). Returns
    /// whether listing is supported at all.
    async fn list_groups(&self, wm: Option<&WildMat>, out: &mut Vec<u8>) -> bool;
}

/// `AUTHINFO` (RFC 4643) handling.
#[async_trait]
pub trait LoginCaps: Send + Sync {
    /// Whether authentication has already occurred (or isn't required) for
    /// this session, so `AUTHINFO` can be refused as out-of-sequence.
    async fn authinfo_done(&self) -> bool;

    /// Whether `p` is permitted given the session's current auth state.
    async fn check_privilege(&self, p: Privilege) -> bool;

    /// Whether `user` alone (no password) is accepted.
    async fn authinfo_user_only(&self, user: &[u8]) -> bool;

    /// Whether the `user`/`password` pair is accepted.
    async fn authinfo_user_pass(&self, user: &[u8], password: &[u8]) -> bool;
}

/// The combined capability surface a [`Session`](crate::session::Session)
/// is generic over. Implement the five traits on one type (delegating
/// unsupported ones to [`DefaultCaps`]) to satisfy this automatically.
pub trait Capabilities:
    GroupCaps + ArticleCaps + PostingCaps + GroupListingCaps + LoginCaps
{
}

impl<T> Capabilities for T where
    T: GroupCaps + ArticleCaps + PostingCaps + GroupListingCaps + LoginCaps
{
}

/// Reject-everything implementation of all five capability traits, for
/// embedders that only care about a subset of NNTP functionality (e.g. a
/// read-only mirror with no posting support).
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCaps;

#[async_trait]
impl GroupCaps for DefaultCaps {
    async fn get_group(&self, _g: &mut Group) -> bool {
        false
    }

    async fn list_group(&self, _g: &Group, _first: i64, _last: i64, _out: &mut Vec<u8>) {}

    async fn cursor_move_group(&self, _g: &Group, _i: i64, _backward: bool) -> Option<(i64, Bytes)> {
        None
    }
}

#[async_trait]
impl ArticleCaps for DefaultCaps {
    async fn stat_article(&self, _a: &mut Article) -> bool {
        false
    }

    async fn get_article(
        &self,
        _a: &mut Article,
        _head: bool,
        _body: bool,
        _out: &mut Vec<u8>,
    ) -> bool {
        false
    }

    async fn write_overview(&self, _ar: &ArticleRange, _out: &mut Vec<u8>) -> bool {
        false
    }

    async fn write_header(&self, _header: &[u8], _ar: &ArticleRange, _out: &mut Vec<u8>) -> bool {
        false
    }
}

#[async_trait]
impl PostingCaps for DefaultCaps {
    async fn check_post_id(&self, _id: &[u8]) -> (bool, bool) {
        (false, false)
    }

    async fn check_post(&self) -> bool {
        false
    }

    async fn perform_post(&self, _id: Option<&[u8]>, _article: &[u8]) -> PostOutcome {
        PostOutcome::Failed
    }
}

#[async_trait]
impl GroupListingCaps for DefaultCaps {
    async fn list_groups(&self, _wm: Option<&WildMat>, _out: &mut Vec<u8>) -> bool {
        false
    }
}

#[async_trait]
impl LoginCaps for DefaultCaps {
    async fn authinfo_done(&self) -> bool {
        true
    }

    async fn check_privilege(&self, _p: Privilege) -> bool {
        true
    }

    async fn authinfo_user_only(&self, _user: &[u8]) -> bool {
        false
    }

    async fn authinfo_user_pass(&self, _user: &[u8], _password: &[u8]) -> bool {
        false
    }
}
