//! One module per NNTP command family, each exposing `handle_*` functions
//! the session dispatcher calls directly. Grounded on `cmds2.go`'s flat
//! `handleFunc`-per-command layout; split by family here rather than kept
//! in one file since each family's handlers share no state beyond the
//! session itself and read better grouped by the concern they serve.

pub mod admin;
pub mod article;
pub mod auth;
pub mod group;
pub mod list;
pub mod overview;
pub mod posting;
