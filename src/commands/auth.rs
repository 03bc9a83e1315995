//! `AUTHINFO USER`/`AUTHINFO PASS` (RFC 4643).
//!
//! Grounded on `cmds2.go`'s `handleAuthInfo`. One simplification relative
//! to the origin: `AuthinfoUserOnly`/`AuthinfoUserPass` there may return a
//! *replacement* `Handler` to install, letting successful login swap in a
//! privileged capability set. This crate has no equivalent — see the
//! caveat on [`crate::capabilities`] — login only grants/denies, and an
//! embedder that wants per-user capabilities reads
//! [`SessionState::auth_user`] from inside its own capability methods.

use bytes::Bytes;

use crate::capabilities::Capabilities;
use crate::error::Result;
use crate::helpers::ascii_lowercase_inplace;
use crate::response::{self, codes};
use crate::session::state::SessionState;

/// `AUTHINFO USER username` / `AUTHINFO PASS password`.
pub async fn handle_authinfo<C: Capabilities>(
    state: &mut SessionState,
    caps: &C,
    args: &[Vec<u8>],
    out: &mut Vec<u8>,
) -> Result<()> {
    if args.len() < 2 {
        response::write_status(out, response::SYNTAX_ERROR);
        return Ok(());
    }

    if caps.authinfo_done().await {
        response::write_status_line(out, codes::COMMAND_UNAVAILABLE, b"Command unavailable");
        return Ok(());
    }

    let mut keyword = args[0].clone();
    ascii_lowercase_inplace(&mut keyword);
    let value = &args[1];

    match keyword.as_slice() {
        b"user" => {
            if caps.authinfo_user_only(value).await {
                state.auth_user = Some(Bytes::copy_from_slice(value));
                state.pending_user = None;
                response::write_status_line(out, codes::AUTH_ACCEPTED, b"Authentication accepted");
            } else {
                state.pending_user = Some(Bytes::copy_from_slice(value));
                response::write_status_line(out, codes::AUTH_PASSWORD_REQUIRED, b"Enter passphrase");
            }
        }
        b"pass" => match state.pending_user.take() {
            None => response::write_status_line(
                out,
                codes::AUTH_OUT_OF_SEQUENCE,
                b"Authentication commands issued out of sequence",
            ),
            Some(user) => {
                if caps.authinfo_user_pass(&user, value).await {
                    state.auth_user = Some(user);
                    response::write_status_line(out, codes::AUTH_ACCEPTED, b"Authentication accepted");
                } else {
                    response::write_status_line(
                        out,
                        codes::AUTH_REJECTED,
                        b"Authentication failed/rejected",
                    );
                }
            }
        },
        _ => response::write_status(out, response::SYNTAX_ERROR),
    }
    Ok(())
}
