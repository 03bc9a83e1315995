//! `LIST` (RFC 3977 Section 7.6): `ACTIVE`, `NEWSGROUPS`, `OVERVIEW.FMT`,
//! `HEADERS`.
//!
//! Not present in the origin server's retrieved sources; grounded on
//! `structures.go`'s `GroupListingCaps` (the capability this command is
//! the sole caller of) and on RFC 3977 Section 7.6's keyword list.
//! `ACTIVE` and `NEWSGROUPS` both enumerate through the same capability —
//! an embedder that wants `NEWSGROUPS` to show descriptions rather than
//! watermarks formats its own output inside `list_groups`.

use std::io::Write;

use crate::capabilities::Capabilities;
use crate::error::Result;
use crate::helpers::ascii_lowercase_inplace;
use crate::io::dot_writer::DotWriter;
use crate::response::{self, codes};
use crate::wildmat::WildMat;

const OVERVIEW_FMT: &[&str] = &[
    "Subject:\r\n",
    "From:\r\n",
    "Date:\r\n",
    "Message-ID:\r\n",
    "References:\r\n",
    "Bytes:\r\n",
    "Lines:\r\n",
    "Xref:full\r\n",
];

const HEADERS_FMT: &[&str] = &[":\r\n"];

pub async fn handle_list<C: Capabilities>(
    caps: &C,
    args: &[Vec<u8>],
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut variant = args.first().cloned().unwrap_or_else(|| b"ACTIVE".to_vec());
    ascii_lowercase_inplace(&mut variant);

    match variant.as_slice() {
        b"active" | b"newsgroups" => {
            list_groups(caps, args.get(1).map(|v| v.as_slice()), out).await
        }
        b"overview.fmt" => {
            write_canned(out, codes::INFORMATION_FOLLOWS, "Order of fields", OVERVIEW_FMT)
        }
        b"headers" => write_canned(
            out,
            codes::INFORMATION_FOLLOWS,
            "Header and metadata list follows",
            HEADERS_FMT,
        ),
        _ => {
            response::write_status(out, response::SYNTAX_ERROR);
            Ok(())
        }
    }
}

async fn list_groups<C: Capabilities>(
    caps: &C,
    wildmat_arg: Option<&[u8]>,
    out: &mut Vec<u8>,
) -> Result<()> {
    // A wildmat that fails to compile (e.g. exceeds regex's compiled-size
    // limit) isn't a protocol error: it just matches nothing, so the
    // response is a valid empty block rather than a dropped connection.
    let wm = match wildmat_arg {
        Some(pattern) if !pattern.is_empty() => match WildMat::compile(&String::from_utf8_lossy(pattern)) {
            Ok(wm) => Some(wm),
            Err(_) => {
                response::write_status_line(out, codes::INFORMATION_FOLLOWS, b"Information follows");
                DotWriter::new(out).close()?;
                return Ok(());
            }
        },
        _ => None,
    };

    let mut body = Vec::new();
    let supported = caps.list_groups(wm.as_ref(), &mut body).await;

    response::write_status_line(out, codes::INFORMATION_FOLLOWS, b"Information follows");
    let mut dw = DotWriter::new(out);
    if supported {
        dw.write_all(&body)?;
    }
    dw.close()?;
    Ok(())
}

fn write_canned(out: &mut Vec<u8>, code: u16, text: &str, lines: &[&str]) -> Result<()> {
    response::write_status_line(out, code, text.as_bytes());
    let mut dw = DotWriter::new(out);
    for line in lines {
        dw.write_all(line.as_bytes())?;
    }
    dw.close()?;
    Ok(())
}
