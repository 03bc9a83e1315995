//! A `Write` wrapper that stops forwarding bytes once it has seen a
//! `CRLF.CRLF` terminator in the stream, and appends one on `close()` if the
//! body didn't already end with one.
//!
//! Grounded on `writer.go`'s `DotWriter`. The origin pools these through a
//! `sync.Pool` and reinitializes with `Reset`; here a `DotWriter` is created
//! per response body and dropped when done; Vec<u8>-backed output buffers
//! make reuse across responses unnecessary.
//!
//! This operates on `std::io::Write` rather than async I/O deliberately: a
//! response body is always first assembled into the connection's output
//! buffer (a `Vec<u8>`), which is then flushed to the socket in one async
//! `write_all`.

use std::io::{self, Write};

use crate::io::dotstate::DotState;

const DOT_CRLF: &[u8] = b".\r\n";
const CRLF_DOT_CRLF: &[u8] = b"\r\n.\r\n";

/// Wraps a [`Write`] sink, watching for the dot terminator as bytes pass
/// through and appending one on close if the caller didn't supply one.
pub struct DotWriter<W> {
    inner: W,
    state: DotState,
    end: bool,
}

impl<W: Write> DotWriter<W> {
    /// Wraps `inner`. Nothing is written until the first [`write`](Write::write) call.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            state: DotState::SeenLf,
            end: false,
        }
    }

    /// Whether the terminator has already been seen; further writes are
    /// silently discarded once this is true.
    pub fn is_done(&self) -> bool {
        self.end
    }

    /// Appends the terminator if one hasn't already been written, then
    /// returns the wrapped sink.
    pub fn close(mut self) -> io::Result<W> {
        if !self.end {
            let closer: &[u8] = if self.state.ends_on_line_boundary() {
                DOT_CRLF
            } else {
                CRLF_DOT_CRLF
            };
            self.write_all(closer)?;
        }
        Ok(self.inner)
    }
}

impl<W: Write> Write for DotWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.end {
            return Ok(buf.len());
        }
        let mut state = self.state;
        for (i, &b) in buf.iter().enumerate() {
            state = state.step(b);
            if state.is_end() {
                self.end = true;
                let j = i + 1;
                self.inner.write_all(&buf[..j])?;
                return Ok(buf.len());
            }
        }
        self.state = state;
        self.inner.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
