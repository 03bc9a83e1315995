//! Splits a dot-terminated article stream into its header block and body at
//! the first blank line, routing bytes to two different sinks as they
//! arrive.
//!
//! Grounded on `writer2.go`'s `HeadBodyWriter`. Used by `POST`/`IHAVE`/
//! `TAKETHIS` handling to hand the header block to header parsing while the
//! body streams straight through to storage without being buffered twice.

use std::io::{self, Write};

use crate::io::dotstate::BlankLineState;

/// Wraps two [`Write`] sinks: `head` receives everything up to and
/// including the first blank line, `body` receives everything after.
pub struct HeadBodySplitter<H, B> {
    head: H,
    body: B,
    state: BlankLineState,
    end: bool,
}

impl<H: Write, B: Write> HeadBodySplitter<H, B> {
    /// Wraps `head`/`body`. If the input never contains a blank line,
    /// everything ends up in `head` and `body` is never written to.
    pub fn new(head: H, body: B) -> Self {
        Self {
            head,
            body,
            state: BlankLineState::Start,
            end: false,
        }
    }

    /// Whether the header/body boundary has been crossed.
    pub fn in_body(&self) -> bool {
        self.end
    }

    /// Consumes the splitter, returning the two sinks.
    pub fn into_inner(self) -> (H, B) {
        (self.head, self.body)
    }
}

impl<H: Write, B: Write> Write for HeadBodySplitter<H, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.end {
            return self.body.write(buf);
        }
        let mut state = self.state;
        for (i, &b) in buf.iter().enumerate() {
            state = state.step(b);
            if state.is_boundary() {
                self.end = true;
                let j = i + 1;
                self.head.write_all(&buf[..j])?;
                let written = self.body.write(&buf[j..])?;
                return Ok(j + written);
            }
        }
        self.state = state;
        self.head.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.head.flush()?;
        self.body.flush()
    }
}
