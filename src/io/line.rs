//! Line-oriented reading over an [`AsyncBufRead`], plus the dot-terminated
//! multi-line reader used for posted article bodies (`POST`, `IHAVE`,
//! `TAKETHIS`).
//!
//! Grounded on `reader.go`'s `Reader`/`DotReader` from the origin server.
//! The origin pools both types through a `sync.Pool` because Go's GC makes
//! per-connection allocation costly; here the connection task simply owns
//! its `LineReader` and its buffer lives and dies with the task, so no pool
//! is needed.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::io::dotstate::DotState;

/// Reads CRLF-terminated command lines off a buffered async reader.
///
/// This is a thin wrapper around [`AsyncBufReadExt::read_until`] rather than
/// a hand-rolled buffer like the origin's `Reader.ReadLineB` — tokio's
/// `BufReader` already gives us the single read-ahead buffer the origin
/// built by hand, so re-implementing it would just be duplicating what the
/// standard wrapper does.
pub struct LineReader<R> {
    inner: R,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    /// Wraps an already-buffered reader. Callers typically construct `R` via
    /// `tokio::io::BufReader::with_capacity(cfg.line_buffer_capacity, sock)`.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Reads one line, including its trailing `\n` (and `\r` if present),
    /// appending to `ext` and returning the number of bytes appended. A
    /// return value of `0` means the peer closed the connection cleanly
    /// between lines.
    pub async fn read_line_into(&mut self, ext: &mut Vec<u8>) -> std::io::Result<usize> {
        self.inner.read_until(b'\n', ext).await
    }

    /// Starts a dot-terminated multi-line read (the body of a posted
    /// article). The returned [`DotReader`] borrows this reader exclusively
    /// until it's dropped or [`DotReader::consume`] drains it to the end.
    pub fn dot_reader(&mut self) -> DotReader<'_, R> {
        DotReader {
            inner: &mut self.inner,
            state: DotState::SeenLf,
            end: false,
        }
    }

    /// Unwraps back to the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// A dot-terminated (`CRLF.CRLF`) multi-line body, read line-by-line off a
/// [`LineReader`].
///
/// Unlike the origin's `Read([]byte) (int, error)` adapter, this exposes a
/// `next_line` interface: every NNTP caller that needs a dot-reader
/// (posting, TAKETHIS) wants line-delimited access for byte-destuffing and
/// header/body splitting, not a raw byte stream, so there's no point
/// emulating `io.Reader` here.
pub struct DotReader<'a, R> {
    inner: &'a mut R,
    state: DotState,
    end: bool,
}

impl<'a, R: AsyncBufRead + Unpin> DotReader<'a, R> {
    /// Reads the next raw line (byte-stuffing intact) into `ext`. Returns
    /// `Ok(0)` once the terminator has already been consumed on a prior
    /// call, so callers can loop `while reader.next_line(&mut buf)? > 0`.
    ///
    /// A connection closing mid-body surfaces as an `UnexpectedEof` error —
    /// a truncated post is a protocol violation, not a valid empty body.
    pub async fn next_line(&mut self, ext: &mut Vec<u8>) -> std::io::Result<usize> {
        if self.end {
            return Ok(0);
        }
        let start = ext.len();
        let n = self.inner.read_until(b'\n', ext).await?;
        if n == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection closed mid-body",
            ));
        }
        let mut state = self.state;
        for &b in &ext[start..] {
            state = state.step(b);
        }
        self.state = state;
        if state.is_end() {
            self.end = true;
        }
        Ok(n)
    }

    /// Strips NNTP dot-stuffing from a line already known not to be the
    /// terminator: a leading `..` becomes `.`. Leaves everything else
    /// untouched, matching the origin's `strip_byte_stuffing` convention.
    pub fn unstuff(line: &[u8]) -> &[u8] {
        if line.starts_with(b"..") {
            &line[1..]
        } else {
            line
        }
    }

    /// Whether the terminator (`.CRLF`) has been reached.
    pub fn is_done(&self) -> bool {
        self.end
    }

    /// Drains any remaining lines without keeping their content, used when a
    /// capability rejects a post and the engine still must read the body off
    /// the wire to keep framing in sync.
    pub async fn consume(&mut self) -> std::io::Result<()> {
        let mut scratch = Vec::new();
        while !self.end {
            scratch.clear();
            self.next_line(&mut scratch).await?;
        }
        Ok(())
    }
}
