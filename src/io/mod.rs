//! Byte- and line-level framing primitives: the dot-stuffing state
//! machines, the CRLF line reader, the dot-terminated multi-line reader,
//! the dot-stuffing response writer, and the header/body splitter.
//!
//! Grounded on the origin server's `matcher.go`/`reader.go`/`writer.go`/
//! `writer2.go`.

pub mod dot_writer;
pub mod dotstate;
pub mod head_body;
pub mod line;
