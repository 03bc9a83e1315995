//! NNTP session error types

use thiserror::Error;

/// Errors produced by the session engine.
///
/// I/O errors propagate from the underlying socket; everything else is a
/// protocol-level condition the command loop can usually recover from by
/// writing an error response and continuing to read the next line.
#[derive(Error, Debug)]
pub enum NntpError {
    /// I/O error reading from or writing to the connection.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer's command line did not parse (unexpected EOF mid-line, etc).
    #[error("protocol framing error: {0}")]
    Framing(String),

    /// A capability callback panicked or returned an internally inconsistent
    /// result (e.g. a group without a name). This always indicates a bug in
    /// the embedder's capability implementation, not client input.
    #[error("capability contract violated: {0}")]
    CapabilityContract(String),
}

/// Result type alias using [`NntpError`].
pub type Result<T> = std::result::Result<T, NntpError>;
