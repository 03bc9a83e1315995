//! Session engine configuration.
//!
//! This is deliberately small: it holds only the knobs the session engine
//! itself consults (greeting text, scratch buffer sizing, the fixed LIST
//! payloads). Binding a listener, terminating TLS, and loading this struct
//! from a config *file* are all the embedder's responsibility — see the
//! crate-level docs.

/// Configuration for the per-connection session engine.
///
/// # Example
///
/// ```
/// use nntp_server_core::SessionConfig;
///
/// let config = SessionConfig::default();
/// assert_eq!(config.greeting, "Hello!");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Text sent after `200 ` in the initial greeting line.
    #[cfg_attr(feature = "serde", serde(default = "default_greeting"))]
    pub greeting: String,

    /// Initial capacity of the per-connection line buffer, in bytes.
    /// Grows past this if a client sends a longer line; this only avoids
    /// reallocations for the common case.
    #[cfg_attr(feature = "serde", serde(default = "default_line_buffer_capacity"))]
    pub line_buffer_capacity: usize,

    /// Initial capacity of the per-connection output buffer, in bytes.
    #[cfg_attr(feature = "serde", serde(default = "default_out_buffer_capacity"))]
    pub out_buffer_capacity: usize,

    /// Single-line help text body for the `HELP` command.
    #[cfg_attr(feature = "serde", serde(default = "default_help_text"))]
    pub help_text: String,
}

fn default_greeting() -> String {
    "Hello!".to_string()
}

fn default_line_buffer_capacity() -> usize {
    1 << 13
}

fn default_out_buffer_capacity() -> usize {
    1 << 13
}

fn default_help_text() -> String {
    "This is some help text.".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            line_buffer_capacity: default_line_buffer_capacity(),
            out_buffer_capacity: default_out_buffer_capacity(),
            help_text: default_help_text(),
        }
    }
}
