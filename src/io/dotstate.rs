//! The two byte-oriented state machines shared by the dot reader/writer and
//! the head/body splitter.
//!
//! Ported from `matcher.go` (`nlDotNl_transition`, `nlNl_transition`) in the
//! origin NNTP server: both machines are driven one byte at a time so the
//! reader/writer never needs to buffer a whole line to detect a terminator.

/// State of the `CRLF.CRLF` (dot-terminator) scanner.
///
/// ```text
/// \r = 0x0d, \n = 0x0a, . = 0x2e
/// ----------------------------------------------------
/// (x, \r) -> x        (\r is idempotent in every state)
/// (Start, \n) -> SeenLf
/// (SeenLf, .) -> SeenLfDot
/// (SeenLfDot, \n) -> End
/// (_, _) -> Start
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    /// No relevant prefix seen yet (or just reset after a non-matching byte).
    Start,
    /// Last non-`\r` byte was `\n`.
    SeenLf,
    /// Last two non-`\r` bytes were `\n.`
    SeenLfDot,
    /// Terminator (`\n.\n`) complete.
    End,
}

impl DotState {
    /// Advances the state machine by one byte.
    pub fn step(self, b: u8) -> DotState {
        if b == b'\r' {
            return self;
        }
        match (self, b) {
            (DotState::Start, b'\n') => DotState::SeenLf,
            (DotState::SeenLf, b'.') => DotState::SeenLfDot,
            (DotState::SeenLfDot, b'\n') => DotState::End,
            _ => DotState::Start,
        }
    }

    /// Whether the last byte fed to [`step`](Self::step) completed a full
    /// `CRLF.CRLF` terminator.
    pub fn is_end(self) -> bool {
        matches!(self, DotState::End)
    }

    /// Whether the stream, as observed so far, ends in a bare line boundary
    /// (state after `\n`) rather than mid-line. Used by the dot writer's
    /// `close()` to decide between emitting `.CRLF` or `CRLF.CRLF`.
    pub fn ends_on_line_boundary(self) -> bool {
        matches!(self, DotState::SeenLf)
    }
}

impl Default for DotState {
    fn default() -> Self {
        DotState::Start
    }
}

/// State of the blank-line (`CRLF CRLF` / `\n\n`) scanner used by the
/// head/body splitter.
///
/// ```text
/// (x, \r) -> x
/// (x, \n) -> x+1, capped at Boundary
/// (_, _) -> Start
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankLineState {
    /// No newline run in progress.
    Start,
    /// One `\n` seen since the last non-CRLF byte.
    OneLf,
    /// Two consecutive `\n` seen: the header/body boundary.
    Boundary,
}

impl BlankLineState {
    /// Advances the state machine by one byte.
    pub fn step(self, b: u8) -> BlankLineState {
        match b {
            b'\r' => self,
            b'\n' => match self {
                BlankLineState::Start => BlankLineState::OneLf,
                BlankLineState::OneLf | BlankLineState::Boundary => BlankLineState::Boundary,
            },
            _ => BlankLineState::Start,
        }
    }

    /// Whether the boundary has been reached.
    pub fn is_boundary(self) -> bool {
        matches!(self, BlankLineState::Boundary)
    }
}

impl Default for BlankLineState {
    fn default() -> Self {
        BlankLineState::Start
    }
}
