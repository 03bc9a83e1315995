//! The per-connection command loop: reads one command line at a time,
//! dispatches to a handler, and flushes the accumulated response before
//! reading the next line.
//!
//! Grounded on `nntpdecoder.go`'s `servceConn`/`nntpCommands` dispatch
//! table. The origin keys handlers in a `map[string]handleFunc` built once
//! at package init; this engine uses a `match` on the lowercased command
//! token instead, since Rust has no static-init-time map literal as
//! convenient as Go's and a match compiles to the same jump table a perfect
//! hash map would give here anyway.

pub mod state;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, ReadHalf, WriteHalf};
use tracing::{debug, instrument, warn};

use crate::capabilities::Capabilities;
use crate::commands;
use crate::config::SessionConfig;
use crate::error::Result;
use crate::helpers;
use crate::io::line::LineReader;
use crate::response::{self, codes};

pub use state::{Article, ArticleRange, Group, SessionState, NO_CURSOR};

/// A single NNTP connection: owns the framed reader/writer halves, the
/// session state, and the embedder's capability implementation.
///
/// Generic over `IO` (the underlying duplex stream — a `TcpStream` in
/// production, `tokio::io::DuplexStream` in tests) and `C` (the
/// capability bundle). Both are resolved statically per connection, so
/// there's no dynamic dispatch on the hot path even though the individual
/// capability traits are `dyn`-compatible for the embedder's convenience.
pub struct Session<IO, C> {
    reader: LineReader<BufReader<ReadHalf<IO>>>,
    writer: WriteHalf<IO>,
    out: Vec<u8>,
    line: Vec<u8>,
    state: SessionState,
    caps: C,
    config: SessionConfig,
}

impl<IO, C> Session<IO, C>
where
    IO: AsyncRead + AsyncWrite + Unpin,
    C: Capabilities,
{
    /// Wraps `io` in a fresh session using `caps` to back every protocol
    /// operation and `config` for buffer sizing and static text.
    pub fn new(io: IO, caps: C, config: SessionConfig) -> Self {
        let (read_half, writer) = tokio::io::split(io);
        let reader = LineReader::new(BufReader::with_capacity(
            config.line_buffer_capacity,
            read_half,
        ));
        let out = Vec::with_capacity(config.out_buffer_capacity);
        Self {
            reader,
            writer,
            out,
            line: Vec::with_capacity(256),
            state: SessionState::new(),
            caps,
            config,
        }
    }

    /// The embedder's capability implementation.
    pub fn caps(&self) -> &C {
        &self.caps
    }

    /// The current session state (selected group, cursor, auth status).
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Runs the command loop to completion: sends the greeting, then reads
    /// and dispatches commands until `QUIT` or the peer closes the
    /// connection. Returns on a clean shutdown; I/O errors propagate to the
    /// caller, which is expected to just drop the connection.
    #[instrument(skip_all)]
    pub async fn run(mut self) -> Result<()> {
        self.write_greeting().await?;
        loop {
            self.line.clear();
            let n = self.reader.read_line_into(&mut self.line).await?;
            if n == 0 {
                debug!("peer closed connection without QUIT");
                break;
            }
            if let Err(e) = self.dispatch().await {
                warn!(error = %e, "command handling failed, closing connection");
                return Err(e);
            }
            self.flush_out().await?;
            if self.state.end {
                break;
            }
        }
        let _ = self.writer.shutdown().await;
        Ok(())
    }

    async fn write_greeting(&mut self) -> Result<()> {
        response::write_status_line(
            &mut self.out,
            codes::POSTING_ALLOWED,
            self.config.greeting.as_bytes(),
        );
        self.flush_out().await
    }

    async fn flush_out(&mut self) -> Result<()> {
        if !self.out.is_empty() {
            self.writer.write_all(&self.out).await?;
            self.out.clear();
        }
        Ok(())
    }

    /// Tokenizes `self.line`, lowercases the command token, and dispatches
    /// to the matching handler. Tokens are copied out of `self.line` into
    /// owned buffers up front so the line buffer can be cleared and reused
    /// for the next read without fighting the borrow checker over handlers
    /// that also need `&mut self.out` — commands run once per round trip,
    /// so the extra copies aren't a meaningful cost.
    async fn dispatch(&mut self) -> Result<()> {
        let trimmed = helpers::trim_crlf(helpers::trim_left(&self.line)).to_vec();
        let mut tokens: Vec<Vec<u8>> = helpers::split_whitespace(&trimmed)
            .into_iter()
            .map(|t| t.to_vec())
            .collect();
        helpers::ascii_lowercase_inplace(&mut tokens[0]);
        let command = tokens.remove(0);
        let args = tokens;

        match command.as_slice() {
            b"" => {
                response::write_status(&mut self.out, response::UNKNOWN_COMMAND);
                Ok(())
            }
            b"quit" => {
                self.state.end = true;
                response::write_status_line(&mut self.out, codes::CLOSING, b"bye");
                Ok(())
            }
            b"capabilities" => commands::admin::handle_capabilities(&mut self.out).await,
            b"mode" => commands::admin::handle_mode(&args, &mut self.out).await,
            b"date" => commands::admin::handle_date(&mut self.out).await,
            b"help" => commands::admin::handle_help(&self.config, &mut self.out).await,
            b"newgroups" => commands::admin::handle_newgroups(&mut self.out).await,
            b"authinfo" => {
                commands::auth::handle_authinfo(&mut self.state, &self.caps, &args, &mut self.out)
                    .await
            }
            b"group" => {
                commands::group::handle_group(&mut self.state, &self.caps, &args, &mut self.out)
                    .await
            }
            b"listgroup" => {
                commands::group::handle_listgroup(
                    &mut self.state,
                    &self.caps,
                    &args,
                    &mut self.out,
                )
                .await
            }
            b"last" => {
                commands::group::handle_last(&mut self.state, &self.caps, &mut self.out).await
            }
            b"next" => {
                commands::group::handle_next(&mut self.state, &self.caps, &mut self.out).await
            }
            b"stat" => {
                commands::article::handle_stat(&self.state, &self.caps, &args, &mut self.out)
                    .await
            }
            b"head" => {
                commands::article::handle_head(&self.state, &self.caps, &args, &mut self.out)
                    .await
            }
            b"body" => {
                commands::article::handle_body(&self.state, &self.caps, &args, &mut self.out)
                    .await
            }
            b"article" => {
                commands::article::handle_article(&self.state, &self.caps, &args, &mut self.out)
                    .await
            }
            b"over" | b"xover" => {
                commands::overview::handle_over(&self.state, &self.caps, &args, &mut self.out)
                    .await
            }
            b"hdr" | b"xhdr" => {
                commands::overview::handle_hdr(&self.state, &self.caps, &args, &mut self.out)
                    .await
            }
            b"list" => {
                commands::list::handle_list(&self.caps, &args, &mut self.out).await
            }
            b"post" => {
                commands::posting::handle_post(
                    &self.caps,
                    &mut self.reader,
                    &mut self.writer,
                    &mut self.out,
                )
                .await
            }
            b"ihave" => {
                commands::posting::handle_ihave(
                    &self.caps,
                    &args,
                    &mut self.reader,
                    &mut self.writer,
                    &mut self.out,
                )
                .await
            }
            b"check" => {
                commands::posting::handle_check(&self.caps, &args, &mut self.out).await
            }
            b"takethis" => {
                commands::posting::handle_takethis(
                    &mut self.state,
                    &self.caps,
                    &args,
                    &mut self.reader,
                    &mut self.out,
                )
                .await
            }
            _ => {
                response::write_status(&mut self.out, response::UNKNOWN_COMMAND);
                Ok(())
            }
        }
    }
}
