//! Minimal NNTP server accept loop
//!
//! Run with: cargo run --example accept_loop
//!
//! Accepts connections on `NNTP_BIND` (default `127.0.0.1:1119`) and serves
//! each one with `DefaultCaps`, a capability set that rejects every data
//! operation. This is enough to exercise the protocol engine itself
//! (`telnet localhost 1119`, try `CAPABILITIES`, `HELP`, `DATE`, `QUIT`) but
//! not to run a real newsserver — swap `DefaultCaps` for a type backed by
//! an actual article store to do that.

use nntp_server_core::{DefaultCaps, Session, SessionConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let bind_addr = std::env::var("NNTP_BIND").unwrap_or_else(|_| "127.0.0.1:1119".to_string());
    let listener = TcpListener::bind(&bind_addr).await?;
    println!("listening on {bind_addr}");

    loop {
        let (socket, peer) = listener.accept().await?;
        tracing::debug!(%peer, "accepted connection");
        tokio::spawn(async move {
            let session = Session::new(socket, DefaultCaps, SessionConfig::default());
            if let Err(e) = session.run().await {
                tracing::warn!(%peer, error = %e, "connection ended with an error");
            }
        });
    }
}
