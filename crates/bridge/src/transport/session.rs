// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One accepted connection: buffer reads until the upgrade completes, then
//! drain the queue writing frames until the peer or the process goes away.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::transport::frame;
use crate::transport::handshake::{self, Negotiation};
use crate::transport::queue::{PendingMessage, SendOutcome};

/// Lifecycle of the single accepted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Listening,
    HandshakePending,
    Open,
    Closed,
}

/// Drive one connection to completion.
///
/// Returns when the peer disconnects, a write fails, or `cancel` fires.
/// The stream is owned and dropped here, so the socket closes on every exit
/// path. Messages left in the queue are the caller's to discard.
pub async fn run<S: AsyncRead + AsyncWrite + Unpin>(
    mut stream: S,
    rx: &mut mpsc::UnboundedReceiver<PendingMessage>,
    cancel: CancellationToken,
) -> SessionState {
    let mut state = SessionState::HandshakePending;
    let mut inbound: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        match state {
            SessionState::HandshakePending => {
                let n = tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!("session cancelled while handshake pending");
                        break;
                    }
                    read = stream.read(&mut chunk) => match read {
                        Ok(0) => {
                            tracing::info!("peer closed before completing handshake");
                            break;
                        }
                        Ok(n) => n,
                        Err(e) => {
                            tracing::warn!(err = %e, "read failed during handshake");
                            break;
                        }
                    },
                };
                inbound.extend_from_slice(&chunk[..n]);

                match handshake::negotiate(&inbound) {
                    Ok(Negotiation::Incomplete) => {}
                    Ok(Negotiation::Accepted(response)) => {
                        if let Err(e) = stream.write_all(&response).await {
                            tracing::warn!(err = %e, "failed to write 101 response");
                            break;
                        }
                        inbound.clear();
                        tracing::info!("handshake complete");
                        state = SessionState::Open;
                    }
                    Err(e) => {
                        // A complete request that is not an upgrade. Drop the
                        // buffered bytes and wait for the peer to try again.
                        tracing::debug!(err = %e, "discarding non-upgrade request");
                        inbound.clear();
                    }
                }
            }
            SessionState::Open => {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!("session cancelled");
                        break;
                    }
                    msg = rx.recv() => {
                        // The queue sender only drops when the server is gone.
                        let Some(msg) = msg else { break };
                        let payload = frame::encode_text(msg.text.as_bytes());
                        match stream.write_all(&payload).await {
                            Ok(()) => msg.resolve(SendOutcome::Delivered),
                            Err(e) => {
                                tracing::info!(err = %e, "peer write failed, closing session");
                                msg.resolve(SendOutcome::Cancelled);
                                break;
                            }
                        }
                    }
                    read = stream.read(&mut chunk) => match read {
                        Ok(0) => {
                            tracing::info!("peer disconnected");
                            break;
                        }
                        // Client-to-server frames are read off the socket and
                        // never interpreted.
                        Ok(_) => {}
                        Err(e) => {
                            tracing::info!(err = %e, "peer read failed");
                            break;
                        }
                    }
                }
            }
            SessionState::Listening | SessionState::Closed => break,
        }
    }

    SessionState::Closed
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
