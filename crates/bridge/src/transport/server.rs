// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The listening socket and the background accept-and-serve task.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::BridgeError;
use crate::transport::queue::{self, PendingMessage, SendOutcome};
use crate::transport::session;

/// WebSocket push server for a single peer.
///
/// Accepts exactly one connection for the lifetime of the server, matching
/// the overlay-client deployment: when that peer disconnects the serving
/// task ends, and later sends report a closed queue instead of going to a
/// reconnecting client.
pub struct WsServer {
    local_addr: SocketAddr,
    tx: mpsc::UnboundedSender<PendingMessage>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl WsServer {
    /// Bind the address and start the background accept loop.
    ///
    /// Returns as soon as the socket is bound; a bind failure is the only
    /// startup error.
    pub async fn start(addr: SocketAddr, cancel: CancellationToken) -> Result<Self, BridgeError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| BridgeError::Bind { addr, source })?;
        let local_addr = listener.local_addr().map_err(|source| BridgeError::Bind { addr, source })?;
        let (tx, rx) = queue::channel();
        let task = tokio::spawn(accept_and_serve(listener, rx, cancel.clone()));
        tracing::info!(%local_addr, "listening for an overlay client");
        Ok(Self { local_addr, tx, cancel, task })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Enqueue a message, fire-and-forget. Never blocks.
    pub fn send(&self, text: impl Into<String>) -> Result<(), BridgeError> {
        self.tx.send(PendingMessage::new(text.into())).map_err(|_| BridgeError::QueueClosed)
    }

    /// Enqueue a message and get a signal that resolves `Delivered` once the
    /// frame hits the wire, or `Cancelled` if it never does.
    pub fn send_acknowledged(
        &self,
        text: impl Into<String>,
    ) -> Result<oneshot::Receiver<SendOutcome>, BridgeError> {
        let (msg, done) = PendingMessage::acknowledged(text.into());
        self.tx.send(msg).map_err(|_| BridgeError::QueueClosed)?;
        Ok(done)
    }

    /// Client-to-server traffic is drained at the TCP level but never
    /// decoded. Callers get a typed error rather than a future that never
    /// resolves.
    pub fn receive(&self) -> Result<Vec<u8>, BridgeError> {
        Err(BridgeError::ReceiveUnsupported)
    }

    /// Signal shutdown. Idempotent. Unblocks a parked accept.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Wait for the background task to finish.
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

async fn accept_and_serve(
    listener: TcpListener,
    mut rx: mpsc::UnboundedReceiver<PendingMessage>,
    cancel: CancellationToken,
) {
    // Single-accept model: one peer per server lifetime.
    let stream = tokio::select! {
        _ = cancel.cancelled() => None,
        accepted = listener.accept() => match accepted {
            Ok((stream, peer)) => {
                tracing::info!(%peer, "client connected");
                Some(stream)
            }
            Err(e) => {
                tracing::warn!(err = %e, "accept failed");
                None
            }
        }
    };
    // No further peers either way; release the listening socket now.
    drop(listener);

    if let Some(stream) = stream {
        let state = session::run(stream, &mut rx, cancel).await;
        tracing::info!(?state, "session ended");
    }

    // Anything still queued will never reach a peer; say so explicitly.
    queue::discard_queued(&mut rx);
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
