// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::net::SocketAddr;
use std::time::Duration;

/// Errors surfaced by the bridge.
///
/// Only `SourceUnavailable` and `Bind` are startup-fatal; everything else is
/// reported and recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The state source never reported connected within the probe window.
    #[error("state source not reachable within {0:?}")]
    SourceUnavailable(Duration),

    /// The listen socket could not be bound (port already in use, usually).
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The send queue is gone: the session ended or the server was stopped.
    #[error("send queue closed")]
    QueueClosed,

    /// Decoding client frames is not implemented.
    #[error("receiving client frames is not supported")]
    ReceiveUnsupported,
}
