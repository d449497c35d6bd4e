// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Statebridge: pushes game state snapshots to a WebSocket overlay.
//!
//! A publish loop polls an external state source and forwards every changed
//! snapshot to a single connected peer. The transport is hand-rolled over
//! plain TCP: HTTP upgrade handshake, then unmasked text frames, with an
//! unbounded queue decoupling the poller from socket writes.

pub mod config;
pub mod error;
pub mod publish;
pub mod source;
pub mod transport;

use tokio_util::sync::CancellationToken;

use crate::config::BridgeConfig;
use crate::source::StateSource;
use crate::transport::server::WsServer;

/// Run the bridge until shutdown.
///
/// Binds the listen socket first (a taken port fails before anything else
/// runs), then probes the source within the configured window, then hands
/// the foreground to the publish loop. Ctrl-C cancels both loops.
pub async fn run(config: BridgeConfig, mut source: impl StateSource) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();

    tracing::info!(format = %config.format, port = config.port, "config loaded");

    let server = WsServer::start(config.listen_addr(), shutdown.child_token()).await?;

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutting down");
                shutdown.cancel();
            }
        });
    }

    if let Err(e) = publish::probe_source(
        &mut source,
        config.probe_window(),
        config.probe_retry(),
        &shutdown,
    )
    .await
    {
        server.stop();
        server.join().await;
        return Err(e.into());
    }

    publish::run(&mut source, &server, config.poll_interval(), &shutdown).await;

    tracing::info!("stopping");
    server.stop();
    server.join().await;
    Ok(())
}
