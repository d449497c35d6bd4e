// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The change-driven publish loop: probe the source, then forward every
//! changed snapshot to the transport.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::BridgeError;
use crate::source::StateSource;
use crate::transport::server::WsServer;

/// Destination for deduplicated snapshots.
///
/// [`WsServer`] is the production sink; tests substitute a recording one.
pub trait SnapshotSink {
    fn publish(&self, snapshot: &str) -> Result<(), BridgeError>;
}

impl SnapshotSink for WsServer {
    fn publish(&self, snapshot: &str) -> Result<(), BridgeError> {
        self.send(snapshot)
    }
}

/// Probe the source until it connects or the window elapses.
///
/// `SourceUnavailable` is fatal to the caller: the bridge refuses to run
/// without a source. Cancellation during the probe is reported the same way
/// so the caller shuts down.
pub async fn probe_source(
    source: &mut dyn StateSource,
    window: Duration,
    retry: Duration,
    cancel: &CancellationToken,
) -> Result<(), BridgeError> {
    tracing::info!("checking whether the state source is reachable");
    let deadline = tokio::time::Instant::now() + window;

    loop {
        if source.connect() {
            tracing::info!("state source found");
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            tracing::warn!("state source not found, giving up");
            return Err(BridgeError::SourceUnavailable(window));
        }
        tokio::select! {
            _ = cancel.cancelled() => return Err(BridgeError::SourceUnavailable(window)),
            _ = tokio::time::sleep(retry) => {}
        }
    }
}

/// Poll the source and push every changed snapshot into `sink`.
///
/// Empty snapshots and values equal to the last snapshot actually published
/// are skipped. Read failures are logged and the loop keeps polling. Runs
/// until cancellation.
pub async fn run<S: SnapshotSink>(
    source: &mut dyn StateSource,
    sink: &S,
    poll: Duration,
    cancel: &CancellationToken,
) {
    let mut last_published: Option<String> = None;
    let mut interval = tokio::time::interval(poll);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        let snapshot = match source.read_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(err = %e, "could not read state");
                continue;
            }
        };

        if snapshot.is_empty() || last_published.as_deref() == Some(snapshot.as_str()) {
            continue;
        }

        tracing::info!(%snapshot, "publishing");
        match sink.publish(&snapshot) {
            Ok(()) => last_published = Some(snapshot),
            Err(e) => {
                // The session is gone. Nothing to deliver to, but keep
                // polling so the process stays alive until it is stopped.
                tracing::debug!(err = %e, "publish skipped");
            }
        }
    }
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
