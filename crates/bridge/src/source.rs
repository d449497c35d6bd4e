// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The polled external state source.

use std::path::PathBuf;

/// A provider of connection status and state snapshots.
///
/// The bridge only ever polls: one `connect` probe per retry tick at
/// startup, then `read_snapshot` on every loop tick. Reading while
/// disconnected is an error value, never a panic.
pub trait StateSource: Send {
    /// One connection attempt. Retriable; `true` once the source is live.
    fn connect(&mut self) -> bool;

    fn is_connected(&self) -> bool;

    /// Current state string. Empty means "nothing to report yet".
    fn read_snapshot(&mut self) -> Result<String, SourceReadError>;
}

/// A read was attempted while the source is not available.
#[derive(Debug, thiserror::Error)]
#[error("state source is not connected")]
pub struct SourceReadError;

/// State exported by the game process into a file, polled from disk.
///
/// Stands in for reading the process memory directly; the memory bindings
/// are platform FFI and live outside this crate.
pub struct FileSource {
    path: PathBuf,
    connected: bool,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path, connected: false }
    }
}

impl StateSource for FileSource {
    fn connect(&mut self) -> bool {
        self.connected = self.path.is_file();
        self.connected
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn read_snapshot(&mut self) -> Result<String, SourceReadError> {
        if !self.connected {
            return Err(SourceReadError);
        }
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.trim_end().to_owned()),
            Err(e) => {
                // The exporter may be mid-rewrite; report a missed read and
                // re-check availability on the next tick.
                tracing::debug!(err = %e, "state file read failed");
                self.connected = self.path.is_file();
                Err(SourceReadError)
            }
        }
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
