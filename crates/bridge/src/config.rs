// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Configuration for the bridge.
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "statebridge", about = "Push game state snapshots to a WebSocket overlay")]
pub struct BridgeConfig {
    /// Port to listen on. The bind address is always loopback.
    #[arg(long, default_value_t = 6210, env = "STATEBRIDGE_PORT")]
    pub port: u16,

    /// Display format string, echoed at startup for overlay authors.
    #[arg(long, default_value = "{0}{1}{2}{3}", env = "STATEBRIDGE_FORMAT")]
    pub format: String,

    /// Path to the state file exported by the game process.
    #[arg(long, default_value = "state.txt", env = "STATEBRIDGE_STATE_FILE")]
    pub state_file: PathBuf,

    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 50, env = "STATEBRIDGE_POLL_MS")]
    pub poll_ms: u64,

    /// How long to wait for the state source at startup, in seconds.
    #[arg(long, default_value_t = 300, env = "STATEBRIDGE_PROBE_TIMEOUT_SECS")]
    pub probe_timeout_secs: u64,

    /// Probe retry interval in milliseconds.
    #[arg(long, default_value_t = 500, env = "STATEBRIDGE_PROBE_RETRY_MS")]
    pub probe_retry_ms: u64,

    /// Optional JSON settings file; its values override the flags above.
    #[arg(long, env = "STATEBRIDGE_SETTINGS")]
    pub settings: Option<PathBuf>,
}

/// Settings file shape, matching the original appsettings layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    pub format: Option<String>,
    pub port: Option<u16>,
}

impl BridgeConfig {
    /// Fold in the settings file, when one was given.
    pub fn load(mut self) -> anyhow::Result<Self> {
        if let Some(ref path) = self.settings {
            let contents = std::fs::read_to_string(path)?;
            let file: Settings = serde_json::from_str(&contents)?;
            if let Some(format) = file.format {
                self.format = format;
            }
            if let Some(port) = file.port {
                self.port = port;
            }
        }
        Ok(self)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), self.port)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }

    pub fn probe_window(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn probe_retry(&self) -> Duration {
        Duration::from_millis(self.probe_retry_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
