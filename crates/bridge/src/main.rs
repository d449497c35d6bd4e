// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use tracing::error;

use statebridge::config::BridgeConfig;
use statebridge::source::FileSource;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match BridgeConfig::parse().load() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e:#}");
            std::process::exit(2);
        }
    };

    let source = FileSource::new(config.state_file.clone());
    if let Err(e) = statebridge::run(config, source).await {
        error!("fatal: {e:#}");
        std::process::exit(1);
    }
}
