// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;

use super::BridgeConfig;

fn parse(args: &[&str]) -> BridgeConfig {
    BridgeConfig::try_parse_from(std::iter::once("statebridge").chain(args.iter().copied()))
        .expect("parse args")
}

#[test]
fn defaults_match_the_shipped_settings() {
    let config = parse(&[]);
    assert_eq!(config.port, 6210);
    assert_eq!(config.format, "{0}{1}{2}{3}");
    assert_eq!(config.poll_ms, 50);
    assert_eq!(config.probe_timeout_secs, 300);
}

#[test]
fn listen_addr_is_always_loopback() {
    let config = parse(&["--port", "7777"]);
    assert_eq!(config.listen_addr().to_string(), "127.0.0.1:7777");
}

#[test]
fn settings_file_overrides_flags() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"Format": "{3}{2}{1}{0}", "Port": 9100}"#).expect("write");

    let config = parse(&["--settings", &path.to_string_lossy()]).load().expect("load");
    assert_eq!(config.port, 9100);
    assert_eq!(config.format, "{3}{2}{1}{0}");
}

#[test]
fn partial_settings_file_keeps_other_values() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"Port": 9100}"#).expect("write");

    let config = parse(&["--settings", &path.to_string_lossy()]).load().expect("load");
    assert_eq!(config.port, 9100);
    assert_eq!(config.format, "{0}{1}{2}{3}");
}

#[test]
fn malformed_settings_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "not json").expect("write");

    assert!(parse(&["--settings", &path.to_string_lossy()]).load().is_err());
}

#[test]
fn missing_settings_file_is_an_error() {
    let config = parse(&["--settings", "/nonexistent/settings.json"]);
    assert!(config.load().is_err());
}
