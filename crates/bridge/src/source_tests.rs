// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use super::{FileSource, StateSource};

#[test]
fn connect_fails_until_file_exists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state.txt");
    let mut source = FileSource::new(path.clone());

    assert!(!source.connect());
    assert!(!source.is_connected());

    std::fs::write(&path, "1234").expect("write state");
    assert!(source.connect());
    assert!(source.is_connected());
}

#[test]
fn read_while_disconnected_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut source = FileSource::new(dir.path().join("missing.txt"));

    assert!(!source.connect());
    assert!(source.read_snapshot().is_err());
}

#[test]
fn reads_trimmed_contents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state.txt");
    let mut file = std::fs::File::create(&path).expect("create");
    writeln!(file, "0420").expect("write");
    drop(file);

    let mut source = FileSource::new(path);
    assert!(source.connect());
    assert_eq!(source.read_snapshot().expect("read"), "0420");
}

#[test]
fn deleted_file_becomes_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state.txt");
    std::fs::write(&path, "live").expect("write");

    let mut source = FileSource::new(path.clone());
    assert!(source.connect());
    std::fs::remove_file(&path).expect("remove");

    assert!(source.read_snapshot().is_err());
    assert!(!source.is_connected());
}
