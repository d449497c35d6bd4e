// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hand-rolled WebSocket transport: frame encoding, upgrade handshake, one
//! queued session over plain TCP.

pub mod frame;
pub mod handshake;
pub mod queue;
pub mod server;
pub mod session;
