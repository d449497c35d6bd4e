// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound WebSocket frame encoding (RFC 6455 section 5.2).

/// Encode `payload` as a single final, unmasked text frame.
///
/// Server-to-client frames carry no mask. Payloads longer than 125 bytes get
/// the 16-bit or 64-bit extended length prefix, so any snapshot string
/// encodes to a well-formed frame.
pub fn encode_text(payload: &[u8]) -> Vec<u8> {
    let len = payload.len();
    let mut frame = Vec::with_capacity(len + 10);
    frame.push(0x81); // FIN set, opcode 1 (text)
    if len <= 125 {
        frame.push(len as u8);
    } else if len <= u16::MAX as usize {
        frame.push(126);
        frame.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        frame.push(127);
        frame.extend_from_slice(&(len as u64).to_be_bytes());
    }
    frame.extend_from_slice(payload);
    frame
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
