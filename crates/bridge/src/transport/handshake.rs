// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP upgrade negotiation (RFC 6455 section 4.2.2) over an accumulated
//! read buffer.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha1::{Digest, Sha1};

const WS_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// Outcome of inspecting the buffered request bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Negotiation {
    /// The header block has no CRLFCRLF terminator yet; keep reading.
    Incomplete,
    /// Upgrade accepted; write these bytes, then the connection is open.
    Accepted(Vec<u8>),
}

/// A complete request that is not a WebSocket upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HandshakeError {
    #[error("request is not an HTTP GET")]
    NotGet,
    #[error("missing Sec-WebSocket-Key header")]
    MissingKey,
}

/// Inspect `buf` (everything read from the peer so far) and negotiate.
///
/// Partial reads are a normal condition: until the terminator arrives the
/// result is [`Negotiation::Incomplete`] and the caller keeps buffering.
/// Only a complete header block is judged, so a key split across reads is
/// never misclassified.
pub fn negotiate(buf: &[u8]) -> Result<Negotiation, HandshakeError> {
    let Some(head_len) = find_header_end(buf) else {
        return Ok(Negotiation::Incomplete);
    };
    let head = String::from_utf8_lossy(&buf[..head_len]);

    if !head.get(..4).is_some_and(|s| s.eq_ignore_ascii_case("GET ")) {
        return Err(HandshakeError::NotGet);
    }

    let key = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("Sec-WebSocket-Key"))
        .map(|(_, value)| value.trim().to_owned())
        .ok_or(HandshakeError::MissingKey)?;

    Ok(Negotiation::Accepted(accept_response(&key)))
}

/// Byte length of the header block including the terminating CRLFCRLF.
fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| i + 4)
}

/// Sec-WebSocket-Accept token: Base64(SHA-1(key + GUID)).
pub fn accept_token(key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    hasher.update(WS_GUID.as_bytes());
    STANDARD.encode(hasher.finalize())
}

fn accept_response(key: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 101 Switching Protocols\r\n\
         Connection: Upgrade\r\n\
         Upgrade: websocket\r\n\
         Sec-WebSocket-Accept: {}\r\n\r\n",
        accept_token(key)
    )
    .into_bytes()
}

#[cfg(test)]
#[path = "handshake_tests.rs"]
mod tests;
