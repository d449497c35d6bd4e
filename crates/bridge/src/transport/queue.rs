// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending-message queue between the publish loop and the session.

use tokio::sync::{mpsc, oneshot};

/// Delivery outcome reported through a message's completion signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The frame was written to the socket.
    Delivered,
    /// The message was discarded before it reached the wire.
    Cancelled,
}

/// One queued outbound text message.
pub struct PendingMessage {
    pub text: String,
    /// Resolved by the session. `None` for fire-and-forget sends.
    done: Option<oneshot::Sender<SendOutcome>>,
}

impl PendingMessage {
    pub fn new(text: String) -> Self {
        Self { text, done: None }
    }

    /// A message whose delivery can be awaited by the caller.
    pub fn acknowledged(text: String) -> (Self, oneshot::Receiver<SendOutcome>) {
        let (tx, rx) = oneshot::channel();
        (Self { text, done: Some(tx) }, rx)
    }

    /// Resolve the completion signal, if one is attached.
    pub fn resolve(self, outcome: SendOutcome) {
        if let Some(done) = self.done {
            let _ = done.send(outcome);
        }
    }
}

/// FIFO and unbounded: the publish loop pushes without ever blocking, the
/// session drains. Single producer, single consumer.
pub fn channel() -> (mpsc::UnboundedSender<PendingMessage>, mpsc::UnboundedReceiver<PendingMessage>)
{
    mpsc::unbounded_channel()
}

/// Discard everything still queued, resolving each completion as cancelled.
pub fn discard_queued(rx: &mut mpsc::UnboundedReceiver<PendingMessage>) {
    rx.close();
    while let Ok(msg) = rx.try_recv() {
        msg.resolve(SendOutcome::Cancelled);
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
