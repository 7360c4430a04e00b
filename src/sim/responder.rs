//! Delayed delivery of mock assistant replies.
//!
//! Each send schedules one independent sleep task on a background tokio
//! runtime; the finished reply crosses back to the UI thread over an
//! unbounded channel that the main loop polls without blocking. Rapid
//! consecutive sends therefore queue multiple pending replies, one per
//! send, with no cancellation or coalescing.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Schedules canned replies and hands them back when due.
#[derive(Debug)]
pub struct Responder {
    handle: Handle,
    tx: UnboundedSender<String>,
    rx: UnboundedReceiver<String>,
    delay: Duration,
    pending: usize,
}

impl Responder {
    /// Create a responder that spawns its delay tasks on `handle`.
    pub fn new(handle: Handle, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            handle,
            tx,
            rx,
            delay,
            pending: 0,
        }
    }

    /// Schedule `reply` for delivery after the configured delay.
    pub fn dispatch(&mut self, reply: String) {
        self.pending += 1;
        tracing::debug!(pending = self.pending, "assistant reply scheduled");

        let tx = self.tx.clone();
        let delay = self.delay;
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver dropped means the app is shutting down.
            let _ = tx.send(reply);
        });
    }

    /// Take the next due reply, if any. Non-blocking.
    pub fn poll(&mut self) -> Option<String> {
        match self.rx.try_recv() {
            Ok(reply) => {
                self.pending = self.pending.saturating_sub(1);
                tracing::debug!(pending = self.pending, "assistant reply delivered");
                Some(reply)
            }
            Err(_) => None,
        }
    }

    /// True while at least one scheduled reply has not been delivered.
    pub fn is_waiting(&self) -> bool {
        self.pending > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn drain_one(responder: &mut Responder, within: Duration) -> Option<String> {
        let deadline = Instant::now() + within;
        while Instant::now() < deadline {
            if let Some(reply) = responder.poll() {
                return Some(reply);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_reply_arrives_after_delay() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut responder = Responder::new(rt.handle().clone(), Duration::from_millis(10));

        assert!(!responder.is_waiting());
        responder.dispatch("done".to_string());
        assert!(responder.is_waiting());

        let reply = drain_one(&mut responder, Duration::from_secs(1));
        assert_eq!(reply.as_deref(), Some("done"));
        assert!(!responder.is_waiting());
    }

    #[test]
    fn test_poll_is_nonblocking_before_the_delay_elapses() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut responder = Responder::new(rt.handle().clone(), Duration::from_secs(30));

        responder.dispatch("late".to_string());
        assert!(responder.poll().is_none());
        assert!(responder.is_waiting());
    }

    #[test]
    fn test_rapid_sends_each_deliver_their_own_reply() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut responder = Responder::new(rt.handle().clone(), Duration::from_millis(10));

        responder.dispatch("first".to_string());
        responder.dispatch("second".to_string());
        assert_eq!(responder.pending, 2);

        let mut replies = Vec::new();
        while let Some(reply) = drain_one(&mut responder, Duration::from_secs(1)) {
            replies.push(reply);
            if replies.len() == 2 {
                break;
            }
        }

        assert_eq!(replies.len(), 2);
        assert!(replies.contains(&"first".to_string()));
        assert!(replies.contains(&"second".to_string()));
        assert!(!responder.is_waiting());
    }
}
