use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::reveal::RevealPacer;

/// Reference pace: one token every 30ms.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// The revealed prefix grew by one token.
    Token { revealed: String },
    /// Every token has been revealed; stop showing the typing affordance.
    Complete,
}

/// Cancellation switch for an in-flight reveal.
///
/// Cancelling (or dropping the handle) freezes the display at whatever was
/// last emitted. It only stops the visual reveal; the underlying persisted
/// message is already complete and stored.
pub struct RevealHandle {
    cancel_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RevealHandle {
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Drive a [`RevealPacer`] on a cooperative timer, emitting each grown
/// prefix over a channel. The channel closes after `Complete` or after
/// cancellation; nothing is ever emitted past a cancel.
pub fn spawn_reveal(reply: String, pace: Duration) -> (mpsc::Receiver<RevealEvent>, RevealHandle) {
    let (tx, rx) = mpsc::channel(32);
    let (cancel_tx, mut cancel_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut pacer = RevealPacer::new();
        pacer.arm(&reply);

        // A whitespace-only reply has nothing to pace.
        if pacer.is_complete() {
            let _ = tx.send(RevealEvent::Complete).await;
            return;
        }

        let mut ticker = tokio::time::interval(pace);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let revealed = match pacer.advance() {
                        Some(revealed) => revealed,
                        None => break,
                    };
                    if tx.send(RevealEvent::Token { revealed }).await.is_err() {
                        // Receiver went away; no one is watching the reveal.
                        break;
                    }
                    if pacer.is_complete() {
                        let _ = tx.send(RevealEvent::Complete).await;
                        break;
                    }
                }
                _ = cancel_rx.changed() => {
                    tracing::debug!("reveal cancelled");
                    break;
                }
            }
        }
    });

    (rx, RevealHandle { cancel_tx, task })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_reveals_prefixes_then_completes() {
        let (mut rx, _handle) = spawn_reveal("a b c".to_string(), DEFAULT_REVEAL_INTERVAL);

        assert_eq!(
            rx.recv().await,
            Some(RevealEvent::Token {
                revealed: "a".to_string()
            })
        );
        assert_eq!(
            rx.recv().await,
            Some(RevealEvent::Token {
                revealed: "a b".to_string()
            })
        );
        assert_eq!(
            rx.recv().await,
            Some(RevealEvent::Token {
                revealed: "a b c".to_string()
            })
        );
        assert_eq!(rx.recv().await, Some(RevealEvent::Complete));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_freezes_after_first_token() {
        let (mut rx, handle) = spawn_reveal("a b c".to_string(), DEFAULT_REVEAL_INTERVAL);

        assert_eq!(
            rx.recv().await,
            Some(RevealEvent::Token {
                revealed: "a".to_string()
            })
        );

        handle.cancel();

        // Nothing after the cancel: no "a b", no "a b c", no Complete.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_reply_just_completes() {
        let (mut rx, _handle) = spawn_reveal("   ".to_string(), DEFAULT_REVEAL_INTERVAL);
        assert_eq!(rx.recv().await, Some(RevealEvent::Complete));
        assert_eq!(rx.recv().await, None);
    }
}
