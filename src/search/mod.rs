//! Search box support.
//!
//! `Debouncer` turns a stream of keystrokes into one settled query per pause:
//! every new keystroke restarts the timer, and only the text present when the
//! timer runs out is emitted.

use std::time::Duration;

use tokio::sync::mpsc;

/// Handle a text input pushes keystrokes into.
#[derive(Debug, Clone)]
pub struct SearchInput {
    tx: mpsc::UnboundedSender<String>,
}

impl SearchInput {
    /// Record the box's current text.
    pub fn push(&self, text: impl Into<String>) {
        // The receiving side is gone once the screen is torn down.
        let _ = self.tx.send(text.into());
    }
}

/// Reset-on-keystroke timer.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    input: SearchInput,
    rx: mpsc::UnboundedReceiver<String>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            input: SearchInput { tx },
            rx,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn input(&self) -> SearchInput {
        self.input.clone()
    }

    /// Wait for the next settled query: the first keystroke starts the timer,
    /// each following one restarts it.
    pub async fn settled(&mut self) -> Option<String> {
        let mut latest = self.rx.recv().await?;
        loop {
            match tokio::time::timeout(self.delay, self.rx.recv()).await {
                Ok(Some(next)) => latest = next,
                Ok(None) | Err(_) => return Some(latest),
            }
        }
    }

    /// Settled query if keystrokes are pending, without waiting for new ones.
    pub async fn settle_pending(&mut self) -> Option<String> {
        let mut latest = self.rx.try_recv().ok()?;
        loop {
            match tokio::time::timeout(self.delay, self.rx.recv()).await {
                Ok(Some(next)) => latest = next,
                Ok(None) | Err(_) => return Some(latest),
            }
        }
    }
}
