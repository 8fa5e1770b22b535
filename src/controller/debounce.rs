//! Restartable single-shot timer used to coalesce bursts of edits.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Trailing-edge debounce: each [`schedule`](Debouncer::schedule) restarts the
/// window, and only the last one fires.
///
/// The timer posts a message carrying its generation. Callers pass that
/// generation back to [`fire`](Debouncer::fire), which rejects anything
/// cancelled or superseded after it was already queued.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a timer is armed and not yet fired.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Restart the window. Returns the new generation.
    pub fn schedule<M, F>(&mut self, tx: &UnboundedSender<M>, make_message: F) -> u64
    where
        M: Send + 'static,
        F: FnOnce(u64) -> M + Send + 'static,
    {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(generation, "No tokio runtime, debounced change dropped");
            return generation;
        };

        let tx = tx.clone();
        let window = self.window;
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(window).await;
            let _ = tx.send(make_message(generation));
        }));

        tracing::trace!(generation, window_ms = window.as_millis() as u64, "Debounce armed");
        generation
    }

    /// Accept a fired timer. `false` means it was cancelled or superseded.
    pub fn fire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.pending.is_none() {
            tracing::trace!(generation, current = self.generation, "Ignoring stale debounce");
            return false;
        }
        self.pending = None;
        true
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation += 1;
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
