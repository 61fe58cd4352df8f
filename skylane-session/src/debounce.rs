use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Cancellable delay timer for keystroke-driven triggers.
///
/// At most one task is pending; scheduling a new one aborts the previous,
/// so only the last call within a quiet period actually runs. Owned by
/// whichever component issues repeated triggers; dropping it cancels any
/// pending work.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Run `task` after the quiet period, dropping any task still waiting.
    pub fn call<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Abort the pending task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
