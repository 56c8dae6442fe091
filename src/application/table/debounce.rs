//! Trailing-edge debounce on tokio timers.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet period before a typed search term is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Emits a value once no newer one has arrived for `delay`. A value pushed
/// while another is pending replaces it and restarts the wait. When the
/// debouncer is closed a pending value is flushed.
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    worker: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, mut incoming) = mpsc::unbounded_channel::<T>();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();

        let worker = tokio::spawn(async move {
            while let Some(mut pending) = incoming.recv().await {
                loop {
                    tokio::select! {
                        next = incoming.recv() => match next {
                            Some(newer) => pending = newer,
                            None => {
                                let _ = settled_tx.send(pending);
                                return;
                            }
                        },
                        _ = tokio::time::sleep(delay) => {
                            if settled_tx.send(pending).is_err() {
                                return;
                            }
                            break;
                        }
                    }
                }
            }
        });

        (Self { input, worker }, settled_rx)
    }

    /// `false` once the worker has stopped.
    pub fn push(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }

    /// Stop accepting values and wait for the pending one to flush.
    pub async fn close(self) {
        drop(self.input);
        let _ = self.worker.await;
    }
}
