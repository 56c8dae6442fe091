//! Keeps the `search` query parameter in step with a text input.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

use super::debounce::Debouncer;
use super::params::DataTableParams;

/// A URL change to apply. Search updates replace the history entry and keep
/// the scroll position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub url: String,
    pub replace: bool,
    pub scroll: bool,
}

pub struct SearchSync {
    debouncer: Debouncer<String>,
    params: Arc<Mutex<DataTableParams>>,
    worker: JoinHandle<()>,
}

impl SearchSync {
    pub fn spawn(
        path: impl Into<String>,
        params: DataTableParams,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Navigation>) {
        let path = path.into();
        let params = Arc::new(Mutex::new(params));
        let (debouncer, mut settled) = Debouncer::<String>::spawn(delay);
        let (nav_tx, nav_rx) = mpsc::unbounded_channel();

        let state = params.clone();
        let worker = tokio::spawn(async move {
            while let Some(term) = settled.recv().await {
                let mut params = state.lock().await;
                if params.search() == term.as_str() {
                    continue;
                }
                params.set_search(&term);
                let url = params.href(&path);
                debug!(%url, "search settled");
                let navigation = Navigation {
                    url,
                    replace: true,
                    scroll: false,
                };
                if nav_tx.send(navigation).is_err() {
                    break;
                }
            }
        });

        (
            Self {
                debouncer,
                params,
                worker,
            },
            nav_rx,
        )
    }

    /// Feed the current text of the input.
    pub fn input(&self, text: &str) -> bool {
        self.debouncer.push(text.to_string())
    }

    pub async fn params(&self) -> DataTableParams {
        self.params.lock().await.clone()
    }

    pub async fn close(self) {
        self.debouncer.close().await;
        let _ = self.worker.await;
    }
}
