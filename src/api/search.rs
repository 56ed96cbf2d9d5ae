//! Debounced external search
//!
//! Cooperative driver for search-as-you-type: each new input restarts a quiet
//! timer, and only when the timer fires does a lookup go out. A newer input
//! aborts the superseded in-flight task (advisory); a stale result that
//! arrives anyway fails the generation check and is discarded, never applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{SearchHit, TechSearch};
use crate::error::Result;

/// Outcome of one settled lookup
#[derive(Debug)]
pub struct SearchOutcome {
    pub query: String,
    pub result: Result<Vec<SearchHit>>,
}

/// Debounced, cancellable search driver
pub struct DebouncedSearch {
    searcher: Arc<dyn TechSearch + Send + Sync>,
    delay: Duration,
    generation: Arc<AtomicU64>,
    inflight: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<SearchOutcome>,
}

impl DebouncedSearch {
    /// Create a driver; outcomes arrive on the returned receiver
    pub fn new(
        searcher: Arc<dyn TechSearch + Send + Sync>,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SearchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                searcher,
                delay,
                generation: Arc::new(AtomicU64::new(0)),
                inflight: None,
                tx,
            },
            rx,
        )
    }

    /// Feed one input event
    ///
    /// Restarts the quiet timer and supersedes any pending or in-flight
    /// lookup. An empty query settles immediately with no hits and no
    /// network call.
    pub fn input(&mut self, query: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }

        let query = query.trim().to_string();
        if query.is_empty() {
            let _ = self.tx.send(SearchOutcome {
                query,
                result: Ok(Vec::new()),
            });
            return;
        }

        let searcher = Arc::clone(&self.searcher);
        let latest = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        let delay = self.delay;

        self.inflight = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }

            let result = searcher.search(&query).await;

            // a newer input may have arrived while the lookup was in flight
            if latest.load(Ordering::SeqCst) != generation {
                debug!("Discarding superseded search result for '{}'", query);
                return;
            }
            let _ = tx.send(SearchOutcome { query, result });
        }));
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}
