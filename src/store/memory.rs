use crate::core::quote::Quote;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Append-only, insertion-ordered history of quotes kept for the process lifetime.
#[derive(Clone, Default)]
pub struct QuoteHistory {
    inner: Arc<Mutex<Vec<Quote>>>,
}

impl QuoteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its position in the history.
    pub async fn append(&self, quote: Quote) -> usize {
        let mut history = self.inner.lock().await;
        history.push(quote);
        let position = history.len() - 1;
        debug!(position, "History APPEND");
        position
    }

    /// Snapshot of every record in insertion order.
    pub async fn all(&self) -> Vec<Quote> {
        self.inner.lock().await.clone()
    }
}
