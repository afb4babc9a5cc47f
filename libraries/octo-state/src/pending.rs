//! Bookkeeping for intents that are queued or still running.

use std::sync::Arc;
use tokio::sync::watch;

/// Counts outstanding work so callers can wait for a coordinator to settle.
#[derive(Clone)]
pub(crate) struct PendingWork {
    count: Arc<watch::Sender<usize>>,
}

impl PendingWork {
    pub(crate) fn new() -> Self {
        let (count, _) = watch::channel(0);
        Self {
            count: Arc::new(count),
        }
    }

    /// Register one unit of work; it ends when the ticket is dropped
    pub(crate) fn ticket(&self) -> Ticket {
        self.count.send_modify(|n| *n += 1);
        Ticket {
            count: Arc::clone(&self.count),
        }
    }

    pub(crate) async fn wait_idle(&self) {
        let mut rx = self.count.subscribe();
        // The sender lives in `self`, so this cannot fail
        let _ = rx.wait_for(|n| *n == 0).await;
    }
}

pub(crate) struct Ticket {
    count: Arc<watch::Sender<usize>>,
}

impl Drop for Ticket {
    fn drop(&mut self) {
        self.count.send_modify(|n| *n = n.saturating_sub(1));
    }
}
