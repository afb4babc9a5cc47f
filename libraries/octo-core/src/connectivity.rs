//! Network connectivity observation
//!
//! An observer is constructed once by the application and handed to whatever
//! needs it. There is no process-wide instance.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Network availability as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityStatus {
    /// Network usable
    #[default]
    Available,
    /// No network at all
    Unavailable,
    /// Network about to drop
    Losing,
    /// Network dropped
    Lost,
}

impl ConnectivityStatus {
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Reports the current network status and changes to it.
pub trait ConnectivityObserver: Send + Sync {
    /// Status right now
    fn current_status(&self) -> ConnectivityStatus;

    /// Receiver that is notified whenever the status changes
    fn observe(&self) -> watch::Receiver<ConnectivityStatus>;
}

/// Connectivity observer driven by explicit status updates.
///
/// Platform glue (or a test) pushes changes with [`WatchConnectivity::set_status`].
#[derive(Debug)]
pub struct WatchConnectivity {
    tx: watch::Sender<ConnectivityStatus>,
}

impl WatchConnectivity {
    pub fn new(initial: ConnectivityStatus) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Publish a new status; observers are only woken on an actual change
    pub fn set_status(&self, status: ConnectivityStatus) {
        self.tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }
}

impl Default for WatchConnectivity {
    fn default() -> Self {
        Self::new(ConnectivityStatus::Available)
    }
}

impl ConnectivityObserver for WatchConnectivity {
    fn current_status(&self) -> ConnectivityStatus {
        *self.tx.borrow()
    }

    fn observe(&self) -> watch::Receiver<ConnectivityStatus> {
        self.tx.subscribe()
    }
}
