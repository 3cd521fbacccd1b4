//! Operation-log service (producer side)

use tokio::sync::mpsc;

use crate::db::repository::record::OperationEntry;

/// Channel capacity; beyond it entries are dropped, not awaited
const CHANNEL_CAPACITY: usize = 1024;

/// Cheap handle that enqueues operation entries for the background worker
#[derive(Clone)]
pub struct OpLogService {
    tx: mpsc::Sender<OperationEntry>,
    enabled: bool,
}

impl OpLogService {
    /// Create the service and the receiver half for the worker
    pub fn new(enabled: bool) -> (Self, mpsc::Receiver<OperationEntry>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (Self { tx, enabled }, rx)
    }

    /// Enqueue one entry; never blocks and never fails the caller
    pub fn log(&self, entry: OperationEntry) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.tx.try_send(entry) {
            tracing::warn!("Operation log entry dropped: {e}");
        }
    }
}
