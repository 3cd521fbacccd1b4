//! Operation-log background worker
//!
//! Consumes entries from the mpsc channel and writes them to SQLite.
//! Exits when the channel closes.

use sqlx::SqlitePool;
use tokio::sync::mpsc;

use crate::db::repository::record::{self, OperationEntry};

pub struct OpLogWorker {
    pool: SqlitePool,
}

impl OpLogWorker {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 运行 worker（阻塞直到通道关闭）
    pub async fn run(self, mut rx: mpsc::Receiver<OperationEntry>) {
        tracing::info!("Operation log worker started");

        while let Some(entry) = rx.recv().await {
            if let Err(e) = record::insert_operation(&self.pool, entry).await {
                tracing::error!("Failed to write operation record: {e:?}");
            }
        }

        tracing::info!("Operation log channel closed, worker stopping");
    }
}
