//! Operation-Audit Logging
//!
//! Mutating API requests are captured by [`middleware::record_operations`]
//! and handed to [`OpLogService`] over an mpsc channel; a background
//! [`OpLogWorker`] owns the database writes. Login attempts are recorded
//! through the same service by the auth handlers. A full log channel drops
//! the entry with a warning; logging never fails a request.

pub mod middleware;
pub mod service;
pub mod worker;

pub use service::OpLogService;
pub use worker::OpLogWorker;
