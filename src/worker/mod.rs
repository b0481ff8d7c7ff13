//! Background worker thread for asynchronous preference writes.
//!
//! The plugin shim registers [`NavrailWorker`] with Zellij's worker API and
//! forwards JSON payloads to [`NavrailWorker::handle_payload`].
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::NavrailWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
