//! Worker thread implementation for preference writes.
//!
//! Theme changes are persisted off the plugin thread so a slow or failing disk
//! never delays rendering. The storage backend is opened lazily on the first
//! message.

use crate::domain::error::{NavrailError, Result};
use crate::domain::ThemeMode;
use crate::infrastructure::paths;
use crate::storage::{self, JsonStorage, Storage};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Worker thread state for handling storage operations.
#[derive(Default)]
pub struct NavrailWorker {
    /// Storage backend, initialized lazily on first use.
    storage: Option<Box<dyn Storage>>,
}

impl NavrailWorker {
    /// Creates a worker backed by the default preference file.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be initialized.
    pub fn new() -> Result<Self> {
        let storage: Box<dyn Storage> = Box::new(JsonStorage::new(paths::preferences_path())?);
        Ok(Self::with_storage(storage))
    }

    /// Creates a worker over an explicit backend.
    #[must_use]
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    /// Returns the storage backend, opening the default one on first use.
    fn get_storage(&mut self) -> Result<&mut Box<dyn Storage>> {
        if self.storage.is_none() {
            self.storage = Self::new()?.storage;
        }
        self.storage
            .as_mut()
            .ok_or_else(|| NavrailError::Worker("Storage not initialized".to_string()))
    }

    /// Standardizes logging and error mapping for storage results.
    fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_persist_theme(&mut self, theme: ThemeMode) -> WorkerResponse {
        Self::handle_db_result(
            "persist theme",
            self.get_storage()
                .and_then(|storage| storage::save_theme(storage.as_mut(), theme)),
            |()| WorkerResponse::ThemePersisted { theme },
        )
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::PersistTheme { theme, .. } => self.handle_persist_theme(theme),
        }
    }

    /// Decodes a JSON payload, handles it and encodes the response.
    ///
    /// Returns `None` when the payload cannot be decoded or the response cannot
    /// be encoded; both are logged.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let message: WorkerMessage = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return None;
            }
        };

        let response = self.handle_message(message);

        serde_json::to_string(&response)
            .map_err(|e| tracing::debug!(error = %e, "failed to serialize worker response"))
            .ok()
    }
}
