//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main plugin
//! thread and the background worker thread that persists preferences. It also
//! implements distributed tracing context propagation across thread boundaries.

use crate::domain::ThemeMode;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is always the case when no OpenTelemetry layer is installed.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }
}

/// Macro to generate builder methods for `WorkerMessage` variants.
///
/// Generates convenience constructors that automatically attach the current
/// trace context to each message variant.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    persist_theme(PersistTheme { theme: ThemeMode }),
}

/// Messages sent from the main thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Write the theme mode to the preference store.
    ///
    /// Fire-and-forget: the plugin never waits for the response and its
    /// in-memory theme is authoritative regardless of the outcome.
    PersistTheme {
        theme: ThemeMode,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context carried by the message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::PersistTheme { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The theme mode was written to storage.
    ThemePersisted { theme: ThemeMode },

    /// An error occurred during the worker operation.
    Error {
        /// Human-readable error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_without_tracing_has_no_context() {
        let message = WorkerMessage::persist_theme(ThemeMode::Dark);
        assert_eq!(
            message,
            WorkerMessage::PersistTheme {
                theme: ThemeMode::Dark,
                trace_context: None,
            }
        );
        assert!(message.trace_context().is_none());
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&WorkerMessage::persist_theme(ThemeMode::Light)).unwrap();
        assert_eq!(json, r#"{"PersistTheme":{"theme":"light"}}"#);

        let response: WorkerResponse =
            serde_json::from_str(r#"{"ThemePersisted":{"theme":"dark"}}"#).unwrap();
        assert_eq!(response, WorkerResponse::ThemePersisted { theme: ThemeMode::Dark });
    }
}
