//! Serializes exported spans as OTLP JSON, one document per batch.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::SystemTime;

/// Builds `resourceSpans` documents under a fixed instrumentation scope.
pub struct SpanFormatter {
    resource: Resource,
    scope: &'static str,
}

impl SpanFormatter {
    pub const fn new(resource: Resource, scope: &'static str) -> Self {
        Self { resource, scope }
    }

    /// Wraps `batch` in a single resource/scope envelope.
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attributes: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(key, value)| json!({ "key": key.to_string(), "value": attribute_value(value) }))
            .collect();

        let spans: Vec<JsonValue> = batch.iter().map(format_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attributes },
                "scopeSpans": [{
                    "scope": { "name": self.scope },
                    "spans": spans,
                }],
            }],
        })
    }
}

fn format_span(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = status(&span.status);

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": events(&span.events),
        "links": links(&span.links),
        "status": { "code": code, "message": message },
    })
}

/// OTLP encodes nanosecond timestamps as decimal strings.
fn unix_nanos(at: SystemTime) -> String {
    at.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .to_string()
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn attributes(pairs: &[KeyValue]) -> Vec<JsonValue> {
    pairs
        .iter()
        .map(|kv| json!({ "key": kv.key.to_string(), "value": attribute_value(&kv.value) }))
        .collect()
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.to_string() }),
        Value::Array(_) => json!({ "stringValue": format!("{value:?}") }),
    }
}

fn events(list: &[Event]) -> Vec<JsonValue> {
    list.iter()
        .map(|event| {
            json!({
                "timeUnixNano": unix_nanos(event.timestamp),
                "name": event.name,
                "attributes": attributes(&event.attributes),
            })
        })
        .collect()
}

fn links(list: &[Link]) -> Vec<JsonValue> {
    list.iter()
        .map(|link| {
            json!({
                "traceId": format!("{:032x}", link.span_context.trace_id()),
                "spanId": format!("{:016x}", link.span_context.span_id()),
                "attributes": attributes(&link.attributes),
            })
        })
        .collect()
}

fn status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_envelope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "Navrail")]);
        let doc = SpanFormatter::new(resource, "Navrail").format_batch(&[]);

        let scope = &doc["resourceSpans"][0]["scopeSpans"][0];
        assert_eq!(scope["scope"]["name"], "Navrail");
        assert_eq!(scope["spans"], json!([]));

        let attrs = doc["resourceSpans"][0]["resource"]["attributes"].as_array().unwrap();
        assert!(attrs.iter().any(|a| a["key"] == "service.name"
            && a["value"]["stringValue"] == "Navrail"));
    }

    #[test]
    fn test_attribute_value_encoding() {
        assert_eq!(attribute_value(&Value::I64(7)), json!({ "intValue": "7" }));
        assert_eq!(attribute_value(&Value::Bool(true)), json!({ "boolValue": true }));
    }
}
