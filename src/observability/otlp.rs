//! OTLP JSON document model for file export.
//!
//! Span batches are mapped onto serde structs mirroring the OpenTelemetry
//! Protocol JSON encoding, so each exported line can be fed to any OTLP
//! collector or viewer as-is.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Instrumentation scope name written into every batch.
pub const SCOPE_NAME: &str = "Galleria";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTraceRequest {
    pub resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpans {
    pub resource: OtlpResource,
    pub scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
pub struct OtlpResource {
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
pub struct Scope {
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ScopeSpans {
    pub scope: Scope,
    pub spans: Vec<OtlpSpan>,
}

/// One span in OTLP JSON form.
///
/// IDs are lowercase hex, timestamps are nanoseconds since the Unix epoch
/// encoded as strings. An absent parent is an empty string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpSpan {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: String,
    pub name: String,
    pub kind: u8,
    pub start_time_unix_nano: String,
    pub end_time_unix_nano: String,
    pub attributes: Vec<Attribute>,
    pub events: Vec<OtlpEvent>,
    pub links: Vec<OtlpLink>,
    pub status: OtlpStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpEvent {
    pub time_unix_nano: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpLink {
    pub trace_id: String,
    pub span_id: String,
    pub attributes: Vec<Attribute>,
}

/// Status code is 0 (unset), 1 (ok) or 2 (error).
#[derive(Debug, Serialize)]
pub struct OtlpStatus {
    pub code: u8,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Attribute {
    pub key: String,
    pub value: AnyValue,
}

/// Attribute value, serialized as `{"<kind>Value": ...}`.
///
/// Integers are strings per the OTLP JSON mapping. Arrays have no direct
/// counterpart here and fall back to their debug rendering.
#[derive(Debug, Serialize, PartialEq)]
pub enum AnyValue {
    #[serde(rename = "boolValue")]
    Bool(bool),
    #[serde(rename = "intValue")]
    Int(String),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "stringValue")]
    String(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::I64(i) => Self::Int(i.to_string()),
            Value::F64(f) => Self::Double(*f),
            Value::String(s) => Self::String(s.to_string()),
            Value::Array(_) => Self::String(format!("{value:?}")),
        }
    }
}

impl From<&KeyValue> for Attribute {
    fn from(kv: &KeyValue) -> Self {
        Self {
            key: kv.key.to_string(),
            value: AnyValue::from(&kv.value),
        }
    }
}

/// Builds OTLP documents from span batches for a fixed resource.
pub struct OtlpFormatter {
    resource: Resource,
}

impl OtlpFormatter {
    pub const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    pub fn format_batch(&self, batch: &[SpanData]) -> ExportTraceRequest {
        let attributes = self
            .resource
            .iter()
            .map(|(k, v)| Attribute {
                key: k.to_string(),
                value: AnyValue::from(v),
            })
            .collect();

        ExportTraceRequest {
            resource_spans: vec![ResourceSpans {
                resource: OtlpResource { attributes },
                scope_spans: vec![ScopeSpans {
                    scope: Scope { name: SCOPE_NAME },
                    spans: batch.iter().map(format_span).collect(),
                }],
            }],
        }
    }
}

impl std::fmt::Debug for OtlpFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpFormatter").finish_non_exhaustive()
    }
}

fn format_span(span: &SpanData) -> OtlpSpan {
    let parent_span_id = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    OtlpSpan {
        trace_id: format!("{:032x}", span.span_context.trace_id()),
        span_id: format!("{:016x}", span.span_context.span_id()),
        parent_span_id,
        name: span.name.to_string(),
        kind: span_kind_code(&span.span_kind),
        start_time_unix_nano: unix_nanos(span.start_time),
        end_time_unix_nano: unix_nanos(span.end_time),
        attributes: span.attributes.iter().map(Attribute::from).collect(),
        events: format_events(&span.events),
        links: format_links(&span.links),
        status: status(&span.status),
    }
}

const fn span_kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}

fn format_events(events: &[Event]) -> Vec<OtlpEvent> {
    events
        .iter()
        .map(|event| OtlpEvent {
            time_unix_nano: unix_nanos(event.timestamp),
            name: event.name.to_string(),
            attributes: event.attributes.iter().map(Attribute::from).collect(),
        })
        .collect()
}

fn format_links(links: &[Link]) -> Vec<OtlpLink> {
    links
        .iter()
        .map(|link| OtlpLink {
            trace_id: format!("{:032x}", link.span_context.trace_id()),
            span_id: format!("{:016x}", link.span_context.span_id()),
            attributes: link.attributes.iter().map(Attribute::from).collect(),
        })
        .collect()
}

fn status(status: &Status) -> OtlpStatus {
    match status {
        Status::Unset => OtlpStatus {
            code: 0,
            message: String::new(),
        },
        Status::Ok => OtlpStatus {
            code: 1,
            message: String::new(),
        },
        Status::Error { description } => OtlpStatus {
            code: 2,
            message: description.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attribute_values_use_otlp_tags() {
        let attrs: Vec<Attribute> = [
            KeyValue::new("galleria.page", 3_i64),
            KeyValue::new("galleria.query", "red fox"),
            KeyValue::new("galleria.stale", true),
        ]
        .iter()
        .map(Attribute::from)
        .collect();

        assert_eq!(
            serde_json::to_value(&attrs).unwrap(),
            json!([
                {"key": "galleria.page", "value": {"intValue": "3"}},
                {"key": "galleria.query", "value": {"stringValue": "red fox"}},
                {"key": "galleria.stale", "value": {"boolValue": true}},
            ])
        );
    }

    #[test]
    fn empty_batch_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "Galleria")]);
        let formatter = OtlpFormatter::new(resource);

        let doc = serde_json::to_value(formatter.format_batch(&[])).unwrap();
        let resource_spans = &doc["resourceSpans"][0];

        let attrs = resource_spans["resource"]["attributes"].as_array().unwrap();
        assert!(attrs.contains(&json!({
            "key": "service.name",
            "value": {"stringValue": "Galleria"}
        })));
        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], "Galleria");
        assert_eq!(resource_spans["scopeSpans"][0]["spans"], json!([]));
    }

    #[test]
    fn error_status_keeps_description() {
        let s = status(&Status::error("HTTP 500"));
        assert_eq!(s.code, 2);
        assert_eq!(s.message, "HTTP 500");
        assert_eq!(status(&Status::Ok).code, 1);
    }
}
