//! Trace context propagation through web request context maps.
//!
//! Zellij answers a `web_request` with a separate `WebRequestResult` event,
//! so the span that dispatched a fetch is long gone when the response
//! arrives. The dispatching span's ids ride along in the request's context
//! map and are re-attached as the remote parent of the span that handles the
//! response.

use std::collections::BTreeMap;

/// Context map key holding the hex trace id.
pub const TRACE_ID_KEY: &str = "galleria.trace_id";

/// Context map key holding the hex parent span id.
pub const PARENT_SPAN_ID_KEY: &str = "galleria.parent_span_id";

/// Serialized OpenTelemetry span identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// 32-digit hex trace id.
    pub trace_id: String,

    /// 16-digit hex span id of the dispatching span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the ids of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// is not recorded.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Stores the ids in a request context map.
    pub fn write_to(&self, context: &mut BTreeMap<String, String>) {
        context.insert(TRACE_ID_KEY.to_string(), self.trace_id.clone());
        context.insert(PARENT_SPAN_ID_KEY.to_string(), self.parent_span_id.clone());
    }

    /// Reads ids previously stored with [`write_to`](Self::write_to).
    #[must_use]
    pub fn read_from(context: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            trace_id: context.get(TRACE_ID_KEY)?.clone(),
            parent_span_id: context.get(PARENT_SPAN_ID_KEY)?.clone(),
        })
    }

    /// Makes this context the remote parent for spans created while the
    /// returned guard is alive.
    ///
    /// Returns `None` if either id is not valid hex.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context =
            opentelemetry::Context::current().with_remote_span_context(span_context);
        Some(otel_context.attach())
    }
}
