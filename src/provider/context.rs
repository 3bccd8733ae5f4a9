//! Request context carried through Zellij's web request round trip.
//!
//! Zellij hands the `context` map given to `web_request` back untouched with
//! the matching `WebRequestResult` event. The plugin uses it to carry the
//! [`FetchTag`] that identifies the request, plus the tracing context of the
//! span that issued it so the response handling can be linked to it.

use crate::search::FetchTag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context map key that marks requests issued by this plugin.
const SOURCE_KEY: &str = "source";

/// Value of [`SOURCE_KEY`] for zpix requests.
const SOURCE_VALUE: &str = "zpix";

/// Context map key holding the JSON-encoded [`RequestContext`].
const PAYLOAD_KEY: &str = "request";

/// Distributed tracing context for linking a response span to its request.
///
/// Captures the current trace and span IDs from OpenTelemetry so the span
/// that handles the response can be parented to the span that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across the round trip.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled.
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

    /// Attaches this context as the remote parent of spans created while the
    /// returned guard is alive.
    ///
    /// Returns `None` if either ID fails to parse.
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

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }
}

/// Everything the plugin needs to route a web response back to its request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub tag: FetchTag,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_context: Option<TraceContext>,
}

impl RequestContext {
    /// Wraps `tag` with the trace context of the current span.
    #[must_use]
    pub fn capture(tag: FetchTag) -> Self {
        Self {
            tag,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Encodes the context for `web_request`.
    ///
    /// # Errors
    ///
    /// Returns [`ZpixError::Decode`](crate::ZpixError::Decode) if the payload
    /// cannot be serialized.
    pub fn to_map(&self) -> crate::Result<BTreeMap<String, String>> {
        let payload = serde_json::to_string(self)?;
        Ok(BTreeMap::from([
            (SOURCE_KEY.to_string(), SOURCE_VALUE.to_string()),
            (PAYLOAD_KEY.to_string(), payload),
        ]))
    }

    /// Decodes a context map returned with a `WebRequestResult`.
    ///
    /// Returns `None` for requests that were not issued by this plugin or whose
    /// payload does not decode.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        if map.get(SOURCE_KEY).map(String::as_str) != Some(SOURCE_VALUE) {
            return None;
        }

        let payload = map.get(PAYLOAD_KEY)?;
        match serde_json::from_str(payload) {
            Ok(context) => Some(context),
            Err(e) => {
                tracing::debug!(error = %e, "failed to decode request context");
                None
            }
        }
    }
}
