//! Trace header propagation for outgoing invoicing API calls.
//!
//! Header formats follow https://www.w3.org/TR/trace-context/.

use opentelemetry::trace::{SpanContext, TraceContextExt};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const TRACESTATE_HEADER: &str = "tracestate";

/// Trace headers for the current span. Empty unless an OpenTelemetry layer is
/// installed and the span is sampled into it.
pub fn current_trace_headers() -> HeaderMap {
    let context = Span::current().context();
    trace_headers(context.span().span_context())
}

fn trace_headers(span_context: &SpanContext) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if !span_context.is_valid() {
        return headers;
    }

    let traceparent = format!(
        "00-{}-{}-{:02x}",
        span_context.trace_id(),
        span_context.span_id(),
        span_context.trace_flags().to_u8()
    );
    let tracestate = span_context.trace_state().header();

    for (name, value) in [
        (TRACEPARENT_HEADER, traceparent),
        (TRACESTATE_HEADER, tracestate),
    ] {
        if value.is_empty() {
            continue;
        }
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(name, value);
        }
    }
    headers
}

/// Request builder that attaches the trace headers when sent.
pub struct TracedRequest(reqwest::RequestBuilder);

impl TracedRequest {
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Self {
        Self(self.0.json(body))
    }

    pub async fn send(self) -> reqwest::Result<reqwest::Response> {
        self.0.headers(current_trace_headers()).send().await
    }
}

pub trait TracedClientExt {
    fn traced(&self, method: reqwest::Method, url: &str) -> TracedRequest;
}

impl TracedClientExt for reqwest::Client {
    fn traced(&self, method: reqwest::Method, url: &str) -> TracedRequest {
        TracedRequest(self.request(method, url))
    }
}
