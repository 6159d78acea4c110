pub mod logging;
pub mod trace_context;

pub use logging::init_tracing;
pub use trace_context::{
    current_trace_headers, TracedClientExt, TracedRequest, TRACEPARENT_HEADER, TRACESTATE_HEADER,
};
