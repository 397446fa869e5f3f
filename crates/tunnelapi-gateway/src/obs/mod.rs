//! Observability: analytics event fields, log sinks, and request counters.
//!
//! Analytics events are the product of the API (legacy stats pipeline);
//! counters are operational and rendered by the `/metrics` handler.

pub mod fields;
pub mod metrics;
pub mod sink;

pub use fields::{request_log_fields, LogFields, LogValue};
pub use metrics::ApiMetrics;
pub use sink::{LogSink, MemorySink, TracingSink};
