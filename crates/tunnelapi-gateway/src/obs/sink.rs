//! Structured log sinks for analytics events.

use std::sync::Mutex;

use super::fields::LogFields;

/// Tracing target carrying analytics events.
pub const API_EVENT_TARGET: &str = "api_event";

/// Destination for analytics events. Implementations must not block.
pub trait LogSink: Send + Sync {
    fn emit(&self, fields: LogFields);
}

/// Writes each event as one `tracing` record with the field set as JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, fields: LogFields) {
        match serde_json::to_string(&fields) {
            Ok(json) => tracing::info!(
                target: API_EVENT_TARGET,
                event = fields.event_name().unwrap_or_default(),
                fields = %json,
                "API event"
            ),
            Err(e) => tracing::warn!(error = %e, "API event encode failed"),
        }
    }
}

/// Keeps events in memory (tests, local debugging).
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogFields>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogFields> {
        self.events.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn events_named(&self, event_name: &str) -> Vec<LogFields> {
        self.events()
            .into_iter()
            .filter(|f| f.event_name() == Some(event_name))
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut g) = self.events.lock() {
            g.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn emit(&self, fields: LogFields) {
        // Poisoned mutex means a panicking test thread; drop the event.
        if let Ok(mut g) = self.events.lock() {
            g.push(fields);
        }
    }
}
