//! Destinations for runner lifecycle events.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

/// Receives the lifecycle events a pipeline run reports.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Records one event. Implementations must not panic.
    async fn emit(&self, event_type: &str, data: Option<Value>);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event_type: &str, _data: Option<Value>) {}
}

/// Forwards events to `tracing` at DEBUG under the `ciflow::events` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventSink;

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event_type: &str, data: Option<Value>) {
        match data {
            Some(data) => debug!(target: "ciflow::events", event = event_type, %data, "Lifecycle event"),
            None => debug!(target: "ciflow::events", event = event_type, "Lifecycle event"),
        }
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    recorded: Mutex<Vec<(String, Option<Value>)>>,
}

impl CollectingEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Event names, in emission order.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.recorded.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    /// Events whose name is exactly `event_type`.
    #[must_use]
    pub fn events_of_type(&self, event_type: &str) -> Vec<(String, Option<Value>)> {
        self.recorded
            .lock()
            .iter()
            .filter(|(name, _)| name == event_type)
            .cloned()
            .collect()
    }

    /// True when nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recorded.lock().is_empty()
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event_type: &str, data: Option<Value>) {
        self.recorded.lock().push((event_type.to_string(), data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_collecting_sink_keeps_order_and_payload() {
        let sink = CollectingEventSink::new();
        assert!(sink.is_empty());

        sink.emit("stage.started", None).await;
        sink.emit("stage.failed", Some(json!({"stage": "generate", "exit_code": 1}))).await;
        sink.emit("stage.started", None).await;

        assert_eq!(
            sink.event_types(),
            vec!["stage.started", "stage.failed", "stage.started"]
        );
        let failed = sink.events_of_type("stage.failed");
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].1, Some(json!({"stage": "generate", "exit_code": 1})));
        assert_eq!(sink.events_of_type("stage.").len(), 0);
    }

    #[tokio::test]
    async fn test_logging_and_noop_sinks_accept_any_event() {
        LoggingEventSink.emit("pipeline.started", Some(json!({"pipeline": "p"}))).await;
        LoggingEventSink.emit("pipeline.completed", None).await;
        NoOpEventSink.emit("stage.skipped", None).await;
    }
}
