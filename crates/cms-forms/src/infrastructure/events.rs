//! Event publishers

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

use crate::domain::events::FormEvent;
use crate::ports::outbound::{EventPublisher, RepositoryError};

/// Writes each event as a structured log record
#[derive(Debug, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, events: Vec<FormEvent>) -> Result<(), RepositoryError> {
        for event in &events {
            info!(event_type = event.event_type(), form_id = %event.form_id(), "form event");
        }
        Ok(())
    }
}

/// Drops every event
#[derive(Debug, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _events: Vec<FormEvent>) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Keeps published events in memory until taken
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<FormEvent>>,
}

impl RecordingEventPublisher {
    /// Drain the recorded events
    pub fn take(&self) -> Vec<FormEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, events: Vec<FormEvent>) -> Result<(), RepositoryError> {
        self.events.lock().extend(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::EntityId;
    use chrono::Utc;

    #[tokio::test]
    async fn test_recording_publisher_drains() {
        let publisher = RecordingEventPublisher::default();
        let event = FormEvent::Deleted { form_id: EntityId::from_string("f1"), deleted_at: Utc::now() };
        publisher.publish(vec![event.clone()]).await.unwrap();

        assert_eq!(publisher.take(), vec![event]);
        assert!(publisher.take().is_empty());
    }

    #[tokio::test]
    async fn test_tracing_publisher_accepts_events() {
        let event = FormEvent::Created {
            form_id: EntityId::new(),
            name: "Contact".into(),
            created_at: Utc::now(),
        };
        assert!(TracingEventPublisher.publish(vec![event]).await.is_ok());
    }
}
