//! EventBus trait definition
//!
//! The bus decouples the assessment core from whatever UI consumes its
//! callbacks; subscribers get a live stream, and per-assessment history is
//! retrievable for assertions and late joiners.

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::types::AssessmentEvent;

/// Sequence number for events (monotonically increasing)
pub type EventSeq = u64;

/// Event bus for publishing and subscribing to assessment events
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publish an event, returns its sequence number
    async fn publish(&self, event: AssessmentEvent) -> EventSeq;

    /// Subscribe to all events from now (live stream)
    fn subscribe(&self) -> broadcast::Receiver<(EventSeq, AssessmentEvent)>;

    /// Get all events recorded for one assessment
    async fn events_for(&self, assessment_id: &str) -> Vec<(EventSeq, AssessmentEvent)>;

    /// Current sequence number (high water mark)
    fn current_seq(&self) -> EventSeq;
}
