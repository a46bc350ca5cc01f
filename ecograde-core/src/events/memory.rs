//! In-memory EventBus implementation

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};

use super::bus::{EventBus, EventSeq};
use super::types::AssessmentEvent;

/// In-memory implementation of EventBus
///
/// Stores events in a Vec for per-assessment retrieval and uses a broadcast
/// channel for live subscribers. Thread-safe via RwLock and atomics.
pub struct MemoryEventBus {
    events: RwLock<Vec<(EventSeq, AssessmentEvent)>>,
    next_seq: AtomicU64,
    tx: broadcast::Sender<(EventSeq, AssessmentEvent)>,
}

impl MemoryEventBus {
    /// Create a new MemoryEventBus with the given broadcast channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            events: RwLock::new(Vec::new()),
            next_seq: AtomicU64::new(0),
            tx,
        }
    }
}

#[async_trait]
impl EventBus for MemoryEventBus {
    async fn publish(&self, event: AssessmentEvent) -> EventSeq {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);

        self.events.write().await.push((seq, event.clone()));

        // Broadcast to live subscribers (ignore if no receivers)
        let _ = self.tx.send((seq, event));

        seq
    }

    fn subscribe(&self) -> broadcast::Receiver<(EventSeq, AssessmentEvent)> {
        self.tx.subscribe()
    }

    async fn events_for(&self, assessment_id: &str) -> Vec<(EventSeq, AssessmentEvent)> {
        self.events
            .read()
            .await
            .iter()
            .filter(|(_, event)| event.assessment_id() == assessment_id)
            .cloned()
            .collect()
    }

    fn current_seq(&self) -> EventSeq {
        self.next_seq.load(Ordering::SeqCst)
    }
}
