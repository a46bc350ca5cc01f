//! AssessmentStore trait and in-memory implementation
//!
//! The store abstraction collapses the local/remote persistence split into a
//! single interface selected once at startup; the core never branches on
//! which backend is active. Writes are best-effort from the caller's point
//! of view: a failed save is surfaced as a warning, never a rollback.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::assessment::Assessment;
use crate::error::StoreError;

/// Durable storage for assessments
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Insert or replace an assessment
    async fn save(&self, assessment: &Assessment) -> Result<(), StoreError>;

    /// Load an assessment by id; `Ok(None)` when the id does not resolve
    async fn get(&self, id: &str) -> Result<Option<Assessment>, StoreError>;

    /// Load every stored assessment
    async fn get_all(&self) -> Result<Vec<Assessment>, StoreError>;

    /// Delete an assessment; false when it did not exist
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// In-memory store, for tests
///
/// `fail_saves` makes every subsequent save return an error, to exercise
/// the best-effort persistence path.
#[derive(Default)]
pub struct MemoryAssessmentStore {
    assessments: RwLock<HashMap<String, Assessment>>,
    failing: AtomicBool,
}

impl MemoryAssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated backend failure for saves
    pub fn fail_saves(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of stored assessments
    pub async fn count(&self) -> usize {
        self.assessments.read().await.len()
    }
}

#[async_trait]
impl AssessmentStore for MemoryAssessmentStore {
    async fn save(&self, assessment: &Assessment) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated save failure".to_string()));
        }
        self.assessments
            .write()
            .await
            .insert(assessment.id.clone(), assessment.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Assessment>, StoreError> {
        Ok(self.assessments.read().await.get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Assessment>, StoreError> {
        let mut all: Vec<_> = self.assessments.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.assessments.write().await.remove(id).is_some())
    }
}
