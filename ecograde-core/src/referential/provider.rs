//! ReferentialProvider trait and in-memory implementation
//!
//! The provider abstraction injects the criteria taxonomy into the core
//! instead of reaching for a process-wide lookup. Referentials are treated
//! as immutable for the lifetime of an assessment.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::ReferentialError;

use super::types::{Referential, ReferentialSummary};

/// Source of criteria referentials
#[async_trait]
pub trait ReferentialProvider: Send + Sync {
    /// List available referentials
    async fn list_referentials(&self) -> Result<Vec<ReferentialSummary>, ReferentialError>;

    /// Load a referential by id; `Ok(None)` when the id does not resolve
    async fn get_referential(&self, id: &str) -> Result<Option<Referential>, ReferentialError>;
}

/// In-memory provider, for tests and embedded referential data
#[derive(Default)]
pub struct MemoryReferentialProvider {
    referentials: HashMap<String, Referential>,
}

impl MemoryReferentialProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a provider holding the given referentials
    pub fn with(referentials: Vec<Referential>) -> Self {
        Self {
            referentials: referentials
                .into_iter()
                .map(|r| (r.id.clone(), r))
                .collect(),
        }
    }

    pub fn insert(&mut self, referential: Referential) {
        self.referentials.insert(referential.id.clone(), referential);
    }
}

#[async_trait]
impl ReferentialProvider for MemoryReferentialProvider {
    async fn list_referentials(&self) -> Result<Vec<ReferentialSummary>, ReferentialError> {
        let mut summaries: Vec<_> = self.referentials.values().map(|r| r.summary()).collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(summaries)
    }

    async fn get_referential(&self, id: &str) -> Result<Option<Referential>, ReferentialError> {
        Ok(self.referentials.get(id).cloned())
    }
}
