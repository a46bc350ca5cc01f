//! File-backed assessment storage

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;

use ecograde_core::{Assessment, AssessmentStore, StoreError};

/// Assessments file name
const ASSESSMENTS_FILE: &str = "assessments.json";

/// File-backed storage for assessments
///
/// The whole collection lives in one JSON file rewritten on every change;
/// assessment data stays small enough that this beats a real database for
/// a single-user tool. Reads are served from memory after the initial load.
pub struct LocalAssessmentStore {
    assessments: Arc<RwLock<HashMap<String, Assessment>>>,
    file_path: PathBuf,
}

impl LocalAssessmentStore {
    /// Load assessments from file or create an empty store
    pub async fn load(data_dir: &Path) -> Result<Self, StoreError> {
        let file_path = data_dir.join(ASSESSMENTS_FILE);

        let assessments = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .await
                .map_err(|e| StoreError::Io(format!("failed to read assessments: {}", e)))?;
            // A corrupt file starts over empty rather than blocking the tool
            let list: Vec<Assessment> = serde_json::from_str(&content).unwrap_or_default();
            list.into_iter().map(|a| (a.id.clone(), a)).collect()
        } else {
            HashMap::new()
        };

        Ok(Self {
            assessments: Arc::new(RwLock::new(assessments)),
            file_path,
        })
    }

    /// Number of stored assessments
    pub async fn count(&self) -> usize {
        self.assessments.read().await.len()
    }

    /// Persist the collection to file
    async fn persist(&self) -> Result<(), StoreError> {
        let assessments = self.assessments.read().await;
        let mut list: Vec<_> = assessments.values().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        // Ensure parent directory exists
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(format!("failed to create data dir: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(&list)
            .map_err(|e| StoreError::Serialize(format!("failed to serialize assessments: {}", e)))?;

        fs::write(&self.file_path, content)
            .await
            .map_err(|e| StoreError::Io(format!("failed to write assessments: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl AssessmentStore for LocalAssessmentStore {
    async fn save(&self, assessment: &Assessment) -> Result<(), StoreError> {
        {
            let mut assessments = self.assessments.write().await;
            assessments.insert(assessment.id.clone(), assessment.clone());
        }
        self.persist().await
    }

    async fn get(&self, id: &str) -> Result<Option<Assessment>, StoreError> {
        Ok(self.assessments.read().await.get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Assessment>, StoreError> {
        let assessments = self.assessments.read().await;
        let mut all: Vec<_> = assessments.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let removed = {
            let mut assessments = self.assessments.write().await;
            assessments.remove(id).is_some()
        };
        if removed {
            self.persist().await?;
        }
        Ok(removed)
    }
}
