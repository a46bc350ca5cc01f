//! CLI application context

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use ecograde_core::{
    AssessmentManager, AssessmentSession, AssessmentStore, EvaluationLevel, MemoryEventBus,
    ResponseStatus,
};
use ecograde_store::{FileReferentialProvider, LocalAssessmentStore, RemoteAssessmentStore};

/// Wired-up manager plus the paths it was built from
pub struct AppContext {
    pub manager: AssessmentManager,
    pub data_dir: PathBuf,
}

impl AppContext {
    /// Build the manager from CLI-level options
    ///
    /// Referentials always come from `<data_dir>/referentials`; assessments
    /// go to the remote API when `remote_url` is set, to a local JSON file
    /// otherwise.
    pub async fn build(
        data_dir: Option<PathBuf>,
        remote_url: Option<String>,
        token: Option<String>,
    ) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .context("could not determine data directory")?
                .join("ecograde"),
        };
        debug!(data_dir = %data_dir.display(), "using data directory");

        let provider = Arc::new(FileReferentialProvider::new(data_dir.join("referentials")));

        let store: Arc<dyn AssessmentStore> = match remote_url {
            Some(url) => Arc::new(RemoteAssessmentStore::new(url, token)?),
            None => Arc::new(LocalAssessmentStore::load(&data_dir).await?),
        };

        let manager = AssessmentManager::new(provider, store, Arc::new(MemoryEventBus::new(256)));

        Ok(Self { manager, data_dir })
    }

    /// Resume an assessment or fail with a user-facing message
    pub async fn open_session(&self, assessment_id: &str) -> Result<AssessmentSession> {
        self.manager
            .resume_assessment(assessment_id)
            .await?
            .with_context(|| format!("no assessment with id {}", assessment_id))
    }
}

/// clap value parser for evaluation levels
pub fn parse_level(s: &str) -> Result<EvaluationLevel, String> {
    EvaluationLevel::parse(s)
        .ok_or_else(|| format!("unknown level '{}' (essential, recommended, advanced)", s))
}

/// clap value parser for response statuses
pub fn parse_status(s: &str) -> Result<ResponseStatus, String> {
    ResponseStatus::parse(s).ok_or_else(|| {
        format!(
            "unknown status '{}' (pending, compliant, non-compliant, not-applicable)",
            s
        )
    })
}
