//! Assessment lifecycle management
//!
//! `AssessmentManager` wires the referential provider, the store and the
//! event bus together and hands out live [`AssessmentSession`]s. It is the
//! single entry point for creating, resuming, listing and deleting
//! assessments.

use std::sync::Arc;

use tracing::info;

use crate::assessment::session::AssessmentSession;
use crate::assessment::types::Assessment;
use crate::error::{EcogradeError, ReferentialError};
use crate::events::{AssessmentEvent, EventBus};
use crate::referential::{EvaluationLevel, Referential, ReferentialProvider, ReferentialSummary};
use crate::store::AssessmentStore;

pub struct AssessmentManager {
    provider: Arc<dyn ReferentialProvider>,
    store: Arc<dyn AssessmentStore>,
    event_bus: Arc<dyn EventBus>,
}

impl AssessmentManager {
    pub fn new(
        provider: Arc<dyn ReferentialProvider>,
        store: Arc<dyn AssessmentStore>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            provider,
            store,
            event_bus,
        }
    }

    /// Referentials available for assessment
    pub async fn list_referentials(&self) -> Result<Vec<ReferentialSummary>, EcogradeError> {
        Ok(self.provider.list_referentials().await?)
    }

    /// Load a referential by id
    pub async fn get_referential(&self, id: &str) -> Result<Referential, EcogradeError> {
        self.provider
            .get_referential(id)
            .await?
            .ok_or_else(|| ReferentialError::NotFound(id.to_string()).into())
    }

    /// Create a new assessment and open a session on it
    ///
    /// The session starts at the first applicable criterion. Publishes
    /// `AssessmentCreated` and saves the fresh assessment.
    pub async fn create_assessment(
        &self,
        referential_id: &str,
        project_name: &str,
        project_description: Option<String>,
        level: EvaluationLevel,
    ) -> Result<AssessmentSession, EcogradeError> {
        let referential = Arc::new(self.get_referential(referential_id).await?);
        let assessment = Assessment::new(&referential, project_name, project_description, level);
        info!(
            assessment_id = %assessment.id,
            referential_id,
            level = level.as_str(),
            "assessment created"
        );

        self.event_bus
            .publish(AssessmentEvent::AssessmentCreated {
                assessment_id: assessment.id.clone(),
                project_name: project_name.to_string(),
            })
            .await;

        let mut session = AssessmentSession::new(
            assessment,
            referential,
            Arc::clone(&self.store),
            Arc::clone(&self.event_bus),
        );
        session.start();
        session.persist().await;
        Ok(session)
    }

    /// Reopen a stored assessment
    ///
    /// `Ok(None)` when the id is unknown. Loaded responses are normalized
    /// against the current referential before the session starts, and the
    /// saved navigation position is resumed when it is still valid.
    pub async fn resume_assessment(
        &self,
        id: &str,
    ) -> Result<Option<AssessmentSession>, EcogradeError> {
        let Some(mut assessment) = self.store.get(id).await? else {
            return Ok(None);
        };
        let referential = Arc::new(self.get_referential(&assessment.referential_id).await?);
        assessment.normalize_responses(&referential);

        let mut session = AssessmentSession::new(
            assessment,
            referential,
            Arc::clone(&self.store),
            Arc::clone(&self.event_bus),
        );
        session.start();
        Ok(Some(session))
    }

    /// All stored assessments, oldest first
    pub async fn list_assessments(&self) -> Result<Vec<Assessment>, EcogradeError> {
        Ok(self.store.get_all().await?)
    }

    /// Delete an assessment; false when it did not exist
    pub async fn delete_assessment(&self, id: &str) -> Result<bool, EcogradeError> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            info!(assessment_id = id, "assessment deleted");
            self.event_bus
                .publish(AssessmentEvent::AssessmentDeleted {
                    assessment_id: id.to_string(),
                })
                .await;
        }
        Ok(deleted)
    }
}
