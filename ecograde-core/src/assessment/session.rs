//! Active assessment session
//!
//! An `AssessmentSession` owns one in-progress assessment together with its
//! referential, cursor, store and event bus. Every mutation follows the same
//! order: change in-memory state, publish the event, then persist. Persistence
//! is best-effort: a failed save logs a warning and emits `SaveFailed`, it
//! never rolls back state or fails the user action.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::assessment::improvements::{Improvement, generate_improvements};
use crate::assessment::score::{AssessmentScore, compute_score};
use crate::assessment::types::{Assessment, CriterionResponse, ResponseStatus};
use crate::events::{AssessmentEvent, EventBus};
use crate::navigation::{NavigationCursor, Position, Step};
use crate::referential::{Criterion, Referential, ThemedCriteria};
use crate::store::AssessmentStore;

pub struct AssessmentSession {
    assessment: Assessment,
    referential: Arc<Referential>,
    cursor: NavigationCursor,
    store: Arc<dyn AssessmentStore>,
    event_bus: Arc<dyn EventBus>,
}

impl std::fmt::Debug for AssessmentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentSession")
            .field("assessment", &self.assessment)
            .field("referential", &self.referential)
            .finish_non_exhaustive()
    }
}

impl AssessmentSession {
    /// Wrap an assessment in a live session
    ///
    /// The cursor starts uninitialized; call [`start`](Self::start) to resolve
    /// the initial position from the assessment's saved state.
    pub fn new(
        assessment: Assessment,
        referential: Arc<Referential>,
        store: Arc<dyn AssessmentStore>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        let cursor = NavigationCursor::new(ThemedCriteria::build(&referential, assessment.level));
        Self {
            assessment,
            referential,
            cursor,
            store,
            event_bus,
        }
    }

    /// Resolve the starting position, resuming a saved one when still valid
    ///
    /// One-shot per session; a second call returns the current position
    /// without moving, so restoring saved state can never undo navigation
    /// that happened in the meantime.
    pub fn start(&mut self) -> Option<Position> {
        self.cursor.initialize(
            self.assessment.current_theme.as_deref(),
            self.assessment.current_index,
        )
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    pub fn referential(&self) -> &Referential {
        &self.referential
    }

    /// The level-filtered questionnaire this session walks
    pub fn questionnaire(&self) -> &ThemedCriteria {
        self.cursor.groups()
    }

    pub fn position(&self) -> Option<Position> {
        self.cursor.position()
    }

    /// Criterion under the cursor
    pub fn current_criterion(&self) -> Option<&Criterion> {
        self.cursor.current()
    }

    /// Record an answer for a criterion
    ///
    /// Returns false (and changes nothing) when the criterion is not part of
    /// the referential, e.g. a stale id from an outdated client. On success
    /// the score snapshot is refreshed, `ResponseUpdated` is published and
    /// the assessment is saved.
    pub async fn update_response(
        &mut self,
        criterion_id: &str,
        status: ResponseStatus,
        comment: Option<String>,
    ) -> bool {
        if self.referential.criterion(criterion_id).is_none() {
            warn!(criterion_id, "ignoring response for unknown criterion");
            return false;
        }

        let response = CriterionResponse {
            criterion_id: criterion_id.to_string(),
            status,
            comment,
        };
        if !self.assessment.set_response(response.clone()) {
            warn!(criterion_id, "no response slot for criterion");
            return false;
        }

        self.assessment.score = Some(compute_score(&self.assessment, &self.referential));
        debug!(
            assessment_id = %self.assessment.id,
            criterion_id,
            status = status.as_str(),
            "response updated"
        );

        self.event_bus
            .publish(AssessmentEvent::ResponseUpdated {
                assessment_id: self.assessment.id.clone(),
                response,
            })
            .await;
        self.persist().await;
        true
    }

    /// Advance to the next criterion
    ///
    /// A successful move publishes exactly one `ProgressUpdated` and saves.
    /// Stepping past the end completes the assessment instead of moving.
    pub async fn next(&mut self) -> Step {
        let step = self.cursor.next();
        match &step {
            Step::Moved(position) => self.record_move(position.clone()).await,
            Step::Completed => self.complete().await,
            Step::AtStart => {}
        }
        step
    }

    /// Step back to the previous criterion
    ///
    /// At the very first criterion this is a no-op: no event, no save.
    pub async fn previous(&mut self) -> Step {
        let step = self.cursor.previous();
        if let Step::Moved(position) = &step {
            self.record_move(position.clone()).await;
        }
        step
    }

    /// Jump directly to a criterion in the filtered set
    ///
    /// Selecting the criterion already under the cursor is a no-op: the
    /// position is returned but nothing is published or saved.
    pub async fn select_criterion(&mut self, criterion_id: &str) -> Option<Position> {
        let before = self.cursor.position();
        let position = self.cursor.select_criterion(criterion_id)?;
        if before.as_ref() != Some(&position) {
            self.record_move(position.clone()).await;
        }
        Some(position)
    }

    /// Mark the assessment finished
    ///
    /// Idempotent: `Completed` is published only on the first transition.
    pub async fn complete(&mut self) {
        if self.assessment.completed {
            return;
        }
        self.assessment.mark_completed();
        self.assessment.score = Some(compute_score(&self.assessment, &self.referential));

        self.event_bus
            .publish(AssessmentEvent::Completed {
                assessment_id: self.assessment.id.clone(),
            })
            .await;
        self.persist().await;
    }

    /// Compute the score from current responses
    pub fn score(&self) -> AssessmentScore {
        compute_score(&self.assessment, &self.referential)
    }

    /// Improvement actions for non-compliant criteria, highest priority first
    pub fn improvements(&self) -> Vec<Improvement> {
        generate_improvements(&self.assessment, &self.referential)
    }

    /// Answered and total response counts
    pub fn progress(&self) -> (usize, usize) {
        (
            self.assessment.answered_count(),
            self.assessment.responses.len(),
        )
    }

    async fn record_move(&mut self, position: Position) {
        self.assessment
            .record_position(position.theme.clone(), position.index);
        self.event_bus
            .publish(AssessmentEvent::ProgressUpdated {
                assessment_id: self.assessment.id.clone(),
                theme: position.theme,
                index: position.index,
            })
            .await;
        self.persist().await;
    }

    /// Best-effort save of the current assessment state
    pub async fn persist(&self) {
        if let Err(error) = self.store.save(&self.assessment).await {
            warn!(
                assessment_id = %self.assessment.id,
                %error,
                "failed to save assessment, keeping in-memory state"
            );
            self.event_bus
                .publish(AssessmentEvent::SaveFailed {
                    assessment_id: self.assessment.id.clone(),
                    message: error.to_string(),
                })
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemoryEventBus;
    use crate::referential::test_fixtures::referential_with;
    use crate::referential::EvaluationLevel;
    use crate::store::MemoryAssessmentStore;

    struct Harness {
        session: AssessmentSession,
        store: Arc<MemoryAssessmentStore>,
        bus: Arc<MemoryEventBus>,
    }

    /// Two themes at essential depth: strategy has c1, c2; frontend has c3
    fn harness() -> Harness {
        let referential = Arc::new(referential_with(vec![
            ("c1".to_string(), "strategy".to_string(), EvaluationLevel::Essential),
            ("c2".to_string(), "strategy".to_string(), EvaluationLevel::Essential),
            ("c3".to_string(), "frontend".to_string(), EvaluationLevel::Essential),
        ]));
        let store = Arc::new(MemoryAssessmentStore::new());
        let bus = Arc::new(MemoryEventBus::new(100));
        let assessment = Assessment::new(&referential, "Site", None, EvaluationLevel::Essential);
        let session = AssessmentSession::new(
            assessment,
            referential,
            Arc::clone(&store) as Arc<dyn AssessmentStore>,
            Arc::clone(&bus) as Arc<dyn EventBus>,
        );
        Harness { session, store, bus }
    }

    async fn events_of_kind(bus: &MemoryEventBus, id: &str, tag: &str) -> usize {
        bus.events_for(id)
            .await
            .iter()
            .filter(|(_, event)| {
                serde_json::to_value(event).unwrap()["type"] == tag
            })
            .count()
    }

    // ==================== Navigation Tests ====================

    #[tokio::test]
    async fn next_publishes_exactly_one_progress_event_per_move() {
        let mut h = harness();
        h.session.start();

        h.session.next().await;
        let id = h.session.assessment().id.clone();
        assert_eq!(events_of_kind(&h.bus, &id, "progress_updated").await, 1);

        h.session.next().await;
        assert_eq!(events_of_kind(&h.bus, &id, "progress_updated").await, 2);
    }

    #[tokio::test]
    async fn previous_at_start_emits_nothing_and_does_not_save() {
        let mut h = harness();
        h.session.start();
        let id = h.session.assessment().id.clone();

        assert_eq!(h.session.previous().await, Step::AtStart);
        assert_eq!(events_of_kind(&h.bus, &id, "progress_updated").await, 0);
        assert_eq!(h.store.count().await, 0);
    }

    #[tokio::test]
    async fn moves_persist_the_saved_position() {
        let mut h = harness();
        h.session.start();
        h.session.next().await;
        h.session.next().await;

        let id = h.session.assessment().id.clone();
        let saved = h.store.get(&id).await.unwrap().unwrap();
        assert_eq!(saved.current_theme.as_deref(), Some("frontend"));
        assert_eq!(saved.current_index, Some(0));
    }

    #[tokio::test]
    async fn next_past_end_completes_instead_of_moving() {
        let mut h = harness();
        h.session.start();
        h.session.next().await;
        h.session.next().await;

        assert_eq!(h.session.next().await, Step::Completed);
        assert!(h.session.assessment().completed);
        // Position kept at the last criterion
        assert_eq!(h.session.current_criterion().unwrap().id, "c3");
    }

    #[tokio::test]
    async fn select_criterion_jumps_and_records() {
        let mut h = harness();
        h.session.start();

        let position = h.session.select_criterion("c3").await.unwrap();
        assert_eq!(position.theme, "frontend");
        assert_eq!(h.session.assessment().current_theme.as_deref(), Some("frontend"));

        assert!(h.session.select_criterion("ghost").await.is_none());
    }

    #[tokio::test]
    async fn selecting_current_criterion_emits_nothing_and_does_not_save() {
        let mut h = harness();
        h.session.start();
        let id = h.session.assessment().id.clone();

        let current = h.session.current_criterion().unwrap().id.clone();
        let position = h.session.select_criterion(&current).await.unwrap();
        assert_eq!(position.theme, "strategy");
        assert_eq!(position.index, 0);

        assert_eq!(events_of_kind(&h.bus, &id, "progress_updated").await, 0);
        assert_eq!(h.store.count().await, 0);
    }

    // ==================== Resume Tests ====================

    #[tokio::test]
    async fn start_resumes_saved_position_once() {
        let mut h = harness();
        h.session.assessment.record_position("strategy", 1);

        let position = h.session.start().unwrap();
        assert_eq!(position.theme, "strategy");
        assert_eq!(position.index, 1);

        h.session.next().await;
        assert_eq!(h.session.current_criterion().unwrap().id, "c3");

        // Starting again must not snap back to the saved position
        let position = h.session.start().unwrap();
        assert_eq!(position.theme, "frontend");
        assert_eq!(h.session.current_criterion().unwrap().id, "c3");
    }

    #[tokio::test]
    async fn start_falls_back_when_saved_position_is_invalid() {
        let mut h = harness();
        h.session.assessment.record_position("hosting", 4);

        let position = h.session.start().unwrap();
        assert_eq!(position.theme, "strategy");
        assert_eq!(position.index, 0);
    }

    // ==================== Response Tests ====================

    #[tokio::test]
    async fn update_response_publishes_and_saves() {
        let mut h = harness();
        h.session.start();
        let id = h.session.assessment().id.clone();

        let applied = h
            .session
            .update_response("c1", ResponseStatus::Compliant, None)
            .await;
        assert!(applied);

        assert_eq!(events_of_kind(&h.bus, &id, "response_updated").await, 1);
        let saved = h.store.get(&id).await.unwrap().unwrap();
        assert_eq!(saved.response("c1").unwrap().status, ResponseStatus::Compliant);
        // Score snapshot refreshed alongside the response
        assert!(saved.score.is_some());
    }

    #[tokio::test]
    async fn update_response_for_stale_criterion_is_refused() {
        let mut h = harness();
        h.session.start();
        let id = h.session.assessment().id.clone();

        let applied = h
            .session
            .update_response("removed-criterion", ResponseStatus::Compliant, None)
            .await;
        assert!(!applied);
        assert!(h.bus.events_for(&id).await.is_empty());
        assert_eq!(h.store.count().await, 0);
    }

    // ==================== Completion Tests ====================

    #[tokio::test]
    async fn complete_publishes_once() {
        let mut h = harness();
        h.session.start();
        let id = h.session.assessment().id.clone();

        h.session.complete().await;
        h.session.complete().await;

        assert_eq!(events_of_kind(&h.bus, &id, "completed").await, 1);
        assert!(h.store.get(&id).await.unwrap().unwrap().completed);
    }

    // ==================== Persistence Failure Tests ====================

    #[tokio::test]
    async fn failed_save_emits_save_failed_and_keeps_state() {
        let mut h = harness();
        h.session.start();
        h.store.fail_saves(true);
        let id = h.session.assessment().id.clone();

        let applied = h
            .session
            .update_response("c1", ResponseStatus::NonCompliant, None)
            .await;
        assert!(applied);
        assert_eq!(events_of_kind(&h.bus, &id, "save_failed").await, 1);
        assert_eq!(
            h.session.assessment().response("c1").unwrap().status,
            ResponseStatus::NonCompliant
        );

        // Next successful save reconciles
        h.store.fail_saves(false);
        h.session.next().await;
        let saved = h.store.get(&id).await.unwrap().unwrap();
        assert_eq!(
            saved.response("c1").unwrap().status,
            ResponseStatus::NonCompliant
        );
    }
}
