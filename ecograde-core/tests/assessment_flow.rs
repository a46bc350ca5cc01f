//! End-to-end assessment flow tests
//!
//! Exercises the full path through the public API: create an assessment,
//! answer and navigate, then verify the score breakdown, improvements and
//! resume behavior against a small two-theme referential.

use std::sync::Arc;

use ecograde_core::{
    AssessmentEvent, AssessmentManager, AssessmentStore, Criterion, EvaluationLevel, EventBus,
    MemoryAssessmentStore, MemoryEventBus, MemoryReferentialProvider, Priority, Referential,
    ResponseStatus, Step, Tally, Theme,
};

fn criterion(id: &str, number: &str, theme: &str, level: EvaluationLevel) -> Criterion {
    Criterion {
        id: id.to_string(),
        number: number.to_string(),
        title: format!("Criterion {}", number),
        description: String::new(),
        level,
        theme: theme.to_string(),
        objective: String::new(),
        implementation: format!("Remediate {}", number),
        verification: String::new(),
        resources: Vec::new(),
    }
}

/// Two themes, four criteria spread over all three levels
fn eco_referential() -> Referential {
    Referential {
        id: "rgesn".to_string(),
        name: "Eco-design reference".to_string(),
        version: "2.0".to_string(),
        description: String::new(),
        last_update: String::new(),
        source: String::new(),
        criteria: vec![
            criterion("r-1.1", "1.1", "strategy", EvaluationLevel::Essential),
            criterion("r-1.2", "1.2", "strategy", EvaluationLevel::Essential),
            criterion("r-2.1", "2.1", "frontend", EvaluationLevel::Recommended),
            criterion("r-2.2", "2.2", "frontend", EvaluationLevel::Advanced),
        ],
        themes: vec![
            Theme {
                id: "strategy".to_string(),
                name: "Strategy".to_string(),
                description: String::new(),
            },
            Theme {
                id: "frontend".to_string(),
                name: "Frontend".to_string(),
                description: String::new(),
            },
        ],
    }
}

struct TestEnv {
    manager: AssessmentManager,
    store: Arc<MemoryAssessmentStore>,
    bus: Arc<MemoryEventBus>,
}

fn env() -> TestEnv {
    let provider = Arc::new(MemoryReferentialProvider::with(vec![eco_referential()]));
    let store = Arc::new(MemoryAssessmentStore::new());
    let bus = Arc::new(MemoryEventBus::new(256));
    let manager = AssessmentManager::new(
        provider,
        Arc::clone(&store) as Arc<dyn AssessmentStore>,
        Arc::clone(&bus) as Arc<dyn EventBus>,
    );
    TestEnv { manager, store, bus }
}

#[tokio::test]
async fn full_assessment_round_trip() {
    let env = env();
    let mut session = env
        .manager
        .create_assessment("rgesn", "Shop revamp", None, EvaluationLevel::Advanced)
        .await
        .unwrap();

    // Answer three of four, leave the advanced one pending
    session.update_response("r-1.1", ResponseStatus::Compliant, None).await;
    session
        .update_response("r-1.2", ResponseStatus::NonCompliant, Some("no budget".to_string()))
        .await;
    session.update_response("r-2.1", ResponseStatus::NotApplicable, None).await;

    let score = session.score();
    assert_eq!(score.total_criteria, 4);
    assert_eq!(score.compliant, 1);
    assert_eq!(score.non_compliant, 1);
    assert_eq!(score.not_applicable, 1);
    assert_eq!(score.pending, 1);
    // 1 compliant of 3 applicable (pending still counts against the rate)
    assert!((score.compliance_rate - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(score.score_by_level.essential, Tally { compliant: 1, total: 2 });
    assert_eq!(score.score_by_theme["strategy"], Tally { compliant: 1, total: 2 });

    let improvements = session.improvements();
    assert_eq!(improvements.len(), 1);
    assert_eq!(improvements[0].criterion_number, "1.2");
    assert_eq!(improvements[0].priority, Priority::High);
    assert_eq!(improvements[0].suggestion, "Remediate 1.2");

    // Walk the whole questionnaire to completion
    assert!(matches!(session.next().await, Step::Moved(_)));
    assert!(matches!(session.next().await, Step::Moved(_)));
    assert!(matches!(session.next().await, Step::Moved(_)));
    assert_eq!(session.next().await, Step::Completed);
    assert!(session.assessment().completed);

    // Stored copy matches the live one
    let id = session.assessment().id.clone();
    let stored = env.store.get(&id).await.unwrap().unwrap();
    assert_eq!(&stored, session.assessment());
}

#[tokio::test]
async fn essential_depth_narrows_the_questionnaire() {
    let env = env();
    let session = env
        .manager
        .create_assessment("rgesn", "Landing page", None, EvaluationLevel::Essential)
        .await
        .unwrap();

    assert_eq!(session.questionnaire().len(), 2);
    assert_eq!(session.questionnaire().themes(), vec!["strategy"]);

    // Responses still exist for out-of-scope criteria
    assert_eq!(session.assessment().responses.len(), 4);
}

#[tokio::test]
async fn resume_after_restart_continues_where_left_off() {
    let env = env();
    let id = {
        let mut session = env
            .manager
            .create_assessment("rgesn", "Shop revamp", None, EvaluationLevel::Advanced)
            .await
            .unwrap();
        session.update_response("r-1.1", ResponseStatus::Compliant, None).await;
        session.next().await;
        session.next().await;
        session.assessment().id.clone()
    };

    let mut resumed = env.manager.resume_assessment(&id).await.unwrap().unwrap();
    assert_eq!(resumed.current_criterion().unwrap().id, "r-2.1");
    assert_eq!(
        resumed.assessment().response("r-1.1").unwrap().status,
        ResponseStatus::Compliant
    );

    // Backwards over the theme boundary
    assert!(matches!(resumed.previous().await, Step::Moved(_)));
    assert_eq!(resumed.current_criterion().unwrap().id, "r-1.2");
}

#[tokio::test]
async fn event_stream_reflects_each_action_exactly_once() {
    let env = env();
    let mut session = env
        .manager
        .create_assessment("rgesn", "Shop revamp", None, EvaluationLevel::Advanced)
        .await
        .unwrap();
    let id = session.assessment().id.clone();

    session.update_response("r-1.1", ResponseStatus::Compliant, None).await;
    session.next().await;
    session.previous().await;
    // Boundary no-op emits nothing
    session.previous().await;
    session.complete().await;
    session.complete().await;

    let events = env.bus.events_for(&id).await;
    let count = |tag: &str| {
        events
            .iter()
            .filter(|(_, e)| serde_json::to_value(e).unwrap()["type"] == tag)
            .count()
    };
    assert_eq!(count("assessment_created"), 1);
    assert_eq!(count("response_updated"), 1);
    assert_eq!(count("progress_updated"), 2);
    assert_eq!(count("completed"), 1);
    assert_eq!(count("save_failed"), 0);
}

#[tokio::test]
async fn deletion_is_observable() {
    let env = env();
    let session = env
        .manager
        .create_assessment("rgesn", "Shop revamp", None, EvaluationLevel::Essential)
        .await
        .unwrap();
    let id = session.assessment().id.clone();
    drop(session);

    let mut rx = env.bus.subscribe();
    assert!(env.manager.delete_assessment(&id).await.unwrap());
    assert!(env.manager.list_assessments().await.unwrap().is_empty());

    let (_, event) = rx.recv().await.unwrap();
    assert_eq!(event, AssessmentEvent::AssessmentDeleted { assessment_id: id });
}
