//! ecograde-core: Scoring and navigation engine for eco-design self-assessments
//!
//! This crate provides the foundational components for ecograde:
//!
//! - **Referentials** - [`Referential`] catalogs of [`Criterion`]s, the
//!   cumulative [`EvaluationLevel`] filter and the [`ThemedCriteria`] view
//! - **Assessments** - [`Assessment`] response sets, [`compute_score`] and
//!   [`generate_improvements`]
//! - **Navigation** - [`NavigationCursor`] walking the filtered questionnaire
//!   with resume support
//! - **Sessions** - [`AssessmentSession`] and [`AssessmentManager`] tying
//!   state, events and persistence together
//! - **Event system** - [`EventBus`] trait and [`MemoryEventBus`] for typed
//!   assessment events
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use ecograde_core::{
//!     AssessmentManager, EvaluationLevel, MemoryAssessmentStore, MemoryEventBus,
//!     MemoryReferentialProvider, ResponseStatus,
//! };
//!
//! async fn example() -> Result<(), ecograde_core::EcogradeError> {
//!     let manager = AssessmentManager::new(
//!         Arc::new(MemoryReferentialProvider::new()),
//!         Arc::new(MemoryAssessmentStore::new()),
//!         Arc::new(MemoryEventBus::new(100)),
//!     );
//!
//!     let mut session = manager
//!         .create_assessment("rgesn", "My project", None, EvaluationLevel::Recommended)
//!         .await?;
//!     session.update_response("rgesn-1.1", ResponseStatus::Compliant, None).await;
//!     session.next().await;
//!
//!     println!("compliance: {:.1}%", session.score().compliance_rate);
//!     Ok(())
//! }
//! ```

pub mod assessment;
pub mod error;
pub mod events;
pub mod navigation;
pub mod referential;
pub mod store;

// Re-export key types for convenience
pub use assessment::{
    Assessment, AssessmentManager, AssessmentScore, AssessmentSession, CriterionResponse,
    Improvement, LevelScore, Priority, ResponseStatus, ScoreByLevel, Tally, compute_score,
    generate_improvements,
};
pub use error::{EcogradeError, ReferentialError, StoreError};
pub use events::{AssessmentEvent, EventBus, EventSeq, MemoryEventBus};
pub use navigation::{NavigationCursor, Position, Step};
pub use referential::{
    Criterion, EvaluationLevel, MemoryReferentialProvider, Referential, ReferentialProvider,
    ReferentialSummary, Theme, ThemedCriteria,
};
pub use store::{AssessmentStore, MemoryAssessmentStore};
