//! Assessment domain: responses, scoring, improvements and sessions

mod improvements;
mod manager;
mod score;
mod session;
mod types;

pub use improvements::{Improvement, Priority, generate_improvements};
pub use manager::AssessmentManager;
pub use score::{AssessmentScore, LevelScore, ScoreByLevel, Tally, compute_score};
pub use session::AssessmentSession;
pub use types::{Assessment, CriterionResponse, ResponseStatus};
