//! Improvement suggestion generation
//!
//! Selection-and-ranking only: every non-compliant response becomes one
//! suggestion carrying the criterion's implementation guidance verbatim.

use serde::{Deserialize, Serialize};

use crate::assessment::types::{Assessment, ResponseStatus};
use crate::referential::{EvaluationLevel, Referential};

/// Remediation priority, derived from the criterion's own level tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// essential -> high, recommended -> medium, advanced -> low
    pub fn from_level(level: EvaluationLevel) -> Self {
        match level {
            EvaluationLevel::Essential => Self::High,
            EvaluationLevel::Recommended => Self::Medium,
            EvaluationLevel::Advanced => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// One remediation suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub criterion_number: String,
    pub title: String,
    pub priority: Priority,
    pub suggestion: String,
}

/// Derive prioritized suggestions from the non-compliant responses
///
/// Sorted high before medium before low; the sort is stable, so same-priority
/// suggestions keep referential order. Non-compliant responses whose
/// criterion is no longer in the referential are skipped.
pub fn generate_improvements(assessment: &Assessment, referential: &Referential) -> Vec<Improvement> {
    let mut improvements: Vec<Improvement> = referential
        .criteria
        .iter()
        .filter(|criterion| {
            assessment
                .response(&criterion.id)
                .is_some_and(|r| r.status == ResponseStatus::NonCompliant)
        })
        .map(|criterion| Improvement {
            criterion_number: criterion.number.clone(),
            title: criterion.title.clone(),
            priority: Priority::from_level(criterion.level),
            suggestion: criterion.implementation.clone(),
        })
        .collect();

    improvements.sort_by_key(|i| i.priority);
    improvements
}
