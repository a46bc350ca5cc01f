//! Assessment aggregate and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::assessment::score::AssessmentScore;
use crate::referential::{EvaluationLevel, Referential};

/// Compliance status of one criterion response
///
/// Serializes to the four literal kebab-case strings; anything else in
/// persisted data deserializes to `Pending` rather than rejecting the
/// whole assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseStatus {
    #[default]
    Pending,
    Compliant,
    NonCompliant,
    NotApplicable,
}

impl ResponseStatus {
    /// Convert to the persisted string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Compliant => "compliant",
            Self::NonCompliant => "non-compliant",
            Self::NotApplicable => "not-applicable",
        }
    }

    /// Parse from the persisted string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "compliant" => Some(Self::Compliant),
            "non-compliant" => Some(Self::NonCompliant),
            "not-applicable" => Some(Self::NotApplicable),
            _ => None,
        }
    }

    /// Whether this response counts toward a compliance-rate denominator
    pub fn is_applicable(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }
}

impl<'de> Deserialize<'de> for ResponseStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Malformed status values normalize to Pending at the boundary
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s).unwrap_or(Self::Pending))
    }
}

/// One user's answer to one criterion
///
/// Exactly one response exists per criterion in an assessment at all times;
/// "not answered yet" is an explicit `Pending` status, never a missing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionResponse {
    pub criterion_id: String,
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CriterionResponse {
    /// A fresh pending response for a criterion
    pub fn pending(criterion_id: impl Into<String>) -> Self {
        Self {
            criterion_id: criterion_id.into(),
            status: ResponseStatus::Pending,
            comment: None,
        }
    }
}

/// A self-assessment of one project against one referential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub referential_id: String,
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Complete response set: one entry per criterion of the referential
    pub responses: Vec<CriterionResponse>,
    /// Monotonic: transitions false -> true exactly once, never back
    #[serde(default)]
    pub completed: bool,
    /// Evaluation depth chosen at creation; immutable afterwards
    pub level: EvaluationLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_index: Option<usize>,
    /// Last computed score snapshot; may be stale, recompute for any
    /// correctness-sensitive read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<AssessmentScore>,
}

impl Assessment {
    /// Create a new assessment with a full pending response set
    pub fn new(
        referential: &Referential,
        project_name: impl Into<String>,
        project_description: Option<String>,
        level: EvaluationLevel,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            referential_id: referential.id.clone(),
            project_name: project_name.into(),
            project_description,
            created_at: now,
            updated_at: now,
            responses: referential
                .criteria
                .iter()
                .map(|c| CriterionResponse::pending(&c.id))
                .collect(),
            completed: false,
            level,
            current_theme: None,
            current_index: None,
            score: None,
        }
    }

    /// Look up the response for a criterion
    pub fn response(&self, criterion_id: &str) -> Option<&CriterionResponse> {
        self.responses.iter().find(|r| r.criterion_id == criterion_id)
    }

    /// Replace the response for its criterion; false when no slot exists
    pub fn set_response(&mut self, response: CriterionResponse) -> bool {
        match self
            .responses
            .iter_mut()
            .find(|r| r.criterion_id == response.criterion_id)
        {
            Some(slot) => {
                *slot = response;
                self.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Number of responses no longer pending
    pub fn answered_count(&self) -> usize {
        self.responses
            .iter()
            .filter(|r| r.status != ResponseStatus::Pending)
            .count()
    }

    /// Record the navigation position for resume
    pub fn record_position(&mut self, theme: impl Into<String>, index: usize) {
        self.current_theme = Some(theme.into());
        self.current_index = Some(index);
        self.updated_at = Utc::now();
    }

    /// Mark completed; the transition is one-way
    pub fn mark_completed(&mut self) {
        if !self.completed {
            self.completed = true;
            self.updated_at = Utc::now();
        }
    }

    /// Repair a loaded response set against the active referential
    ///
    /// Ensures exactly one response per criterion: missing entries become
    /// pending, duplicates keep the first occurrence. Responses pointing at
    /// criteria absent from the referential are kept in place (version
    /// drift); scoring and navigation ignore them.
    pub fn normalize_responses(&mut self, referential: &Referential) {
        let mut seen = std::collections::HashSet::new();
        self.responses.retain(|r| seen.insert(r.criterion_id.clone()));

        for criterion in &referential.criteria {
            if !seen.contains(&criterion.id) {
                self.responses.push(CriterionResponse::pending(&criterion.id));
            }
        }
    }
}
