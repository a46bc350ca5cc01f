//! Compliance scoring
//!
//! All breakdowns derive from a single pass over the referential's criteria
//! with a response lookup. Pending responses count toward every denominator
//! but never a numerator: an unanswered question counts against the rate
//! until answered. Empty buckets resolve to 0%, never a division error.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::assessment::types::{Assessment, ResponseStatus};
use crate::referential::{EvaluationLevel, Referential};

/// A compliant/total pair for one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    pub compliant: usize,
    pub total: usize,
}

impl Tally {
    fn count(&mut self, status: ResponseStatus) {
        self.total += 1;
        if status == ResponseStatus::Compliant {
            self.compliant += 1;
        }
    }

    /// Compliance rate in percent; 0 when the bucket is empty
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.compliant as f64 / self.total as f64 * 100.0
        }
    }
}

/// Headline score restricted to the assessment's chosen evaluation depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelScore {
    pub level: EvaluationLevel,
    pub compliant: usize,
    pub total: usize,
    pub compliance_rate: f64,
}

/// Exact-match tallies per criterion level tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreByLevel {
    pub essential: Tally,
    pub recommended: Tally,
    pub advanced: Tally,
}

impl ScoreByLevel {
    fn bucket(&mut self, level: EvaluationLevel) -> &mut Tally {
        match level {
            EvaluationLevel::Essential => &mut self.essential,
            EvaluationLevel::Recommended => &mut self.recommended,
            EvaluationLevel::Advanced => &mut self.advanced,
        }
    }

    /// Tally for one level tag
    pub fn get(&self, level: EvaluationLevel) -> Tally {
        match level {
            EvaluationLevel::Essential => self.essential,
            EvaluationLevel::Recommended => self.recommended,
            EvaluationLevel::Advanced => self.advanced,
        }
    }
}

/// Full score breakdown for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScore {
    /// Unfiltered criterion count of the referential
    pub total_criteria: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub not_applicable: usize,
    pub pending: usize,
    /// Global rate over all levels, whether or not they were in scope
    pub compliance_rate: f64,
    /// Rate over the criteria actually audited at the chosen depth
    pub level_score: LevelScore,
    pub score_by_level: ScoreByLevel,
    pub score_by_theme: BTreeMap<String, Tally>,
}

/// Compute the full score breakdown
///
/// Responses whose criterion id is absent from the referential are excluded
/// from every count (stored data may outlive a referential version); a
/// criterion missing its response counts as pending.
pub fn compute_score(assessment: &Assessment, referential: &Referential) -> AssessmentScore {
    let responses: HashMap<&str, ResponseStatus> = assessment
        .responses
        .iter()
        .map(|r| (r.criterion_id.as_str(), r.status))
        .collect();

    let mut compliant = 0;
    let mut non_compliant = 0;
    let mut not_applicable = 0;
    let mut pending = 0;

    let mut level_tally = Tally::default();
    let mut score_by_level = ScoreByLevel::default();
    let mut score_by_theme: BTreeMap<String, Tally> = BTreeMap::new();

    for criterion in &referential.criteria {
        let status = responses
            .get(criterion.id.as_str())
            .copied()
            .unwrap_or(ResponseStatus::Pending);

        match status {
            ResponseStatus::Compliant => compliant += 1,
            ResponseStatus::NonCompliant => non_compliant += 1,
            ResponseStatus::NotApplicable => not_applicable += 1,
            ResponseStatus::Pending => pending += 1,
        }

        // Theme buckets exist even when everything in them is not-applicable
        let theme_tally = score_by_theme.entry(criterion.theme.clone()).or_default();

        if status.is_applicable() {
            theme_tally.count(status);
            score_by_level.bucket(criterion.level).count(status);
            if assessment.level.includes(criterion.level) {
                level_tally.count(status);
            }
        }
    }

    let total_criteria = referential.criteria.len();
    let global = Tally {
        compliant,
        total: total_criteria - not_applicable,
    };

    AssessmentScore {
        total_criteria,
        compliant,
        non_compliant,
        not_applicable,
        pending,
        compliance_rate: global.rate(),
        level_score: LevelScore {
            level: assessment.level,
            compliant: level_tally.compliant,
            total: level_tally.total,
            compliance_rate: level_tally.rate(),
        },
        score_by_level,
        score_by_theme,
    }
}
