//! Referential domain types
//!
//! A referential is an immutable taxonomy of eco-design criteria grouped by
//! theme and classified by level. It is loaded once per assessment and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// Evaluation depth of an assessment, and the level tag of a criterion
///
/// Levels are ordinal: an assessment at `Recommended` depth audits every
/// `Essential` criterion as well, and `Advanced` audits everything. The
/// level tag on a single criterion is exact-match; only the depth filter
/// is cumulative (see [`EvaluationLevel::includes`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationLevel {
    Essential,
    Recommended,
    Advanced,
}

impl EvaluationLevel {
    /// Convert to the persisted string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Recommended => "recommended",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from the persisted string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "essential" => Some(Self::Essential),
            "recommended" => Some(Self::Recommended),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// All levels, in audit-depth order
    pub fn all() -> [Self; 3] {
        [Self::Essential, Self::Recommended, Self::Advanced]
    }

    fn depth(&self) -> u8 {
        match self {
            Self::Essential => 0,
            Self::Recommended => 1,
            Self::Advanced => 2,
        }
    }

    /// Whether a criterion tagged `level` is in scope at this audit depth
    ///
    /// Cumulative: `Essential` covers essential-tagged criteria only,
    /// `Recommended` covers essential and recommended, `Advanced` covers all.
    pub fn includes(&self, level: EvaluationLevel) -> bool {
        level.depth() <= self.depth()
    }
}

/// A single eco-design criterion
///
/// All text fields are opaque to scoring; only `id`, `theme` and `level`
/// drive filtering and navigation. `implementation` doubles as the
/// suggestion text for improvement generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    /// Opaque stable id, unique within a referential
    pub id: String,
    /// Dotted display identifier, e.g. "1.2"
    pub number: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub level: EvaluationLevel,
    /// Theme id this criterion belongs to (many-to-one)
    pub theme: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub implementation: String,
    #[serde(default)]
    pub verification: String,
    /// Optional reading links, display-only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
}

/// A theme grouping criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A complete criteria referential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referential {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub last_update: String,
    #[serde(default)]
    pub source: String,
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub themes: Vec<Theme>,
}

impl Referential {
    /// Look up a criterion by id
    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    /// Resolve a theme's display name, falling back to the raw id
    ///
    /// A criterion may reference a theme id absent from `themes`; that is
    /// tolerated, not an error.
    pub fn theme_name<'a>(&'a self, theme_id: &'a str) -> &'a str {
        self.themes
            .iter()
            .find(|t| t.id == theme_id)
            .map(|t| t.name.as_str())
            .unwrap_or(theme_id)
    }

    /// Lightweight summary for listings
    pub fn summary(&self) -> ReferentialSummary {
        ReferentialSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }
}

/// Summary of a referential, as returned by provider listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferentialSummary {
    pub id: String,
    pub name: String,
    pub version: String,
}
