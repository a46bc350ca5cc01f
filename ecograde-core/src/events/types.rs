//! Event type definitions

use serde::{Deserialize, Serialize};

use crate::assessment::CriterionResponse;

/// Events emitted by assessment sessions and the manager
///
/// Each user action produces at most one event of each kind, published
/// synchronously after the in-memory state has changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssessmentEvent {
    /// A new assessment was created
    AssessmentCreated {
        assessment_id: String,
        project_name: String,
    },

    /// One criterion response changed
    ResponseUpdated {
        assessment_id: String,
        response: CriterionResponse,
    },

    /// The navigation position moved
    ProgressUpdated {
        assessment_id: String,
        theme: String,
        index: usize,
    },

    /// The questionnaire was finished
    Completed { assessment_id: String },

    /// A best-effort store write failed; state is unaffected and the next
    /// successful save reconciles
    SaveFailed {
        assessment_id: String,
        message: String,
    },

    /// An assessment was deleted
    AssessmentDeleted { assessment_id: String },
}

impl AssessmentEvent {
    /// The assessment this event belongs to
    pub fn assessment_id(&self) -> &str {
        match self {
            Self::AssessmentCreated { assessment_id, .. }
            | Self::ResponseUpdated { assessment_id, .. }
            | Self::ProgressUpdated { assessment_id, .. }
            | Self::Completed { assessment_id }
            | Self::SaveFailed { assessment_id, .. }
            | Self::AssessmentDeleted { assessment_id } => assessment_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_exposes_assessment_id() {
        let event = AssessmentEvent::Completed {
            assessment_id: "a1".to_string(),
        };
        assert_eq!(event.assessment_id(), "a1");
    }

    #[test]
    fn event_serializes_with_type_tag() {
        let event = AssessmentEvent::ProgressUpdated {
            assessment_id: "a1".to_string(),
            theme: "strategy".to_string(),
            index: 2,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "progress_updated");
        assert_eq!(json["index"], 2);
    }

    #[test]
    fn event_serde_roundtrip() {
        let event = AssessmentEvent::SaveFailed {
            assessment_id: "a1".to_string(),
            message: "backend down".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let parsed: AssessmentEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
