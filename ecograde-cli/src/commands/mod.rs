//! CLI command implementations

pub mod answer;
pub mod assessments;
pub mod complete;
pub mod improvements;
pub mod nav;
pub mod referentials;
pub mod score;
