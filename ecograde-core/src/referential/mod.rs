//! Criteria referentials: taxonomy types, providers, and level filtering

mod filter;
mod provider;
mod types;

pub use filter::ThemedCriteria;
pub use provider::{MemoryReferentialProvider, ReferentialProvider};
pub use types::{Criterion, EvaluationLevel, Referential, ReferentialSummary, Theme};
