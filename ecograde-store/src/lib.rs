//! ecograde-store: Persistence backends for ecograde
//!
//! Implementations of the core storage traits:
//!
//! - [`LocalAssessmentStore`] - assessments in a single JSON file on disk
//! - [`RemoteAssessmentStore`] - assessments behind a REST API
//! - [`FileReferentialProvider`] - referentials from a directory of JSON files

mod local;
mod referentials;
mod remote;

pub use local::LocalAssessmentStore;
pub use referentials::FileReferentialProvider;
pub use remote::RemoteAssessmentStore;
