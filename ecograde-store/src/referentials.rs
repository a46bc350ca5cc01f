//! File-based referential provider

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use ecograde_core::{Referential, ReferentialError, ReferentialProvider, ReferentialSummary};

/// Reads referentials from a directory of JSON files
///
/// Each referential is a single `<id>.json` file; the id comes from the file
/// stem, not from the document. Files are read on demand so a referential can
/// be updated without restarting.
pub struct FileReferentialProvider {
    dir: PathBuf,
}

impl FileReferentialProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    async fn read_referential(&self, path: &Path) -> Result<Referential, ReferentialError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ReferentialError::Io(format!("failed to read {}: {}", path.display(), e)))?;
        let mut referential: Referential = serde_json::from_str(&content)
            .map_err(|e| ReferentialError::Parse(format!("invalid referential {}: {}", path.display(), e)))?;
        // The file stem is the canonical id; a document claiming a different
        // id would otherwise list under a name lookups cannot resolve
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            referential.id = stem.to_string();
        }
        Ok(referential)
    }
}

#[async_trait]
impl ReferentialProvider for FileReferentialProvider {
    async fn list_referentials(&self) -> Result<Vec<ReferentialSummary>, ReferentialError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // Missing directory means no referentials installed yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ReferentialError::Io(format!("failed to list referentials: {}", e))),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ReferentialError::Io(format!("failed to list referentials: {}", e)))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read_referential(&path).await {
                Ok(referential) => summaries.push(referential.summary()),
                // One broken file must not hide the others
                Err(error) => warn!(path = %path.display(), %error, "skipping unreadable referential"),
            }
        }

        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(summaries)
    }

    async fn get_referential(&self, id: &str) -> Result<Option<Referential>, ReferentialError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        self.read_referential(&path).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const RGESN_JSON: &str = r#"{
        "id": "rgesn",
        "name": "RGESN",
        "version": "2.0",
        "criteria": [
            {
                "id": "rgesn-1.1",
                "number": "1.1",
                "title": "Has the service been evaluated?",
                "level": "essential",
                "theme": "strategy",
                "implementation": "Run an evaluation."
            }
        ],
        "themes": [
            { "id": "strategy", "name": "Strategy" }
        ]
    }"#;

    async fn provider_with_rgesn() -> (tempfile::TempDir, FileReferentialProvider) {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("rgesn.json"), RGESN_JSON)
            .await
            .unwrap();
        let provider = FileReferentialProvider::new(dir.path());
        (dir, provider)
    }

    #[tokio::test]
    async fn test_get_referential_from_file() {
        let (_dir, provider) = provider_with_rgesn().await;

        let referential = provider.get_referential("rgesn").await.unwrap().unwrap();
        assert_eq!(referential.name, "RGESN");
        assert_eq!(referential.criteria.len(), 1);
        assert_eq!(referential.criteria[0].number, "1.1");
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let (_dir, provider) = provider_with_rgesn().await;
        assert!(provider.get_referential("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_directory_lists_empty() {
        let dir = tempdir().unwrap();
        let provider = FileReferentialProvider::new(dir.path().join("nowhere"));
        assert!(provider.list_referentials().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_skips_broken_files() {
        let (dir, provider) = provider_with_rgesn().await;
        tokio::fs::write(dir.path().join("broken.json"), "{")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("notes.txt"), "ignore me")
            .await
            .unwrap();

        let summaries = provider.list_referentials().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, "rgesn");
    }

    #[tokio::test]
    async fn test_file_stem_overrides_document_id() {
        let (dir, provider) = provider_with_rgesn().await;
        // Document claims a different id than its file name
        tokio::fs::write(
            dir.path().join("alias.json"),
            RGESN_JSON.replace("\"id\": \"rgesn\"", "\"id\": \"other\""),
        )
        .await
        .unwrap();

        let referential = provider.get_referential("alias").await.unwrap().unwrap();
        assert_eq!(referential.id, "alias");

        let ids: Vec<_> = provider
            .list_referentials()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["alias", "rgesn"]);
        // The document's own id resolves nothing
        assert!(provider.get_referential("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_referential_is_a_parse_error() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("bad.json"), "{\"id\": 42}")
            .await
            .unwrap();
        let provider = FileReferentialProvider::new(dir.path());

        let result = provider.get_referential("bad").await;
        assert!(matches!(result, Err(ReferentialError::Parse(_))));
    }
}
