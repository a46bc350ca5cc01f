//! Remote API-backed assessment storage

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use ecograde_core::{Assessment, AssessmentStore, StoreError};

/// Request timeout for all API calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Assessment store backed by a remote HTTP API
///
/// Talks to a REST backend exposing `/assessments` with the same JSON shape
/// the local store writes. Authentication is an optional bearer token; the
/// store itself does no retries, callers already treat saves as best-effort.
pub struct RemoteAssessmentStore {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RemoteAssessmentStore {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Backend(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/assessments", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/assessments/{}", self.base_url, id)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = self
            .with_auth(request)
            .send()
            .await
            .map_err(|e| StoreError::Io(format!("request failed: {}", e)))?;
        debug!(status = %response.status(), url = %response.url(), "remote store response");
        Ok(response)
    }
}

#[async_trait]
impl AssessmentStore for RemoteAssessmentStore {
    async fn save(&self, assessment: &Assessment) -> Result<(), StoreError> {
        let request = self.client.put(self.item_url(&assessment.id)).json(assessment);
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(StoreError::Backend(format!(
                "save rejected: {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Assessment>, StoreError> {
        let response = self.send(self.client.get(self.item_url(id))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Backend(format!(
                "get rejected: {}",
                response.status()
            )));
        }
        let assessment = response
            .json::<Assessment>()
            .await
            .map_err(|e| StoreError::Serialize(format!("invalid assessment payload: {}", e)))?;
        Ok(Some(assessment))
    }

    async fn get_all(&self) -> Result<Vec<Assessment>, StoreError> {
        let response = self.send(self.client.get(self.collection_url())).await?;
        if !response.status().is_success() {
            return Err(StoreError::Backend(format!(
                "list rejected: {}",
                response.status()
            )));
        }
        response
            .json::<Vec<Assessment>>()
            .await
            .map_err(|e| StoreError::Serialize(format!("invalid assessment list: {}", e)))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let response = self.send(self.client.delete(self.item_url(id))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(StoreError::Backend(format!(
                "delete rejected: {}",
                response.status()
            )));
        }
        Ok(true)
    }
}
