// src/core/api_client.rs
//! Reqwest-backed client for the analysis backend - the single place that
//! builds URLs, encodes uploads, and maps HTTP failures.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{error, info, trace};

use crate::analysis::AnalysisBackend;
use crate::error::WorkflowError;
use crate::types::candidate::AnalysisRequest;
use crate::types::response::{
    BackendResponse, LlmStatus, LlmTestResponse, ProviderChangeResponse, ProviderKind,
};

const ANALYZE_ENDPOINT: &str = "/apiV2/analyze";
const RESULTS_ENDPOINT: &str = "/apiV2/results";
const LLM_STATUS_ENDPOINT: &str = "/apiV2/llm/status";
const LLM_CONFIG_ENDPOINT: &str = "/apiV2/llm/config";
const LLM_TEST_ENDPOINT: &str = "/apiV2/llm/test";
const DOWNLOAD_ENDPOINT: &str = "/apiV2/download";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Error body shape the backend uses for non-success answers.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client against the backend base URL.
    pub fn new(base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retrieve the stored resume of an analyzed candidate.
    pub async fn download(&self, download_id: &str) -> Result<Vec<u8>, WorkflowError> {
        let url = format!("{}{}/{}", self.base_url, DOWNLOAD_ENDPOINT, download_id);
        info!("Downloading candidate file: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Shared success-path decoding: the body is read as text first so a
    /// shape failure can carry a payload preview.
    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, WorkflowError> {
        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| {
            error!("Failed to decode backend response: {}", err);
            let preview: String = body.chars().take(200).collect();
            WorkflowError::Shape(format!("{err} (body: {preview})"))
        })
    }
}

/// Maps a non-success response to `Api`, preferring the structured error
/// message when the body carries one.
async fn api_error(status: StatusCode, response: reqwest::Response) -> WorkflowError {
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    error!("Backend error response {}: {}", status, body);

    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.error)
        .unwrap_or(body);

    WorkflowError::Api {
        status: status.as_u16(),
        detail,
    }
}

#[async_trait]
impl AnalysisBackend for ApiClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<BackendResponse, WorkflowError> {
        let url = format!("{}{}", self.base_url, ANALYZE_ENDPOINT);

        let mut form = Form::new();
        for file in request.files {
            let content_type = content_type_for(&file.name);
            let part = Part::bytes(file.bytes)
                .file_name(file.name)
                .mime_str(content_type)?;
            form = form.part("cvFiles", part);
        }
        form = form.text("jobOffer", request.job_description);

        info!("Calling analysis service: {}", url);

        let response = self.client.post(&url).multipart(form).send().await?;
        self.read_json(response).await
    }

    async fn batch_results(&self, batch_id: &str) -> Result<BackendResponse, WorkflowError> {
        let url = format!("{}{}/{}", self.base_url, RESULTS_ENDPOINT, batch_id);
        trace!("Fetching stored results: {}", url);

        let response = self.client.get(&url).send().await?;
        self.read_json(response).await
    }

    async fn llm_status(&self) -> Result<LlmStatus, WorkflowError> {
        let url = format!("{}{}", self.base_url, LLM_STATUS_ENDPOINT);
        trace!("Fetching provider status: {}", url);

        let response = self.client.get(&url).send().await?;
        self.read_json(response).await
    }

    async fn change_provider(
        &self,
        provider: ProviderKind,
    ) -> Result<ProviderChangeResponse, WorkflowError> {
        let url = format!("{}{}", self.base_url, LLM_CONFIG_ENDPOINT);
        info!("Requesting provider change to {}", provider);

        let response = self
            .client
            .get(&url)
            .query(&[("provider", provider.name())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return self.read_json(response).await;
        }

        // Rejections keep their own variant so the selection layer can
        // surface the server's wording.
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!("Provider change failed with status {}: {}", status, body);

        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.error);
        Err(WorkflowError::ProviderChange { detail })
    }

    async fn test_provider(
        &self,
        provider: ProviderKind,
        prompt: &str,
    ) -> Result<LlmTestResponse, WorkflowError> {
        let url = format!("{}{}", self.base_url, LLM_TEST_ENDPOINT);
        let payload = serde_json::json!({ "prompt": prompt });

        info!("Sending test prompt to provider {}", provider);

        let response = self
            .client
            .post(&url)
            .query(&[("provider", provider.name())])
            .json(&payload)
            .send()
            .await?;
        self.read_json(response).await
    }
}

/// Content type for an uploaded resume, inferred from the extension.
fn content_type_for(file_name: &str) -> &'static str {
    let lower_name = file_name.to_lowercase();
    if lower_name.ends_with(".pdf") {
        "application/pdf"
    } else if lower_name.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}
