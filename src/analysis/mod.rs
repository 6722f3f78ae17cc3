// src/analysis/mod.rs
//! Workflow controllers that sit between the display surface and the
//! analysis backend

use async_trait::async_trait;

use crate::error::WorkflowError;
use crate::types::candidate::AnalysisRequest;
use crate::types::response::{
    BackendResponse, LlmStatus, LlmTestResponse, ProviderChangeResponse, ProviderKind,
};

pub mod fallback;
pub mod orchestrator;
pub mod provider;

pub use fallback::fallback_candidates;
pub use orchestrator::{AnalysisOrchestrator, AnalysisOutcome, FallbackReason};
pub use provider::{ChangeOutcome, ConfirmProvider, ProviderController};

/// Backend calls the controllers depend on. `ApiClient` is the production
/// implementation; tests substitute scripted stand-ins.
#[async_trait]
pub trait AnalysisBackend {
    /// Upload resumes plus the job offer and run the analysis.
    async fn analyze(&self, request: AnalysisRequest) -> Result<BackendResponse, WorkflowError>;

    /// Fetch the stored results of an earlier analysis batch.
    async fn batch_results(&self, batch_id: &str) -> Result<BackendResponse, WorkflowError>;

    /// Fetch the current AI provider status.
    async fn llm_status(&self) -> Result<LlmStatus, WorkflowError>;

    /// Switch the server-side AI provider.
    async fn change_provider(
        &self,
        provider: ProviderKind,
    ) -> Result<ProviderChangeResponse, WorkflowError>;

    /// Send a test prompt to a provider.
    async fn test_provider(
        &self,
        provider: ProviderKind,
        prompt: &str,
    ) -> Result<LlmTestResponse, WorkflowError>;
}
