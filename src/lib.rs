//! Client-side workflow core of the TalentIQ resume screener: stages
//! resume uploads, drives one analysis request at a time against the
//! backend, normalizes its loosely typed candidate payloads into a stable
//! view model, and manages AI provider selection. When the backend cannot
//! deliver results, a fixed placeholder list keeps the ranking surface
//! populated.

pub mod analysis;
pub mod cli;
pub mod core;
pub mod environment;
pub mod error;
pub mod normalizer;
pub mod notice;
pub mod report;
pub mod types;
pub mod upload;

pub use analysis::{
    AnalysisBackend, AnalysisOrchestrator, AnalysisOutcome, ChangeOutcome, ConfirmProvider,
    FallbackReason, ProviderController,
};
pub use crate::core::ApiClient;
pub use error::WorkflowError;
pub use types::candidate::{AnalysisRequest, CandidateView, CvFile, RawCandidate};
pub use types::response::{BackendResponse, LlmStatus, ProviderConfig, ProviderKind};
pub use upload::UploadCollector;
