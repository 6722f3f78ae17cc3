// src/types/mod.rs
//! Wire and view-model types shared across the workflow

pub mod candidate;
pub mod response;

pub use candidate::{AnalysisRequest, CandidateView, CvFile, RawCandidate, SkillRating, TextOrList};
pub use response::{
    BackendResponse, LlmInfo, LlmStatus, LlmTestResponse, ProviderChangeResponse, ProviderConfig,
    ProviderKind,
};
