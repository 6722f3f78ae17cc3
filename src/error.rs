// src/error.rs
//! Failure taxonomy for the analysis workflow

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Submission rejected before any backend call was issued. The message
    /// is user-facing.
    #[error("{0}")]
    Validation(String),

    /// A second submission arrived while one was still in flight.
    #[error("an analysis request is already in flight")]
    AnalysisInProgress,

    /// The backend was unreachable or the connection broke mid-response.
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {detail}")]
    Api { status: u16, detail: String },

    /// A success response whose body could not be decoded.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// The provider change was rejected. `detail` carries the
    /// server-provided message when the body had one.
    #[error("provider change failed")]
    ProviderChange { detail: Option<String> },
}

impl WorkflowError {
    /// Server-supplied detail of a rejected provider change, if any.
    pub fn provider_detail(&self) -> Option<&str> {
        match self {
            WorkflowError::ProviderChange { detail } => detail.as_deref(),
            _ => None,
        }
    }
}
