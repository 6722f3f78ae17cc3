// src/types/response.rs
//! Response envelopes of the analysis backend

use serde::Deserialize;
use std::fmt;

use crate::types::candidate::RawCandidate;

/// Envelope returned by the analyze and stored-results endpoints.
///
/// `candidates` is nullable on the wire. A decoded response without a
/// candidate list is a valid answer that the workflow maps to placeholder
/// results without raising an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendResponse {
    #[serde(default)]
    pub candidates: Option<Vec<RawCandidate>>,
    #[serde(default)]
    pub llm_info: Option<LlmInfo>,
}

/// Summary of the AI engine that produced a batch of results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmInfo {
    pub provider: String,
    pub enabled: bool,
    pub accessible: bool,
    #[serde(default)]
    pub use_fallback: bool,
}

/// Full provider status served by the backend. Secrets are masked
/// server-side before they reach this struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmStatus {
    pub provider: String,
    pub enabled: bool,
    pub accessible: bool,
    #[serde(default)]
    pub fallback_mode: bool,
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default)]
    pub ollama_api_url: String,
    #[serde(default)]
    pub ollama_model: String,
}

/// Answer to a provider-change request. Exactly one of the two fields is
/// populated on a well-behaved backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderChangeResponse {
    #[serde(default)]
    pub success: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Answer to a provider test prompt.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmTestResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The AI engines the backend can run. `Gemini` is the fixed default the
/// selection surface shows before any status is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Ollama,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Gemini, ProviderKind::Ollama];

    /// Wire name used in query strings and status payloads.
    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Ollama => "ollama",
        }
    }

    /// Human-readable label for selection lists.
    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Gemini (Google)",
            ProviderKind::Ollama => "Ollama (Local)",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gemini" => Some(ProviderKind::Gemini),
            "ollama" => Some(ProviderKind::Ollama),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Client-side mirror of the server provider configuration, derived from
/// the confirmed provider and the last fetched status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider: ProviderKind,
    pub enabled: bool,
    pub accessible: bool,
}
