// src/types/candidate.rs
//! Candidate records in both shapes: raw as the backend serializes them,
//! and normalized as the display surfaces consume them.

use serde::{Deserialize, Serialize};

/// One resume file staged for analysis. Order of staging is preserved all
/// the way to the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Immutable payload of one analysis submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub files: Vec<CvFile>,
    pub job_description: String,
}

/// A field the backend serializes either as a single string or as a list
/// of strings, depending on how the extraction parsed the resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    Text(String),
    List(Vec<String>),
}

impl TextOrList {
    /// Collapses both shapes into one string. List items are joined with
    /// newlines.
    pub fn flatten(&self) -> String {
        match self {
            TextOrList::Text(text) => text.clone(),
            TextOrList::List(items) => items.join("\n"),
        }
    }
}

/// Candidate record exactly as the analysis backend returns it. Every
/// field is optional on the wire, so deserialization never fails on a
/// missing or null value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCandidate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub download_id: Option<String>,
    pub score: Option<f64>,
    pub match_explanation: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<TextOrList>,
    pub education: Option<TextOrList>,
    pub languages: Option<Vec<String>>,
    pub interview_questions: Option<Vec<String>>,
}

/// Per-skill score slot kept in the view model for display surfaces that
/// chart individual skills. The current backend never fills it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRating {
    pub name: String,
    pub score: i32,
}

/// Normalized candidate record: the stable shape every display surface
/// and report writer consumes. Produced only by the normalizer and the
/// placeholder fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateView {
    pub candidate_name: String,
    /// Match score in percent. Zero when the backend omitted it.
    pub match_score: i32,
    pub summary: String,
    /// Star rating derived from the match score.
    pub rating: i32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggested_questions: Vec<String>,
    pub skills: Option<Vec<SkillRating>>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub download_id: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub languages: Option<Vec<String>>,
}
