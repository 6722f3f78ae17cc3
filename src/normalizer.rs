// src/normalizer.rs
//! Reconciles the backend's loosely typed candidate records into the view
//! model. Total by contract: malformed or missing fields become defaults,
//! never errors.

use crate::types::candidate::{CandidateView, RawCandidate, TextOrList};

/// Name shown when the backend omits or blanks the candidate name.
pub const DEFAULT_CANDIDATE_NAME: &str = "Candidat";
/// Summary shown when no match explanation came back.
pub const DEFAULT_SUMMARY: &str = "Aucune explication disponible";
/// Rating used when the score is missing or not positive.
const DEFAULT_RATING: i32 = 3;

/// Maps one raw backend record to one view-model record.
pub fn normalize(raw: RawCandidate) -> CandidateView {
    let rating = derive_rating(raw.score);

    CandidateView {
        candidate_name: non_empty(raw.name, DEFAULT_CANDIDATE_NAME),
        match_score: raw.score.map(|score| score.round() as i32).unwrap_or(0),
        summary: non_empty(raw.match_explanation, DEFAULT_SUMMARY),
        rating,
        strengths: raw.skills.unwrap_or_default(),
        // The backend never reports weaknesses; the slot stays empty.
        weaknesses: Vec::new(),
        suggested_questions: raw.interview_questions.unwrap_or_default(),
        skills: None,
        email: raw.email,
        phone: raw.phone,
        download_id: raw.download_id,
        experience: flatten_optional(raw.experience),
        education: flatten_optional(raw.education),
        languages: raw.languages,
    }
}

/// Maps a whole batch, preserving backend order.
pub fn normalize_all(raw: Vec<RawCandidate>) -> Vec<CandidateView> {
    raw.into_iter().map(normalize).collect()
}

/// Star rating on a 20-points-per-star scale, rounded up. Not clamped:
/// a score above 100 maps above 5.
fn derive_rating(score: Option<f64>) -> i32 {
    match score {
        Some(score) if score > 0.0 => (score / 20.0).ceil() as i32,
        _ => DEFAULT_RATING,
    }
}

fn non_empty(value: Option<String>, default: &str) -> String {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => default.to_string(),
    }
}

/// Collapses the string-or-list shape into one optional string. An empty
/// incoming string counts as absent; an empty list does not.
fn flatten_optional(field: Option<TextOrList>) -> Option<String> {
    match field {
        None => None,
        Some(TextOrList::Text(text)) if text.is_empty() => None,
        Some(value) => Some(value.flatten()),
    }
}
