// src/report.rs
//! Writes the published candidate list to disk for downstream HR tooling.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::types::candidate::CandidateView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
}

impl ReportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            _ => None,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

/// Writes the candidate list under the output directory and returns the
/// created path. File names are timestamped so repeated runs never
/// overwrite each other.
pub fn write_report(
    output_dir: &Path,
    candidates: &[CandidateView],
    format: ReportFormat,
) -> Result<PathBuf> {
    let file_name = format!(
        "candidates_{}.{}",
        chrono::Utc::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );
    let path = output_dir.join(file_name);

    match format {
        ReportFormat::Json => write_json(&path, candidates)?,
        ReportFormat::Csv => write_csv(&path, candidates)?,
    }

    Ok(path)
}

fn write_json(path: &Path, candidates: &[CandidateView]) -> Result<()> {
    let payload =
        serde_json::to_string_pretty(candidates).context("Failed to serialize candidates")?;
    std::fs::write(path, payload)
        .with_context(|| format!("Failed to write report: {}", path.display()))
}

fn write_csv(path: &Path, candidates: &[CandidateView]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create report: {}", path.display()))?;

    writer.write_record([
        "name",
        "score",
        "rating",
        "email",
        "phone",
        "summary",
        "strengths",
    ])?;

    for candidate in candidates {
        let score = candidate.match_score.to_string();
        let rating = candidate.rating.to_string();
        let strengths = candidate.strengths.join("; ");
        writer.write_record([
            candidate.candidate_name.as_str(),
            score.as_str(),
            rating.as_str(),
            candidate.email.as_deref().unwrap_or(""),
            candidate.phone.as_deref().unwrap_or(""),
            candidate.summary.as_str(),
            strengths.as_str(),
        ])?;
    }

    writer.flush().context("Failed to flush report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fallback::fallback_candidates;

    #[test]
    fn format_names_parse_case_insensitively() {
        assert_eq!(ReportFormat::from_name("json"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::from_name("CSV"), Some(ReportFormat::Csv));
        assert_eq!(ReportFormat::from_name("xml"), None);
    }

    #[test]
    fn json_report_round_trips_through_serde() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = fallback_candidates();

        let path = write_report(dir.path(), &candidates, ReportFormat::Json).unwrap();

        assert!(path.extension().is_some_and(|ext| ext == "json"));
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["candidateName"], "Jean Dupont");
        assert_eq!(rows[0]["matchScore"], 95);
        assert_eq!(rows[4]["rating"], 3);
    }

    #[test]
    fn csv_report_has_a_header_and_one_row_per_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = fallback_candidates();

        let path = write_report(dir.path(), &candidates, ReportFormat::Csv).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("name,score,rating"));
        assert!(lines[1].contains("Jean Dupont"));
        assert!(lines[1].contains("95"));
        assert!(lines[2].contains("marie.martin@example.com"));
    }

    #[test]
    fn empty_list_still_writes_a_header() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_report(dir.path(), &[], ReportFormat::Csv).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
