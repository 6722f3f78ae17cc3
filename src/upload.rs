// src/upload.rs
//! Staging area for resume files and the job offer text before
//! submission. Picker and drag-and-drop intake converge on the same
//! selection state.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::trace;

use crate::types::candidate::{AnalysisRequest, CvFile};

/// Drop-zone label shown while no file is selected.
pub const DEFAULT_FILE_LABEL: &str = "Glisser-déposer des fichiers ou cliquer pour parcourir";

#[derive(Debug, Default)]
pub struct UploadCollector {
    files: Vec<CvFile>,
    job_description: String,
    dragging: bool,
    loading: bool,
}

impl UploadCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picker intake: a non-empty pick replaces the whole selection, an
    /// empty one leaves it untouched.
    pub fn select_files(&mut self, files: Vec<CvFile>) {
        if !files.is_empty() {
            trace!("Selected {} file(s) from picker", files.len());
            self.files = files;
        }
    }

    /// Drag-and-drop intake. Same replacement rule as the picker; the
    /// drag highlight resets whether or not the payload carried files.
    pub fn drop_files(&mut self, files: Vec<CvFile>) {
        self.dragging = false;
        if !files.is_empty() {
            trace!("Dropped {} file(s)", files.len());
            self.files = files;
        }
    }

    pub fn drag_enter(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn selected_files(&self) -> &[CvFile] {
        &self.files
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    /// Drop-zone label: placeholder, single file name, or a count.
    pub fn file_label(&self) -> String {
        match self.files.len() {
            0 => DEFAULT_FILE_LABEL.to_string(),
            1 => self.files[0].name.clone(),
            n => format!("{} fichiers sélectionnés", n),
        }
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Snapshot of the current selection and description, verbatim.
    /// Checking the content is the submission pipeline's job.
    pub fn build_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            files: self.files.clone(),
            job_description: self.job_description.clone(),
        }
    }
}

/// Reads resume files from disk in argument order.
pub async fn read_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<CvFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        files.push(CvFile { name, bytes });
    }
    Ok(files)
}
