// src/notice.rs
//! User-visible messages the workflow controllers queue for the display
//! surface to render.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// One toast-style message: a short summary plus a longer detail line.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Notice {
    pub fn success(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn info(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}
