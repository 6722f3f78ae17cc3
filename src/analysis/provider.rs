// src/analysis/provider.rs
//! AI provider selection: optimistic switch, confirm-before-apply, and
//! revert on cancellation or backend rejection.

use tracing::{error, info};

use crate::analysis::AnalysisBackend;
use crate::error::WorkflowError;
use crate::notice::Notice;
use crate::types::response::{LlmStatus, LlmTestResponse, ProviderConfig, ProviderKind};

/// Question asked before a provider change is applied.
pub const CONFIRM_CHANGE_MESSAGE: &str =
    "Changer le fournisseur d'IA nécessite un redémarrage de l'application. Voulez-vous continuer?";
const STATUS_ERROR_DETAIL: &str = "Impossible de récupérer le statut de l'IA";
const CHANGE_SUCCESS_DETAIL: &str =
    "Fournisseur IA modifié avec succès. Veuillez redémarrer l'application.";
const CHANGE_ERROR_DETAIL: &str = "Erreur lors du changement de fournisseur IA";
const CHANGE_CANCELLED_DETAIL: &str = "Changement de fournisseur annulé";

/// Yes/no decision seam for the confirm-before-apply step. The CLI asks
/// on stdin; tests script the answer.
pub trait ConfirmProvider {
    fn confirm(&self, message: &str) -> bool;
}

/// How one selection change resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// Target already matches the confirmed provider; nothing was done.
    NoChange,
    /// Backend accepted the change; the confirmed provider moved.
    Applied,
    /// User declined the confirmation; selection reverted, no call made.
    Cancelled,
    /// Backend rejected the change; selection reverted.
    Failed,
}

/// Tracks the confirmed server-side provider and the visible selection,
/// which diverge only between a user pick and its resolution.
pub struct ProviderController<B, C> {
    backend: B,
    confirm: C,
    current: Option<ProviderKind>,
    selected: ProviderKind,
    status: Option<LlmStatus>,
    changing: bool,
    notices: Vec<Notice>,
}

impl<B: AnalysisBackend, C: ConfirmProvider> ProviderController<B, C> {
    pub fn new(backend: B, confirm: C) -> Self {
        Self {
            backend,
            confirm,
            current: None,
            selected: ProviderKind::Gemini,
            status: None,
            changing: false,
            notices: Vec::new(),
        }
    }

    /// Confirmed server-side provider, once a status fetch has succeeded.
    pub fn current(&self) -> Option<ProviderKind> {
        self.current
    }

    /// Externally visible selection.
    pub fn selection(&self) -> ProviderKind {
        self.selected
    }

    /// Last provider status fetched from the backend.
    pub fn status(&self) -> Option<&LlmStatus> {
        self.status.as_ref()
    }

    pub fn is_changing(&self) -> bool {
        self.changing
    }

    /// Mirror of the server provider configuration, derived from the
    /// confirmed provider and the last status.
    pub fn provider_config(&self) -> Option<ProviderConfig> {
        let provider = self.current?;
        let status = self.status.as_ref();
        Some(ProviderConfig {
            provider,
            enabled: status.map(|s| s.enabled).unwrap_or(false),
            accessible: status.map(|s| s.accessible).unwrap_or(false),
        })
    }

    /// Drains the user-facing notices queued since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// One-time status fetch. On failure the confirmed provider stays
    /// unknown and the selection keeps its default; an error notice is
    /// queued.
    pub async fn initialize(&mut self) {
        match self.backend.llm_status().await {
            Ok(status) => {
                if let Some(kind) = ProviderKind::from_name(&status.provider) {
                    self.current = Some(kind);
                    self.selected = kind;
                }
                info!(
                    "Provider status loaded: provider={}, enabled={}, accessible={}",
                    status.provider, status.enabled, status.accessible
                );
                self.status = Some(status);
            }
            Err(err) => {
                error!("Error fetching provider status: {}", err);
                self.notices.push(Notice::error("Erreur", STATUS_ERROR_DETAIL));
            }
        }
    }

    /// Drives one selection change end to end. The visible selection
    /// moves immediately; it is confirmed on success and reverted on
    /// cancellation or failure.
    pub async fn request_change(&mut self, target: ProviderKind) -> ChangeOutcome {
        if Some(target) == self.current {
            return ChangeOutcome::NoChange;
        }

        // Optimistic: the selection shows the target before the decision.
        self.selected = target;

        if !self.confirm.confirm(CONFIRM_CHANGE_MESSAGE) {
            self.revert_selection();
            self.notices
                .push(Notice::info("Annulé", CHANGE_CANCELLED_DETAIL));
            return ChangeOutcome::Cancelled;
        }

        info!("Requesting provider change to {}", target);
        self.changing = true;
        let result = self.backend.change_provider(target).await;
        self.changing = false;

        match result {
            Ok(response) => {
                self.current = Some(target);
                let detail = response
                    .success
                    .unwrap_or_else(|| CHANGE_SUCCESS_DETAIL.to_string());
                self.notices.push(Notice::success("Succès", detail));
                ChangeOutcome::Applied
            }
            Err(err) => {
                error!("Error changing provider: {}", err);
                let detail = err
                    .provider_detail()
                    .map(str::to_string)
                    .unwrap_or_else(|| CHANGE_ERROR_DETAIL.to_string());
                self.notices.push(Notice::error("Erreur", detail));
                self.revert_selection();
                ChangeOutcome::Failed
            }
        }
    }

    /// Forwards a test prompt to the given provider.
    pub async fn test_provider(
        &self,
        target: ProviderKind,
        prompt: &str,
    ) -> Result<LlmTestResponse, WorkflowError> {
        if prompt.trim().is_empty() {
            return Err(WorkflowError::Validation("Prompt requis".to_string()));
        }
        self.backend.test_provider(target, prompt).await
    }

    fn revert_selection(&mut self) {
        self.selected = self.current.unwrap_or(ProviderKind::Gemini);
    }
}
