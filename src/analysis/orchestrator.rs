// src/analysis/orchestrator.rs
//! Drives one analysis request at a time and publishes the normalized
//! result list, falling back to placeholder candidates when the backend
//! cannot deliver real ones.

use tracing::{error, info, warn};

use crate::analysis::fallback::fallback_candidates;
use crate::analysis::AnalysisBackend;
use crate::error::WorkflowError;
use crate::normalizer::normalize_all;
use crate::notice::Notice;
use crate::types::candidate::{AnalysisRequest, CandidateView};
use crate::types::response::BackendResponse;

/// Rejection message when files or the job description are missing.
pub const VALIDATION_MESSAGE: &str =
    "Veuillez sélectionner au moins un fichier CV et saisir une description de poste.";
/// Alert shown when the request itself failed.
const PROCESSING_ERROR_MESSAGE: &str =
    "Une erreur est survenue lors du traitement des fichiers. Veuillez réessayer.";

/// Why placeholder results were published instead of real ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The response decoded but carried no candidate list. Silent: no
    /// user-facing alert, only a log line.
    MissingCandidates,
    /// The request failed in transit or the answer was unusable. The user
    /// sees an error notice.
    RequestFailed(String),
}

/// Result of one analyze-and-publish cycle. Both variants carry the list
/// that was published.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Real backend results, normalized.
    Analyzed(Vec<CandidateView>),
    /// Placeholder results standing in for unavailable real ones.
    FellBack(Vec<CandidateView>, FallbackReason),
}

impl AnalysisOutcome {
    pub fn candidates(&self) -> &[CandidateView] {
        match self {
            AnalysisOutcome::Analyzed(candidates) => candidates,
            AnalysisOutcome::FellBack(candidates, _) => candidates,
        }
    }

    pub fn fell_back(&self) -> bool {
        matches!(self, AnalysisOutcome::FellBack(..))
    }
}

/// Owns the published candidate list and the single-request-in-flight
/// rule. One instance per screening session.
pub struct AnalysisOrchestrator<B> {
    backend: B,
    results: Vec<CandidateView>,
    in_flight: bool,
    notices: Vec<Notice>,
}

impl<B: AnalysisBackend> AnalysisOrchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            results: Vec::new(),
            in_flight: false,
            notices: Vec::new(),
        }
    }

    /// Currently published candidate list. Empty while a request is in
    /// flight.
    pub fn results(&self) -> &[CandidateView] {
        &self.results
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Drains the user-facing notices queued since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Runs one full analyze-and-publish cycle. Validation failures and
    /// double submissions are rejected before any network traffic;
    /// everything after that resolves to a published list, real or
    /// placeholder.
    pub async fn submit(
        &mut self,
        request: AnalysisRequest,
    ) -> Result<AnalysisOutcome, WorkflowError> {
        if request.files.is_empty() || request.job_description.trim().is_empty() {
            return Err(WorkflowError::Validation(VALIDATION_MESSAGE.to_string()));
        }
        if self.in_flight {
            return Err(WorkflowError::AnalysisInProgress);
        }

        // Stale rows must never show next to the in-flight indicator.
        self.results.clear();
        self.in_flight = true;

        info!(
            "Submitting {} resume(s) for analysis against a {} character job offer",
            request.files.len(),
            request.job_description.len()
        );

        let response = self.backend.analyze(request).await;
        let outcome = self.publish(response);
        // Every completion path, fallback included, ends the submission.
        self.in_flight = false;

        Ok(outcome)
    }

    /// Re-publishes the stored results of an earlier batch through the
    /// same normalize-or-fallback pipeline.
    pub async fn fetch_batch(
        &mut self,
        batch_id: &str,
    ) -> Result<AnalysisOutcome, WorkflowError> {
        if self.in_flight {
            return Err(WorkflowError::AnalysisInProgress);
        }

        self.results.clear();
        self.in_flight = true;

        info!("Fetching stored results for batch {}", batch_id);

        let response = self.backend.batch_results(batch_id).await;
        let outcome = self.publish(response);
        self.in_flight = false;

        Ok(outcome)
    }

    fn publish(&mut self, response: Result<BackendResponse, WorkflowError>) -> AnalysisOutcome {
        let outcome = match response {
            Ok(BackendResponse {
                candidates: Some(raw),
                llm_info,
            }) => {
                if let Some(info) = llm_info {
                    info!(
                        "Results produced by provider {} (fallback mode: {})",
                        info.provider, info.use_fallback
                    );
                }
                info!("Received {} candidate(s) from the backend", raw.len());
                AnalysisOutcome::Analyzed(normalize_all(raw))
            }
            Ok(BackendResponse {
                candidates: None, ..
            }) => {
                warn!("No candidates in response, using placeholder results");
                AnalysisOutcome::FellBack(fallback_candidates(), FallbackReason::MissingCandidates)
            }
            Err(err) => {
                error!("Analysis request failed: {}", err);
                self.notices
                    .push(Notice::error("Erreur", PROCESSING_ERROR_MESSAGE));
                AnalysisOutcome::FellBack(
                    fallback_candidates(),
                    FallbackReason::RequestFailed(err.to_string()),
                )
            }
        };

        self.results = outcome.candidates().to_vec();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Severity;
    use crate::types::candidate::CvFile;
    use crate::types::response::{
        LlmStatus, LlmTestResponse, ProviderChangeResponse, ProviderKind,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Scripted backend: answers the next analyze/batch call with the
    /// stored response, then panics on further calls.
    #[derive(Clone, Default)]
    struct StubBackend {
        response: Arc<Mutex<Option<Result<BackendResponse, WorkflowError>>>>,
        calls: Arc<Mutex<u32>>,
    }

    impl StubBackend {
        fn returning(response: Result<BackendResponse, WorkflowError>) -> Self {
            Self {
                response: Arc::new(Mutex::new(Some(response))),
                calls: Arc::new(Mutex::new(0)),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }

        fn next_response(&self) -> Result<BackendResponse, WorkflowError> {
            *self.calls.lock().unwrap() += 1;
            self.response
                .lock()
                .unwrap()
                .take()
                .expect("backend called more often than scripted")
        }
    }

    #[async_trait]
    impl AnalysisBackend for StubBackend {
        async fn analyze(
            &self,
            _request: AnalysisRequest,
        ) -> Result<BackendResponse, WorkflowError> {
            self.next_response()
        }

        async fn batch_results(&self, _batch_id: &str) -> Result<BackendResponse, WorkflowError> {
            self.next_response()
        }

        async fn llm_status(&self) -> Result<LlmStatus, WorkflowError> {
            unreachable!("orchestrator never asks for provider status")
        }

        async fn change_provider(
            &self,
            _provider: ProviderKind,
        ) -> Result<ProviderChangeResponse, WorkflowError> {
            unreachable!("orchestrator never changes providers")
        }

        async fn test_provider(
            &self,
            _provider: ProviderKind,
            _prompt: &str,
        ) -> Result<LlmTestResponse, WorkflowError> {
            unreachable!("orchestrator never tests providers")
        }
    }

    fn request(file_count: usize, job: &str) -> AnalysisRequest {
        AnalysisRequest {
            files: (0..file_count)
                .map(|i| CvFile {
                    name: format!("cv_{i}.pdf"),
                    bytes: vec![0x25, 0x50, 0x44, 0x46],
                })
                .collect(),
            job_description: job.to_string(),
        }
    }

    fn backend_payload(json: &str) -> BackendResponse {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn submit_publishes_normalized_backend_results() {
        let stub = StubBackend::returning(Ok(backend_payload(
            r#"{"candidates": [{"name": "Marie Martin", "score": 87}, {"score": 40}]}"#,
        )));
        let mut orchestrator = AnalysisOrchestrator::new(stub.clone());

        let outcome = orchestrator
            .submit(request(2, "Développeur Angular confirmé"))
            .await
            .unwrap();

        assert!(!outcome.fell_back());
        let candidates = outcome.candidates();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].candidate_name, "Marie Martin");
        assert_eq!(candidates[1].candidate_name, "Candidat");
        assert_eq!(orchestrator.results(), candidates);
        assert!(!orchestrator.is_submitting());
        assert!(orchestrator.take_notices().is_empty());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn submit_rejects_missing_files_before_any_call() {
        let stub = StubBackend::default();
        let mut orchestrator = AnalysisOrchestrator::new(stub.clone());

        let err = orchestrator
            .submit(request(0, "Une offre"))
            .await
            .unwrap_err();

        match err {
            WorkflowError::Validation(message) => assert_eq!(message, VALIDATION_MESSAGE),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(stub.calls(), 0);
        assert!(!orchestrator.is_submitting());
    }

    #[tokio::test]
    async fn submit_rejects_blank_job_description() {
        let stub = StubBackend::default();
        let mut orchestrator = AnalysisOrchestrator::new(stub.clone());

        let err = orchestrator.submit(request(1, "   \n\t")).await.unwrap_err();

        assert!(matches!(err, WorkflowError::Validation(_)));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn missing_candidate_list_falls_back_silently() {
        let stub = StubBackend::returning(Ok(backend_payload(r#"{"candidates": null}"#)));
        let mut orchestrator = AnalysisOrchestrator::new(stub);

        let outcome = orchestrator
            .submit(request(1, "Poste de développeur"))
            .await
            .unwrap();

        match &outcome {
            AnalysisOutcome::FellBack(candidates, FallbackReason::MissingCandidates) => {
                assert_eq!(candidates.len(), 5);
                assert_eq!(candidates[0].candidate_name, "Jean Dupont");
            }
            other => panic!("expected silent fallback, got {other:?}"),
        }
        // Silent path: placeholder rows appear without an error notice.
        assert!(orchestrator.take_notices().is_empty());
        assert_eq!(orchestrator.results().len(), 5);
    }

    #[tokio::test]
    async fn empty_candidate_list_publishes_empty_real_results() {
        let stub = StubBackend::returning(Ok(backend_payload(r#"{"candidates": []}"#)));
        let mut orchestrator = AnalysisOrchestrator::new(stub);

        let outcome = orchestrator
            .submit(request(1, "Poste de développeur"))
            .await
            .unwrap();

        assert!(!outcome.fell_back());
        assert!(outcome.candidates().is_empty());
        assert!(orchestrator.results().is_empty());
    }

    #[tokio::test]
    async fn failed_request_falls_back_with_error_notice() {
        let stub = StubBackend::returning(Err(WorkflowError::Api {
            status: 500,
            detail: "boom".to_string(),
        }));
        let mut orchestrator = AnalysisOrchestrator::new(stub);

        let outcome = orchestrator
            .submit(request(1, "Poste de développeur"))
            .await
            .unwrap();

        match &outcome {
            AnalysisOutcome::FellBack(candidates, FallbackReason::RequestFailed(detail)) => {
                assert_eq!(candidates.len(), 5);
                assert!(detail.contains("500"));
            }
            other => panic!("expected noisy fallback, got {other:?}"),
        }

        let notices = orchestrator.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
        assert_eq!(notices[0].summary, "Erreur");
        assert!(notices[0].detail.contains("Veuillez réessayer"));
        // Drained once, gone.
        assert!(orchestrator.take_notices().is_empty());
        assert!(!orchestrator.is_submitting());
    }

    #[tokio::test]
    async fn undecodable_success_body_falls_back_noisily() {
        let stub = StubBackend::returning(Err(WorkflowError::Shape(
            "expected value at line 1".to_string(),
        )));
        let mut orchestrator = AnalysisOrchestrator::new(stub);

        let outcome = orchestrator
            .submit(request(1, "Poste de développeur"))
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            AnalysisOutcome::FellBack(_, FallbackReason::RequestFailed(_))
        ));
        assert_eq!(orchestrator.take_notices().len(), 1);
    }

    #[tokio::test]
    async fn previous_results_are_cleared_before_the_new_request() {
        let first = StubBackend::returning(Ok(backend_payload(
            r#"{"candidates": [{"name": "Ancien", "score": 50}]}"#,
        )));
        let mut orchestrator = AnalysisOrchestrator::new(first.clone());
        orchestrator
            .submit(request(1, "Première offre"))
            .await
            .unwrap();
        assert_eq!(orchestrator.results().len(), 1);

        *first.response.lock().unwrap() = Some(Ok(backend_payload(
            r#"{"candidates": [{"name": "Nouveau", "score": 60}, {"name": "Autre", "score": 55}]}"#,
        )));
        orchestrator
            .submit(request(1, "Deuxième offre"))
            .await
            .unwrap();

        assert_eq!(orchestrator.results().len(), 2);
        assert_eq!(orchestrator.results()[0].candidate_name, "Nouveau");
    }

    #[tokio::test]
    async fn fetch_batch_reuses_the_publish_pipeline() {
        let stub = StubBackend::returning(Ok(backend_payload(
            r#"{"candidates": [{"name": "Archivé", "score": 64}]}"#,
        )));
        let mut orchestrator = AnalysisOrchestrator::new(stub);

        let outcome = orchestrator.fetch_batch("batch-7").await.unwrap();

        assert!(!outcome.fell_back());
        assert_eq!(outcome.candidates()[0].candidate_name, "Archivé");
        assert_eq!(outcome.candidates()[0].rating, 4);
    }

    #[tokio::test]
    async fn fetch_batch_transport_failure_falls_back_noisily() {
        let stub = StubBackend::returning(Err(WorkflowError::Api {
            status: 404,
            detail: "batch not found".to_string(),
        }));
        let mut orchestrator = AnalysisOrchestrator::new(stub);

        let outcome = orchestrator.fetch_batch("missing").await.unwrap();

        assert!(outcome.fell_back());
        assert_eq!(orchestrator.take_notices().len(), 1);
    }

    #[tokio::test]
    async fn submission_stays_latched_while_a_request_is_unresolved() {
        struct HangingBackend;

        #[async_trait]
        impl AnalysisBackend for HangingBackend {
            async fn analyze(
                &self,
                _request: AnalysisRequest,
            ) -> Result<BackendResponse, WorkflowError> {
                std::future::pending().await
            }

            async fn batch_results(
                &self,
                _batch_id: &str,
            ) -> Result<BackendResponse, WorkflowError> {
                std::future::pending().await
            }

            async fn llm_status(&self) -> Result<LlmStatus, WorkflowError> {
                unreachable!()
            }

            async fn change_provider(
                &self,
                _provider: ProviderKind,
            ) -> Result<ProviderChangeResponse, WorkflowError> {
                unreachable!()
            }

            async fn test_provider(
                &self,
                _provider: ProviderKind,
                _prompt: &str,
            ) -> Result<LlmTestResponse, WorkflowError> {
                unreachable!()
            }
        }

        let mut orchestrator = AnalysisOrchestrator::new(HangingBackend);

        // Abandon a submission mid-flight. The backend call may still be
        // running server-side, so the controller keeps refusing new work.
        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            orchestrator.submit(request(1, "Offre")),
        )
        .await;
        assert!(timed_out.is_err());
        assert!(orchestrator.is_submitting());

        let err = orchestrator
            .submit(request(1, "Nouvelle offre"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::AnalysisInProgress));

        let err = orchestrator.fetch_batch("batch-1").await.unwrap_err();
        assert!(matches!(err, WorkflowError::AnalysisInProgress));
    }
}
