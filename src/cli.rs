// src/cli.rs
//! Command-line surface driving the analysis workflow

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::analysis::{
    AnalysisOrchestrator, AnalysisOutcome, ChangeOutcome, ConfirmProvider, FallbackReason,
    ProviderController,
};
use crate::core::ApiClient;
use crate::environment::{normalize_base_url, EnvironmentConfig};
use crate::notice::{Notice, Severity};
use crate::report::{write_report, ReportFormat};
use crate::types::candidate::CandidateView;
use crate::types::response::ProviderKind;
use crate::upload::{read_files, UploadCollector};

#[derive(Parser)]
#[command(name = "talentiq")]
#[command(about = "Screen resumes against a job offer with the TalentIQ analysis backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the backend base URL from configuration
    #[arg(long)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload resumes and rank them against a job offer
    Analyze {
        /// Resume files to analyze (PDF or text)
        #[arg(required = true)]
        cv_files: Vec<PathBuf>,
        /// Job offer text
        #[arg(long, conflicts_with = "job_offer_file")]
        job_offer: Option<String>,
        /// Read the job offer text from a file
        #[arg(long)]
        job_offer_file: Option<PathBuf>,
        /// Also write the ranked list to a report (json or csv)
        #[arg(long)]
        report: Option<String>,
    },
    /// Fetch the stored results of a previous analysis batch
    Results {
        batch_id: String,
        /// Also write the ranked list to a report (json or csv)
        #[arg(long)]
        report: Option<String>,
    },
    /// Download the stored resume of an analyzed candidate
    Download { download_id: String },
    /// Inspect or change the server-side AI provider
    Provider {
        #[command(subcommand)]
        command: ProviderCommand,
    },
}

#[derive(Subcommand)]
pub enum ProviderCommand {
    /// Show the current provider status
    Status,
    /// Switch to another provider (asks for confirmation)
    Set {
        /// Provider name: gemini or ollama
        provider: String,
        /// Apply without asking for confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Send a test prompt to a provider
    Test {
        /// Provider name: gemini or ollama
        provider: String,
        #[arg(long)]
        prompt: String,
    },
}

/// Asks the confirmation question on stdin. `--yes` short-circuits to
/// accept.
struct StdinConfirm {
    assume_yes: bool,
}

impl ConfirmProvider for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [o/N] ", message);
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(
            answer.trim().to_lowercase().as_str(),
            "o" | "oui" | "y" | "yes"
        )
    }
}

pub async fn handle_command(cli: Cli, config: EnvironmentConfig) -> Result<()> {
    let base_url = cli
        .api_url
        .map(|url| normalize_base_url(&url))
        .unwrap_or_else(|| config.api_base_url.clone());
    let client = ApiClient::new(base_url)?;

    match cli.command {
        Command::Analyze {
            cv_files,
            job_offer,
            job_offer_file,
            report,
        } => {
            let report_format = parse_report_format(report)?;
            let job_description = match (job_offer, job_offer_file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read job offer: {}", path.display()))?,
                (None, None) => {
                    anyhow::bail!("Provide the job offer with --job-offer or --job-offer-file")
                }
            };

            let mut collector = UploadCollector::new();
            collector.select_files(read_files(&cv_files).await?);
            collector.set_job_description(job_description);
            println!("📄 {}", collector.file_label());

            let mut orchestrator = AnalysisOrchestrator::new(client);
            collector.begin_loading();
            let submitted = orchestrator.submit(collector.build_request()).await;
            collector.finish_loading();

            let outcome = submitted?;
            render_notices(&orchestrator.take_notices());
            render_outcome(&outcome);

            if let Some(format) = report_format {
                config.ensure_directories().await?;
                let path = write_report(&config.output_path, outcome.candidates(), format)?;
                println!("✅ Rapport enregistré: {}", path.display());
            }
        }

        Command::Results { batch_id, report } => {
            let report_format = parse_report_format(report)?;

            let mut orchestrator = AnalysisOrchestrator::new(client);
            let outcome = orchestrator.fetch_batch(&batch_id).await?;
            render_notices(&orchestrator.take_notices());
            render_outcome(&outcome);

            if let Some(format) = report_format {
                config.ensure_directories().await?;
                let path = write_report(&config.output_path, outcome.candidates(), format)?;
                println!("✅ Rapport enregistré: {}", path.display());
            }
        }

        Command::Download { download_id } => {
            let bytes = client.download(&download_id).await?;
            config.ensure_directories().await?;
            let path = config.output_path.join(format!("cv_{download_id}.pdf"));
            tokio::fs::write(&path, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✅ Fichier enregistré: {}", path.display());
        }

        Command::Provider { command } => match command {
            ProviderCommand::Status => {
                let mut controller =
                    ProviderController::new(client, StdinConfirm { assume_yes: false });
                controller.initialize().await;
                render_notices(&controller.take_notices());
                render_status(&controller);
            }

            ProviderCommand::Set { provider, yes } => {
                let target = parse_provider(&provider)?;
                let mut controller =
                    ProviderController::new(client, StdinConfirm { assume_yes: yes });
                controller.initialize().await;
                render_notices(&controller.take_notices());

                let outcome = controller.request_change(target).await;
                render_notices(&controller.take_notices());
                match outcome {
                    ChangeOutcome::NoChange => {
                        println!("Le fournisseur {} est déjà actif.", target.label())
                    }
                    ChangeOutcome::Applied => {
                        println!("Fournisseur actif: {}", target.label())
                    }
                    ChangeOutcome::Cancelled | ChangeOutcome::Failed => {
                        println!("Fournisseur actif: {}", controller.selection().label())
                    }
                }
            }

            ProviderCommand::Test { provider, prompt } => {
                let target = parse_provider(&provider)?;
                let controller =
                    ProviderController::new(client, StdinConfirm { assume_yes: true });
                let answer = controller.test_provider(target, &prompt).await?;
                match (answer.response, answer.error) {
                    (Some(text), _) => println!("{text}"),
                    (None, Some(detail)) => {
                        anyhow::bail!("Test du fournisseur échoué: {detail}")
                    }
                    (None, None) => println!("(réponse vide)"),
                }
            }
        },
    }

    Ok(())
}

fn parse_provider(name: &str) -> Result<ProviderKind> {
    ProviderKind::from_name(name).ok_or_else(|| {
        anyhow::anyhow!("Provider non reconnu: {name}. Fournisseurs valides: gemini, ollama")
    })
}

fn parse_report_format(name: Option<String>) -> Result<Option<ReportFormat>> {
    match name {
        None => Ok(None),
        Some(name) => ReportFormat::from_name(&name)
            .map(Some)
            .ok_or_else(|| anyhow::anyhow!("Format de rapport inconnu: {name} (json ou csv)")),
    }
}

fn render_notices(notices: &[Notice]) {
    for notice in notices {
        let tag = match notice.severity {
            Severity::Success => "✅",
            Severity::Info => "ℹ️",
            Severity::Error => "❌",
        };
        eprintln!("{} {}: {}", tag, notice.summary, notice.detail);
    }
}

fn render_outcome(outcome: &AnalysisOutcome) {
    if let AnalysisOutcome::FellBack(_, reason) = outcome {
        match reason {
            FallbackReason::MissingCandidates => {
                println!("⚠️  Le serveur n'a renvoyé aucun candidat; résultats de démonstration.")
            }
            FallbackReason::RequestFailed(_) => {
                println!("⚠️  Analyse indisponible; résultats de démonstration.")
            }
        }
    }
    render_candidates(outcome.candidates());
}

fn render_candidates(candidates: &[CandidateView]) {
    if candidates.is_empty() {
        println!("Aucun candidat à afficher.");
        return;
    }

    println!();
    println!(
        "{:<3} {:<25} {:>6} {:>6}  {}",
        "#", "Candidat", "Score", "Note", "Résumé"
    );
    println!("{}", "-".repeat(100));

    for (index, candidate) in candidates.iter().enumerate() {
        println!(
            "{:<3} {:<25} {:>5}% {:>4}/5  {}",
            index + 1,
            candidate.candidate_name,
            candidate.match_score,
            candidate.rating,
            candidate.summary
        );
        if let (Some(email), Some(phone)) = (&candidate.email, &candidate.phone) {
            println!("    Contact: {} / {}", email, phone);
        }
        if !candidate.strengths.is_empty() {
            println!("    Atouts: {}", candidate.strengths.join(", "));
        }
        for question in &candidate.suggested_questions {
            println!("    • {}", question);
        }
    }
}

fn render_status<B, C>(controller: &ProviderController<B, C>)
where
    B: crate::analysis::AnalysisBackend,
    C: ConfirmProvider,
{
    let Some(status) = controller.status() else {
        println!("Statut de l'IA indisponible.");
        return;
    };

    let provider_label = ProviderKind::from_name(&status.provider)
        .map(|kind| kind.label().to_string())
        .unwrap_or_else(|| status.provider.clone());

    println!("Fournisseur: {}", provider_label);
    println!("  Activé:       {}", oui_non(status.enabled));
    println!("  Accessible:   {}", oui_non(status.accessible));
    println!("  Mode secours: {}", oui_non(status.fallback_mode));
    if !status.gemini_api_key.is_empty() {
        println!("  Clé Gemini:   {}", status.gemini_api_key);
    }
    if !status.ollama_api_url.is_empty() {
        println!("  Ollama:       {} ({})", status.ollama_api_url, status.ollama_model);
    }
}

fn oui_non(value: bool) -> &'static str {
    if value {
        "oui"
    } else {
        "non"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_declaration_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_parses_files_and_job_offer() {
        let cli = Cli::parse_from([
            "talentiq",
            "analyze",
            "--job-offer",
            "Développeur Rust",
            "--report",
            "csv",
            "cv1.pdf",
            "cv2.pdf",
        ]);

        match cli.command {
            Command::Analyze {
                cv_files,
                job_offer,
                job_offer_file,
                report,
            } => {
                assert_eq!(cv_files.len(), 2);
                assert_eq!(job_offer.as_deref(), Some("Développeur Rust"));
                assert!(job_offer_file.is_none());
                assert_eq!(report.as_deref(), Some("csv"));
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn analyze_requires_at_least_one_file() {
        let result = Cli::try_parse_from(["talentiq", "analyze", "--job-offer", "Offre"]);
        assert!(result.is_err());
    }

    #[test]
    fn job_offer_sources_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "talentiq",
            "analyze",
            "--job-offer",
            "Offre",
            "--job-offer-file",
            "offre.txt",
            "cv.pdf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn provider_set_parses_the_yes_flag() {
        let cli = Cli::parse_from(["talentiq", "provider", "set", "ollama", "--yes"]);
        match cli.command {
            Command::Provider {
                command: ProviderCommand::Set { provider, yes },
            } => {
                assert_eq!(provider, "ollama");
                assert!(yes);
            }
            _ => panic!("expected provider set command"),
        }
    }

    #[test]
    fn unknown_provider_names_are_rejected_with_the_valid_list() {
        let err = parse_provider("mistral").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("mistral"));
        assert!(message.contains("gemini"));
        assert!(message.contains("ollama"));
    }

    #[test]
    fn report_format_argument_is_validated() {
        assert_eq!(
            parse_report_format(Some("json".to_string())).unwrap(),
            Some(ReportFormat::Json)
        );
        assert_eq!(parse_report_format(None).unwrap(), None);
        assert!(parse_report_format(Some("xml".to_string())).is_err());
    }

    #[test]
    fn api_url_override_is_global() {
        let cli = Cli::parse_from([
            "talentiq",
            "--api-url",
            "http://10.0.0.5:8080/",
            "results",
            "batch-42",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.5:8080/"));
        match cli.command {
            Command::Results { batch_id, report } => {
                assert_eq!(batch_id, "batch-42");
                assert!(report.is_none());
            }
            _ => panic!("expected results command"),
        }
    }
}
