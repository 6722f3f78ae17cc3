// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Base URL used when neither config.yaml nor TALENTIQ_API_URL says
/// otherwise.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub api_base_url: String,
    pub output_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration based on environment. A missing config.yaml is
    /// not fatal for a client tool; the env-var/default chain applies.
    pub fn load() -> Result<Self> {
        let environment = get_environment();
        info!("Loading configuration for environment: {}", environment);

        Self::load_for(&environment, Path::new("config.yaml"))
    }

    fn load_for(environment: &str, config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let api_base_url = std::env::var("TALENTIQ_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
            return Ok(Self {
                api_base_url: normalize_base_url(&api_base_url),
                output_path: PathBuf::from("output"),
            });
        }

        let config_content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config_file: ConfigFile = serde_yaml::from_str(&config_content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(Self {
            api_base_url: normalize_base_url(&env_config.api_base_url),
            output_path: env_config.output_path,
        })
    }

    /// Ensure the output directory exists.
    pub async fn ensure_directories(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.output_path)
            .await
            .with_context(|| {
                format!("Failed to create directory: {}", self.output_path.display())
            })?;
        Ok(())
    }
}

fn get_environment() -> String {
    std::env::var("TALENTIQ_ENV")
        .or_else(|_| std::env::var("ENVIRONMENT"))
        .or_else(|_| std::env::var("ENV"))
        .unwrap_or_else(|_| "local".to_string())
}

/// Endpoint paths are appended with a leading slash, so the base must not
/// end with one.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
