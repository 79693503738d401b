use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LlmConfig;

/// Runtime settings, assembled from defaults and `REHAB_`-prefixed
/// environment variables (nested fields use `__`, e.g. `REHAB_LLM__MODEL`).
/// `ANTHROPIC_API_KEY` is honored directly as a fallback for the LLM key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub port: u16,
    pub pubmed_base_url: String,
    pub eutils_base_url: String,
    pub max_articles: usize,
    pub llm: LlmConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 5000,
            pubmed_base_url: "https://pubmed.ncbi.nlm.nih.gov".to_string(),
            eutils_base_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string(),
            max_articles: 10,
            llm: LlmConfig::default(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let mut settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Env::prefixed("REHAB_").split("__"))
            .extract()
            .map_err(|e| AppError::Internal(format!("Failed to load settings: {}", e)))?;

        if settings.llm.api_key.as_deref().map_or(true, str::is_empty) {
            if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
                if !key.is_empty() {
                    settings.llm.api_key = Some(key);
                }
            }
        }

        Ok(settings)
    }
}
