use std::sync::{Arc, Mutex};
use tracing::warn;

use crate::application::{AnalyzeUseCase, CompareUseCase, SummarizeUseCase};
use crate::domain::error::Result;
use crate::infrastructure::config::Settings;
use crate::infrastructure::llm_clients::{AnthropicClient, LlmClient};
use crate::infrastructure::pubmed::PubMedClient;
use crate::interfaces::http::AppState;

/// Assemble the clients, use cases, and shared state the HTTP layer serves.
pub fn build_state(settings: &Settings) -> Result<AppState> {
    if settings.llm.api_key.is_none() {
        warn!("No Anthropic API key configured; analysis endpoints will fail");
    }

    let pubmed = PubMedClient::new(&settings.eutils_base_url, &settings.pubmed_base_url)?;
    let llm_client: Arc<dyn LlmClient + Send + Sync> = Arc::new(AnthropicClient::new());

    Ok(AppState {
        pubmed,
        analyze_use_case: AnalyzeUseCase::new(llm_client.clone(), settings.llm.clone()),
        summarize_use_case: SummarizeUseCase::new(llm_client.clone(), settings.llm.clone()),
        compare_use_case: CompareUseCase::new(llm_client, settings.llm.clone()),
        max_articles: settings.max_articles,
        logs: Arc::new(Mutex::new(Vec::new())),
    })
}
