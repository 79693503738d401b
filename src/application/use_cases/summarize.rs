use crate::application::use_cases::research_context::research_context;
use crate::domain::article::Article;
use crate::domain::error::Result;
use crate::domain::llm_config::LlmConfig;
use crate::infrastructure::llm_clients::LlmClient;
use crate::infrastructure::response::clean_llm_response;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are an expert rehabilitation research summarizer. \
Provide concise, accurate summaries that highlight the most important findings \
and their clinical relevance.";

pub struct SummarizeUseCase {
    llm_client: Arc<dyn LlmClient + Send + Sync>,
    config: LlmConfig,
}

impl SummarizeUseCase {
    pub fn new(llm_client: Arc<dyn LlmClient + Send + Sync>, config: LlmConfig) -> Self {
        Self { llm_client, config }
    }

    /// Produce a structured high-level summary of the articles.
    pub async fn execute(&self, articles: &[Article]) -> Result<String> {
        if articles.is_empty() {
            return Ok("No articles to summarize.".to_string());
        }

        let context = research_context(articles);
        let user_prompt = format!(
            "Please provide a structured summary of the following {} rehabilitation research articles. Include:\n\
             1. Overall themes across the research\n\
             2. Key findings from each study\n\
             3. Common methodologies used\n\
             4. Gaps in the current research\n\
             5. Suggested directions for future research\n\n\
             Articles:\n{}",
            articles.len(),
            context
        );

        let raw_result = self
            .llm_client
            .generate(&self.config, SYSTEM_PROMPT, &user_prompt)
            .await?;

        Ok(clean_llm_response(&raw_result))
    }
}
