use crate::application::use_cases::research_context::research_context;
use crate::domain::article::Article;
use crate::domain::error::Result;
use crate::domain::llm_config::LlmConfig;
use crate::infrastructure::llm_clients::LlmClient;
use crate::infrastructure::response::clean_llm_response;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are an expert rehabilitation research analyst. Your role is to:\n\
1. Synthesize findings from multiple research articles\n\
2. Identify key trends, methodologies, and outcomes in rehabilitation science\n\
3. Provide evidence-based insights with proper citations to the source articles\n\
4. Highlight areas of consensus and disagreement among studies\n\
5. Suggest practical implications for rehabilitation practitioners\n\n\
Always cite specific articles when making claims. Be thorough but accessible.";

pub struct AnalyzeUseCase {
    llm_client: Arc<dyn LlmClient + Send + Sync>,
    config: LlmConfig,
}

impl AnalyzeUseCase {
    pub fn new(llm_client: Arc<dyn LlmClient + Send + Sync>, config: LlmConfig) -> Self {
        Self { llm_client, config }
    }

    /// Answer a user question against the given research articles.
    pub async fn execute(&self, articles: &[Article], question: &str) -> Result<String> {
        if articles.is_empty() {
            return Ok(
                "No articles were found for this query. Please try a different search term."
                    .to_string(),
            );
        }

        let context = research_context(articles);
        let user_prompt = format!(
            "Based on the following rehabilitation research articles, please answer this question:\n\n\
             Question: {}\n\n\
             Research Articles:\n{}\n\n\
             Provide a comprehensive analysis with citations to specific articles.",
            question, context
        );

        let raw_result = self
            .llm_client
            .generate(&self.config, SYSTEM_PROMPT, &user_prompt)
            .await?;

        Ok(clean_llm_response(&raw_result))
    }
}
