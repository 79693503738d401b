use crate::application::use_cases::research_context::research_context;
use crate::domain::article::Article;
use crate::domain::error::Result;
use crate::domain::llm_config::LlmConfig;
use crate::infrastructure::llm_clients::LlmClient;
use crate::infrastructure::response::clean_llm_response;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are an expert rehabilitation research analyst specializing in \
evidence-based treatment comparison. Provide balanced, objective comparisons \
grounded in the available research.";

pub struct CompareUseCase {
    llm_client: Arc<dyn LlmClient + Send + Sync>,
    config: LlmConfig,
}

impl CompareUseCase {
    pub fn new(llm_client: Arc<dyn LlmClient + Send + Sync>, config: LlmConfig) -> Self {
        Self { llm_client, config }
    }

    /// Compare two rehabilitation treatments against the given research.
    pub async fn execute(
        &self,
        articles: &[Article],
        treatment_a: &str,
        treatment_b: &str,
    ) -> Result<String> {
        let context = research_context(articles);
        let user_prompt = format!(
            "Based on the following research articles, compare these two rehabilitation approaches:\n\n\
             Treatment A: {}\n\
             Treatment B: {}\n\n\
             Please compare them on:\n\
             1. Efficacy and outcomes\n\
             2. Patient populations studied\n\
             3. Duration and intensity of treatment\n\
             4. Side effects or limitations\n\
             5. Cost-effectiveness (if mentioned)\n\
             6. Overall recommendation based on evidence\n\n\
             Research Articles:\n{}",
            treatment_a, treatment_b, context
        );

        let raw_result = self
            .llm_client
            .generate(&self.config, SYSTEM_PROMPT, &user_prompt)
            .await?;

        Ok(clean_llm_response(&raw_result))
    }
}
