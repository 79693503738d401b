pub mod anthropic;

use crate::domain::error::Result;
use crate::domain::llm_config::LlmConfig;
use async_trait::async_trait;

pub use anthropic::AnthropicClient;

#[async_trait]
pub trait LlmClient {
    async fn generate(&self, config: &LlmConfig, system: &str, user: &str) -> Result<String>;
}
