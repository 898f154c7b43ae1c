use anyhow::{bail, Result};
use clap::Args;
use std::sync::Arc;

use fitness_coach::config::AppConfig;
use fitness_coach::llm::OpenAiCompatibleClient;
use fitness_coach::services::InsightService;

#[derive(Args)]
pub struct ChatCommand {
    /// Question for the coach
    message: String,
}

impl ChatCommand {
    pub async fn execute(self, config: &AppConfig) -> Result<()> {
        if !config.llm.enabled {
            bail!("Text generation is not configured; set LLM_BASE_URL or LLM_API_KEY");
        }

        let client = OpenAiCompatibleClient::from_config(&config.llm)?;
        let reply = InsightService::new(Arc::new(client)).chat(&self.message).await?;
        println!("{}", reply);
        Ok(())
    }
}
