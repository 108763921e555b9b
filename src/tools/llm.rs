use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use rig::completion::Prompt;
use rig::prelude::*;
use rig::providers::openai;

type LlmAgent = rig::agent::Agent<openai::CompletionModel>;

/// A reasoning service that turns a prompt into a free-form text completion.
/// Callers treat it as a bounded-time black box; tests substitute
/// deterministic stubs or forced failures.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// OpenAI-backed reasoning service. Every call is bounded by a timeout so a
/// hung upstream cannot block a request indefinitely.
pub struct OpenAiBackend {
    agent: LlmAgent,
    timeout: Duration,
}

impl OpenAiBackend {
    pub fn from_env(timeout: Duration) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OpenAI API key not configured"))?;
        let client = openai::Client::new(&api_key);
        Ok(Self {
            agent: client.agent("gpt-4o-mini").build(),
            timeout,
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let reply = tokio::time::timeout(self.timeout, self.agent.prompt(prompt))
            .await
            .map_err(|_| anyhow::anyhow!("reasoning call timed out"))?
            .map_err(|e| anyhow::anyhow!("Prompt error: {}", e))?;
        Ok(reply)
    }
}
