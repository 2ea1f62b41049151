//! LLM 层：客户端抽象与实现（OpenAI 兼容 / Mock / Scripted）

pub mod mock;
pub mod openai;
pub mod traits;

use std::sync::Arc;

pub use mock::{MockLlmClient, Scripted, ScriptedLlmClient};
pub use openai::OpenAiClient;
pub use traits::{LlmClient, LlmError};

use crate::config::AppConfig;

const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";

/// 按 [llm].provider 选择后端：ollama（默认）/ openai / mock
pub fn create_llm_from_config(cfg: &AppConfig) -> Arc<dyn LlmClient> {
    let provider = cfg.llm.provider.to_lowercase();
    match provider.as_str() {
        "mock" => {
            tracing::warn!("Using Mock LLM");
            Arc::new(MockLlmClient)
        }
        "openai" => {
            let api_key = cfg
                .llm
                .api_key
                .clone()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
            if api_key.is_none() {
                tracing::warn!("OPENAI_API_KEY not set, requests will likely be rejected");
            }
            tracing::info!("Using OpenAI LLM ({})", cfg.llm.model);
            Arc::new(OpenAiClient::new(
                cfg.llm.base_url.as_deref(),
                &cfg.llm.model,
                api_key.as_deref(),
            ))
        }
        other => {
            if other != "ollama" {
                tracing::warn!("Unknown LLM provider '{}', falling back to ollama", other);
            }
            let base = cfg.llm.base_url.as_deref().unwrap_or(OLLAMA_BASE_URL);
            tracing::info!("Using Ollama LLM ({}) at {}", cfg.llm.model, base);
            Arc::new(OpenAiClient::new(
                Some(base),
                &cfg.llm.model,
                Some(cfg.llm.api_key.as_deref().unwrap_or("ollama")),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_selection() {
        let mut cfg = AppConfig::default();
        cfg.llm.provider = "mock".into();
        assert_eq!(create_llm_from_config(&cfg).model_name(), "mock");

        cfg.llm.provider = "ollama".into();
        cfg.llm.model = "llama3.2:latest".into();
        assert_eq!(create_llm_from_config(&cfg).model_name(), "llama3.2:latest");
    }
}
