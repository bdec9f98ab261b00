use anyhow::Result;
use async_trait::async_trait;

pub mod gemini;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LLMProvider {
    Gemini,
}

/// A text-in, text-out generative model backend.
#[async_trait]
pub trait LLMService {
    async fn generate_content(&self, prompt: &str) -> Result<String>;

    fn model(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct LLMClientConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl LLMClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for LLMClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

/// Single-shot client: one prompt, one outbound call, no retries.
pub struct LLMClient {
    service: Box<dyn LLMService + Send + Sync>,
}

impl LLMClient {
    pub fn new(provider: LLMProvider, config: LLMClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            anyhow::bail!("LLM API key is empty");
        }

        let service: Box<dyn LLMService + Send + Sync> = match provider {
            LLMProvider::Gemini => Box::new(gemini::GeminiService::new(config)),
        };

        Ok(Self { service })
    }

    pub fn from_service(service: Box<dyn LLMService + Send + Sync>) -> Self {
        Self { service }
    }

    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        tracing::debug!(
            model = self.service.model(),
            prompt_chars = prompt.len(),
            "Sending prompt to language model"
        );
        self.service.generate_content(prompt).await
    }

    pub fn model(&self) -> &str {
        self.service.model()
    }
}
