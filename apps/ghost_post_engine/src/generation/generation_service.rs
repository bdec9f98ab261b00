use std::sync::Arc;

use ghost_llm::LLMClient;
use tracing::Instrument;

use super::{
    generation_types::{GenerationRequest, GenerationResult},
    response_normalizer::ResponseNormalizer,
};
use crate::{
    error::GenerateError,
    history::{history_service::HistoryService, history_store::HistoryEntry},
    prompts::post_generator_prompt::PostGeneratorPrompt,
};

#[derive(Clone)]
pub struct GenerationService {
    llm_client: Option<Arc<LLMClient>>,
    normalizer: Arc<ResponseNormalizer>,
    history_service: HistoryService,
}

impl GenerationService {
    pub fn new(
        llm_client: Option<LLMClient>,
        history_service: HistoryService,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            llm_client: llm_client.map(Arc::new),
            normalizer: Arc::new(ResponseNormalizer::new()?),
            history_service,
        })
    }

    pub fn ensure_configured(&self) -> Result<&LLMClient, GenerateError> {
        self.llm_client
            .as_deref()
            .ok_or(GenerateError::Configuration)
    }

    /// Build -> invoke -> normalize. One model call, no retries.
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerateError> {
        let llm_client = self.ensure_configured()?;
        let span = tracing::info_span!(
            "generate",
            platform = ?request.platform,
            tone = %request.tone,
            model = llm_client.model()
        );

        async move {
            let prompt =
                PostGeneratorPrompt::get_prompt(&request.content, &request.tone, request.platform);
            tracing::debug!(prompt_chars = prompt.len(), "Prompt built");

            let raw = llm_client
                .generate_content(&prompt)
                .await
                .map_err(GenerateError::Upstream)?;
            tracing::debug!(reply_chars = raw.len(), "Model replied");

            let result = self
                .normalizer
                .normalize(&raw)
                .map_err(|source| GenerateError::MalformedResponse { source, raw })?;

            if result.posts.len() != PostGeneratorPrompt::POST_COUNT {
                tracing::warn!(
                    "Model returned {} posts, expected {}",
                    result.posts.len(),
                    PostGeneratorPrompt::POST_COUNT
                );
            }

            self.history_service
                .record(HistoryEntry::from_generation(&request, &result));

            tracing::info!(posts = result.posts.len(), "Generation succeeded");
            Ok(result)
        }
        .instrument(span)
        .await
    }
}
