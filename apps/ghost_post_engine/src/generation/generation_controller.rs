use axum::{body::Bytes, routing::post, Extension, Json, Router};
use serde::Deserialize;

use super::generation_types::{GenerationRequest, GenerationResult, Platform, Tone};
use crate::{
    app_module::AppState,
    error::{GenerateError, INVALID_BODY_MESSAGE, MISSING_FIELDS_MESSAGE},
};

#[derive(Debug, Deserialize)]
pub struct GeneratePostsRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub vibe: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

impl GeneratePostsRequest {
    pub fn parse(body: &[u8]) -> Result<GenerationRequest, GenerateError> {
        let request: GeneratePostsRequest = serde_json::from_slice(body)
            .map_err(|_| GenerateError::Validation(INVALID_BODY_MESSAGE.to_string()))?;

        let content = request.content.filter(|c| !c.trim().is_empty());
        let vibe = request.vibe.filter(|v| !v.trim().is_empty());

        match (content, vibe) {
            (Some(content), Some(vibe)) => Ok(GenerationRequest {
                content,
                tone: Tone::parse(&vibe),
                platform: Platform::from_param(request.platform.as_deref()),
            }),
            _ => Err(GenerateError::Validation(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

pub fn generation_router() -> Router {
    Router::new().route("/", post(generate_posts))
}

pub async fn generate_posts(
    Extension(ctx): Extension<AppState>,
    body: Bytes,
) -> Result<Json<GenerationResult>, GenerateError> {
    let generation_service = &ctx.service.generation_service;

    // Credential first: a missing key fails the request before the body is looked at.
    generation_service.ensure_configured()?;

    let request = GeneratePostsRequest::parse(&body)?;
    let result = generation_service.generate(request).await?;

    Ok(Json(result))
}
