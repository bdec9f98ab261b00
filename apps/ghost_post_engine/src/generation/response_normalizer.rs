use std::sync::OnceLock;

use anyhow::Context;
use jsonschema::Validator;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::generation_types::GenerationResult;
use crate::prompts::post_generator_prompt::PostGeneratorPrompt;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("model reply is empty")]
    Empty,

    #[error("model reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("model reply does not match the expected shape: {0}")]
    SchemaMismatch(String),
}

#[derive(Debug, Deserialize)]
struct ModelReply {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    posts: Option<Vec<String>>,
    #[serde(default)]
    items: Option<Vec<String>>,
}

fn leading_fence() -> &'static Regex {
    static LEADING: OnceLock<Regex> = OnceLock::new();
    LEADING.get_or_init(|| Regex::new(r"(?i)^```[a-z0-9_+\-]*[ \t]*\r?\n?").unwrap())
}

fn trailing_fence() -> &'static Regex {
    static TRAILING: OnceLock<Regex> = OnceLock::new();
    TRAILING.get_or_init(|| Regex::new(r"\s*```$").unwrap())
}

/// Removes one markdown code fence (optionally language-tagged) from each end.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let start = leading_fence()
        .find(trimmed)
        .map(|m| m.end())
        .unwrap_or(0);
    let rest = &trimmed[start..];
    let end = trailing_fence()
        .find(rest)
        .map(|m| m.start())
        .unwrap_or(rest.len());
    rest[..end].trim()
}

pub struct ResponseNormalizer {
    validator: Validator,
}

impl ResponseNormalizer {
    pub fn new() -> anyhow::Result<Self> {
        let schema: Value = serde_json::from_str(PostGeneratorPrompt::get_schema())
            .context("Failed to parse reply schema")?;
        let validator =
            jsonschema::validator_for(&schema).context("Failed to compile reply schema")?;

        Ok(Self { validator })
    }

    pub fn normalize(&self, raw: &str) -> Result<GenerationResult, NormalizeError> {
        let cleaned = strip_code_fences(raw);
        if cleaned.is_empty() {
            return Err(NormalizeError::Empty);
        }

        let value: Value = serde_json::from_str(cleaned)?;

        if !self.validator.is_valid(&value) {
            let details = self
                .validator
                .iter_errors(&value)
                .map(|e| e.to_string())
                .collect::<Vec<String>>()
                .join("; ");
            return Err(NormalizeError::SchemaMismatch(details));
        }

        let reply: ModelReply = serde_json::from_value(value)?;
        let posts = reply
            .posts
            .or(reply.items)
            .ok_or_else(|| NormalizeError::SchemaMismatch("missing posts".to_string()))?;

        Ok(GenerationResult {
            title: reply
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            posts,
        })
    }
}
