use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tone {
    Funny,
    Professional,
    Crazy,
    Custom(String),
}

impl Tone {
    /// Known tones match case-insensitively; anything else is kept verbatim.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "funny" => Tone::Funny,
            "professional" => Tone::Professional,
            "crazy" => Tone::Crazy,
            _ => Tone::Custom(value.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Tone::Funny => "Funny",
            Tone::Professional => "Professional",
            Tone::Crazy => "Crazy",
            Tone::Custom(label) => label,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    LinkedIn,
    Twitter,
}

impl Platform {
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("twitter") | Some("x") => Platform::Twitter,
            _ => Platform::LinkedIn,
        }
    }

    pub fn max_chars(&self) -> usize {
        match self {
            Platform::LinkedIn => 1500,
            Platform::Twitter => 280,
        }
    }

    /// Prefix used in history topics so entries from the two platforms can be told apart.
    pub fn topic_label(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "",
            Platform::Twitter => "(Twitter) ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub content: String,
    pub tone: Tone,
    pub platform: Platform,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub posts: Vec<String>,
}
