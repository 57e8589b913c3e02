//! LLM backend configuration.
//!
//! Single source of truth for the two supported backends and their defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported inference backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Gemini cloud API
    #[default]
    Gemini,
    /// Locally-hosted OpenAI-compatible server
    LmStudio,
}

impl Provider {
    /// All available providers
    pub const ALL: &'static [Provider] = &[Provider::Gemini, Provider::LmStudio];

    /// Provider name as used in config files and CLI
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::LmStudio => "lmstudio",
        }
    }

    /// Human-readable label for status output
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Gemini => "Google Gemini",
            Self::LmStudio => "LM Studio (Local)",
        }
    }

    /// Default model for analysis
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.5-flash",
            Self::LmStudio => "local-model",
        }
    }

    /// Environment variable name for the API key
    pub const fn api_key_env(&self) -> &'static str {
        match self {
            Self::Gemini => "GOOGLE_API_KEY",
            Self::LmStudio => "",
        }
    }

    /// Whether this backend needs credentials at all
    pub const fn requires_api_key(&self) -> bool {
        matches!(self, Self::Gemini)
    }

    /// Get all provider names as strings
    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        // Handle the legacy "google" alias and LM Studio spellings
        let normalized = match lower.as_str() {
            "google" => "gemini",
            "lm-studio" | "lm_studio" | "local" => "lmstudio",
            other => other,
        };

        Self::ALL
            .iter()
            .find(|p| p.name() == normalized)
            .copied()
            .ok_or_else(|| ProviderError::Unknown(s.to_string()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Provider configuration error
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unknown provider: {0}. Supported: gemini, lmstudio")]
    Unknown(String),
    #[error("API key required for provider: {0}")]
    MissingApiKey(String),
}

/// Per-provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (loaded from env or config)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    /// Model used for analysis
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
}

impl ProviderConfig {
    /// Create config with defaults for a provider
    pub fn with_defaults(provider: Provider) -> Self {
        Self {
            api_key: String::new(),
            model: provider.default_model().to_string(),
        }
    }

    /// Get effective model (configured or default)
    pub fn effective_model(&self, provider: Provider) -> &str {
        if self.model.is_empty() {
            provider.default_model()
        } else {
            &self.model
        }
    }

    /// Check if this config has an API key set
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("gemini".parse::<Provider>().ok(), Some(Provider::Gemini));
        assert_eq!("LMSTUDIO".parse::<Provider>().ok(), Some(Provider::LmStudio));
        assert_eq!("google".parse::<Provider>().ok(), Some(Provider::Gemini)); // Legacy alias
        assert_eq!("local".parse::<Provider>().ok(), Some(Provider::LmStudio));
        assert!("invalid".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_defaults() {
        assert_eq!(Provider::Gemini.default_model(), "gemini-2.5-flash");
        assert_eq!(Provider::Gemini.api_key_env(), "GOOGLE_API_KEY");
        assert!(Provider::Gemini.requires_api_key());
        assert!(!Provider::LmStudio.requires_api_key());
    }

    #[test]
    fn test_provider_config_defaults() {
        let config = ProviderConfig::with_defaults(Provider::Gemini);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(!config.has_api_key());
        assert_eq!(config.effective_model(Provider::Gemini), "gemini-2.5-flash");
    }
}
