use crate::log_debug;
use crate::providers::{Provider, ProviderConfig};

use anyhow::{Context, Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Default host for the local backend
pub const DEFAULT_LOCAL_HOST: &str = "localhost:1234";

/// Configuration structure for the Archimedes application
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Default inference backend
    pub default_provider: String,
    /// Provider-specific configurations
    pub providers: HashMap<String, ProviderConfig>,
    /// Host of the local OpenAI-compatible server
    #[serde(default = "default_local_host")]
    pub local_host: String,
    /// Directory exported reports are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

fn default_local_host() -> String {
    DEFAULT_LOCAL_HOST.to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("exports")
}

impl Default for Config {
    fn default() -> Self {
        let mut providers = HashMap::new();
        for provider in Provider::ALL {
            providers.insert(
                provider.name().to_string(),
                ProviderConfig::with_defaults(*provider),
            );
        }
        Self {
            default_provider: Provider::default().name().to_string(),
            providers,
            local_host: default_local_host(),
            export_dir: default_export_dir(),
        }
    }
}

impl Config {
    /// Load the configuration from the file, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let config = if config_path.exists() {
            let config_content = fs::read_to_string(&config_path)?;
            toml::from_str(&config_content)?
        } else {
            Self::default()
        };
        log_debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Save the configuration to the file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        let config_content = toml::to_string(self)?;
        fs::write(config_path, config_content)?;
        log_debug!("Configuration saved: {:?}", self);
        Ok(())
    }

    /// Get the path to the configuration file
    fn get_config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("archimedes");
        fs::create_dir_all(&path)?;
        path.push("config.toml");
        Ok(path)
    }

    /// Get the configuration for a specific provider
    pub fn get_provider_config(&self, provider: Provider) -> Option<&ProviderConfig> {
        self.providers.get(provider.name())
    }

    /// Effective API key for a provider: config first, then its environment
    /// variable. Empty means credentials were never established.
    pub fn api_key_for(&self, provider: Provider) -> String {
        if let Some(pc) = self.get_provider_config(provider)
            && pc.has_api_key()
        {
            return pc.api_key.clone();
        }
        if provider.requires_api_key() {
            std::env::var(provider.api_key_env()).unwrap_or_default()
        } else {
            String::new()
        }
    }

    /// Effective model for a provider, honoring the configured override
    pub fn model_for(&self, provider: Provider) -> String {
        self.get_provider_config(provider)
            .map_or_else(
                || provider.default_model().to_string(),
                |pc| pc.effective_model(provider).to_string(),
            )
    }

    /// Update the configuration with new values
    pub fn update(
        &mut self,
        provider: Option<String>,
        api_key: Option<String>,
        model: Option<String>,
        local_host: Option<String>,
        export_dir: Option<PathBuf>,
    ) -> Result<()> {
        if let Some(provider_str) = provider {
            let parsed: Provider = provider_str.parse()?;
            self.default_provider = parsed.name().to_string();
            self.providers
                .entry(parsed.name().to_string())
                .or_insert_with(|| ProviderConfig::with_defaults(parsed));
        }

        let provider_config = self
            .providers
            .get_mut(&self.default_provider)
            .context("Could not get default provider")?;

        if let Some(key) = api_key {
            provider_config.api_key = key;
        }
        if let Some(model) = model {
            provider_config.model = model;
        }
        if let Some(host) = local_host {
            self.local_host = host;
        }
        if let Some(dir) = export_dir {
            self.export_dir = dir;
        }

        log_debug!("Configuration updated: {:?}", self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_both_providers() {
        let config = Config::default();
        assert_eq!(config.default_provider, "gemini");
        assert!(config.providers.contains_key("gemini"));
        assert!(config.providers.contains_key("lmstudio"));
        assert_eq!(config.local_host, DEFAULT_LOCAL_HOST);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).expect("config should serialize");
        let parsed: Config = toml::from_str(&serialized).expect("config should deserialize");
        assert_eq!(parsed.default_provider, config.default_provider);
        assert_eq!(parsed.local_host, config.local_host);
    }

    #[test]
    fn test_update_switches_provider() {
        let mut config = Config::default();
        config
            .update(
                Some("lmstudio".to_string()),
                None,
                Some("mistral-7b".to_string()),
                Some("remote:9999".to_string()),
                None,
            )
            .expect("update should succeed");
        assert_eq!(config.default_provider, "lmstudio");
        assert_eq!(config.model_for(Provider::LmStudio), "mistral-7b");
        assert_eq!(config.local_host, "remote:9999");
    }
}
