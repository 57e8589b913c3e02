use crate::config::Config;
use crate::providers::{Provider, ProviderConfig};
use anyhow::Result;
use clap::Args;

#[derive(Args, Clone, Default, Debug)]
pub struct CommonParams {
    /// Override default LLM provider
    #[arg(long, help = "Override default LLM provider", value_parser = available_providers_parser)]
    pub provider: Option<String>,

    /// Override the model used for analysis
    #[arg(short, long, help = "Override the model used for analysis")]
    pub model: Option<String>,

    /// LM Studio host, as host:port
    #[arg(long, help = "LM Studio host, as host:port (e.g. localhost:1234)")]
    pub host: Option<String>,
}

impl CommonParams {
    pub fn apply_to_config(&self, config: &mut Config) -> Result<bool> {
        let mut changes_made = false;

        if let Some(provider_str) = &self.provider {
            // Parse and validate provider
            let provider: Provider = provider_str.parse()?;
            let provider_name = provider.name().to_string();

            // Check if we need to update the default provider
            if config.default_provider != provider_name {
                // Ensure the provider exists in the providers HashMap
                if !config.providers.contains_key(&provider_name) {
                    config.providers.insert(
                        provider_name.clone(),
                        ProviderConfig::with_defaults(provider),
                    );
                }

                config.default_provider = provider_name;
                changes_made = true;
            }
        }

        if let Some(model) = &self.model
            && let Some(provider_config) = config.providers.get_mut(&config.default_provider)
            && provider_config.model != *model
        {
            provider_config.model = model.clone();
            changes_made = true;
        }

        if let Some(host) = &self.host
            && config.local_host != *host
        {
            config.local_host = host.clone();
            changes_made = true;
        }

        Ok(changes_made)
    }
}

/// Validates that a provider name is available in the system
pub fn available_providers_parser(s: &str) -> Result<String, String> {
    match s.parse::<Provider>() {
        Ok(provider) => Ok(provider.name().to_string()),
        Err(_) => Err(format!(
            "Invalid provider '{}'. Available providers: {}",
            s,
            Provider::all_names().join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_provider_override() {
        let mut config = Config::default();
        let params = CommonParams {
            provider: Some("lmstudio".to_string()),
            ..Default::default()
        };
        assert!(params.apply_to_config(&mut config).expect("params should apply"));
        assert_eq!(config.default_provider, "lmstudio");
    }

    #[test]
    fn test_apply_model_and_host() {
        let mut config = Config::default();
        let params = CommonParams {
            model: Some("gemini-2.5-pro".to_string()),
            host: Some("10.0.0.5:1234".to_string()),
            ..Default::default()
        };
        assert!(params.apply_to_config(&mut config).expect("params should apply"));
        assert_eq!(config.model_for(Provider::Gemini), "gemini-2.5-pro");
        assert_eq!(config.local_host, "10.0.0.5:1234");
    }

    #[test]
    fn test_providers_parser_rejects_unknown() {
        assert!(available_providers_parser("gemini").is_ok());
        assert!(available_providers_parser("openai").is_err());
    }
}
