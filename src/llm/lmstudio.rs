use super::{
    ANALYSIS_TIMEOUT, ClientError, DISCOVERY_TIMEOUT, GENERATION_TEMPERATURE, ProviderClient,
};
use crate::log_debug;
use crate::prompt;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Sentinel model name used when the local server cannot be queried
pub const FALLBACK_MODEL: &str = "local-model";

/// Client for a locally-hosted OpenAI-compatible server (LM Studio)
pub struct LmStudioClient {
    host: String,
    base_url: String,
    client: Client,
}

impl LmStudioClient {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            base_url: normalize_base_url(host),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List model identifiers the server reports; falls back to a single
    /// sentinel name on any failure so the caller always has a choice
    pub async fn list_models(&self) -> Vec<String> {
        match self.fetch_models().await {
            Ok(models) if !models.is_empty() => models,
            Ok(_) | Err(_) => vec![FALLBACK_MODEL.to_string()],
        }
    }

    /// Reachability check: connected flag plus a human-readable status line
    pub async fn health_check(&self) -> (bool, String) {
        match self.fetch_models().await {
            Ok(models) => (
                true,
                format!("Connected successfully. Found {} models.", models.len()),
            ),
            Err(ClientError::Timeout(_)) => (false, format!("Connection timeout to {}.", self.host)),
            Err(ClientError::Connection(_)) => (
                false,
                format!(
                    "Cannot connect to LM Studio at {}. Please ensure LM Studio is running.",
                    self.host
                ),
            ),
            Err(e) => (false, format!("Connection failed: {e}")),
        }
    }

    async fn fetch_models(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .timeout(DISCOVERY_TIMEOUT)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        if !response.status().is_success() {
            return Err(ClientError::Api(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::Api(e.to_string()))?;

        let models = body["data"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|m| m["id"].as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();
        Ok(models)
    }

    fn classify(&self, e: &reqwest::Error) -> ClientError {
        super::classify_transport_error(
            e,
            format!(
                "Cannot connect to LM Studio at {}. Please ensure LM Studio is running.",
                self.host
            ),
            "LM Studio request timed out. The model might be too slow or the request too complex."
                .to_string(),
        )
    }
}

#[async_trait]
impl ProviderClient for LmStudioClient {
    /// Sends an OpenAI-style chat completion request with a strict JSON
    /// schema response format
    async fn generate_analysis(&self, plan: &str, model: &str) -> Result<String, ClientError> {
        let payload = json!({
            "model": model,
            "messages": [
                {"role": "system", "content": prompt::ARCHITECT_SYSTEM_PROMPT},
                {"role": "user", "content": prompt::analysis_request(plan)}
            ],
            "temperature": GENERATION_TEMPERATURE,
            "stream": false,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "architecture_analysis",
                    "schema": prompt::response_schema(),
                    "strict": true
                }
            }
        });

        log_debug!("Sending chat completion to {} model {}", self.base_url, model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Content-Type", "application/json")
            .json(&payload)
            .timeout(ANALYSIS_TIMEOUT)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        tracing::debug!(status = %response.status(), model, "LM Studio response received");

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api(format!(
                "LM Studio API error: {status} - {text}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::Api(format!("Invalid LM Studio response body: {e}")))?;

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ClientError::Api("Failed to extract content from LM Studio response".to_string())
            })?;

        Ok(content.to_string())
    }
}

/// Normalize a user-supplied host to `http://host:port/v1`
fn normalize_base_url(host: &str) -> String {
    let with_scheme = if host.starts_with("http") {
        host.to_string()
    } else {
        format!("http://{host}")
    };
    let trimmed = with_scheme.trim_end_matches('/');
    if trimmed.ends_with("/v1") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/v1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        assert_eq!(
            normalize_base_url("localhost:1234"),
            "http://localhost:1234/v1"
        );
        assert_eq!(
            normalize_base_url("http://localhost:1234"),
            "http://localhost:1234/v1"
        );
        assert_eq!(
            normalize_base_url("http://localhost:1234/v1"),
            "http://localhost:1234/v1"
        );
        assert_eq!(
            normalize_base_url("https://remote:8080/"),
            "https://remote:8080/v1"
        );
    }
}
