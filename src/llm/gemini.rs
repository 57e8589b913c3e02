use super::{ANALYSIS_TIMEOUT, ClientError, GENERATION_TEMPERATURE, ProviderClient};
use crate::log_debug;
use crate::prompt;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Google Gemini generation API
pub struct GeminiClient {
    api_key: String,
    client: Client,
}

impl GeminiClient {
    /// Creates a new client; an empty key means the provider is unavailable
    /// until credentials are configured
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    /// Whether credentials were ever established
    pub fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[async_trait]
impl ProviderClient for GeminiClient {
    /// Generates an analysis using the Gemini API, asking the provider to
    /// constrain output to JSON at the transport level
    async fn generate_analysis(&self, plan: &str, model: &str) -> Result<String, ClientError> {
        if !self.is_available() {
            return Err(ClientError::Unavailable(
                "Google Gemini client not configured. Please set your GOOGLE_API_KEY.".to_string(),
            ));
        }

        let request_body = json!({
            "systemInstruction": {
                "parts": [{"text": prompt::ARCHITECT_SYSTEM_PROMPT}]
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [{"text": prompt::analysis_request(plan)}]
                }
            ],
            "generationConfig": {
                "temperature": GENERATION_TEMPERATURE,
                "responseMimeType": "application/json"
            }
        });

        let api_url = format!("{API_BASE}/models/{model}:generateContent?key={}", self.api_key);
        log_debug!("Sending analysis request to Gemini model {}", model);

        let response = self
            .client
            .post(api_url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .timeout(ANALYSIS_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                super::classify_transport_error(
                    &e,
                    format!("Cannot reach the Gemini API: {e}"),
                    "Gemini request timed out.".to_string(),
                )
            })?;

        tracing::debug!(status = %response.status(), model, "Gemini response received");

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api(format!(
                "Gemini API error: {status} - {text}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::Api(format!("Invalid Gemini response body: {e}")))?;

        // Response shape: candidates[0].content.parts[0].text
        let content = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                ClientError::Api("Failed to extract content from Gemini API response".to_string())
            })?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_unavailable() {
        let client = GeminiClient::new("");
        assert!(!client.is_available());
        let err = client
            .generate_analysis("# plan", "gemini-2.5-flash")
            .await
            .expect_err("should fail without credentials");
        assert!(matches!(err, ClientError::Unavailable(_)));
    }
}
