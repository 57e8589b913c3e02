#![allow(clippy::unwrap_used)]

use archimedes::config::Config;
use archimedes::llm::{self, GeminiClient, LmStudioClient};
use archimedes::providers::Provider;

#[test]
fn test_lmstudio_base_url_from_bare_host() {
    let client = LmStudioClient::new("localhost:1234");
    assert_eq!(client.base_url(), "http://localhost:1234/v1");

    let client = LmStudioClient::new("http://10.0.0.5:1234/v1");
    assert_eq!(client.base_url(), "http://10.0.0.5:1234/v1");
}

#[test]
fn test_gemini_availability_tracks_key() {
    assert!(!GeminiClient::new("").is_available());
    assert!(GeminiClient::new("some-key").is_available());
}

#[tokio::test]
async fn test_unreachable_local_server_falls_back_to_sentinel_model() {
    // Nothing listens on this port; discovery must degrade, not fail
    let client = LmStudioClient::new("localhost:59999");
    let models = client.list_models().await;
    assert_eq!(models, vec!["local-model".to_string()]);

    let (healthy, message) = client.health_check().await;
    assert!(!healthy);
    assert!(message.contains("localhost:59999"));
}

#[test]
fn test_create_client_for_each_provider() {
    let config = Config::default();
    // Both providers produce a client without touching the network
    for provider in Provider::ALL {
        let _client = llm::create_client(*provider, &config);
    }
}
