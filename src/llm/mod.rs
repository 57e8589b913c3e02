//! Provider clients: one capability, two backends.
//!
//! Both clients send the same system instruction (see [`crate::prompt`]) and
//! return raw text that is expected, but not guaranteed, to be JSON. No
//! automatic retry happens here; every failure is terminal for the request.

mod gemini;
mod lmstudio;

pub use gemini::GeminiClient;
pub use lmstudio::LmStudioClient;

use crate::config::Config;
use crate::providers::Provider;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Generation temperature used by both backends
pub const GENERATION_TEMPERATURE: f32 = 0.2;

/// Budget for one analysis request; local models can be slow
pub const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(120);

/// Budget for model discovery and health checks
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Failure taxonomy for the provider boundary
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credentials were never configured; permanent until reconfigured
    #[error("{0}")]
    Unavailable(String),
    /// Endpoint unreachable; user-retriable
    #[error("{0}")]
    Connection(String),
    /// Request exceeded the time budget; user-retriable
    #[error("{0}")]
    Timeout(String),
    /// Backend returned a non-success status, surfaced with its diagnostic text
    #[error("{0}")]
    Api(String),
}

/// The single capability both backends implement
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Send a plan for analysis and return the raw response text
    async fn generate_analysis(&self, plan: &str, model: &str) -> Result<String, ClientError>;
}

/// Build the client for the selected provider from configuration
pub fn create_client(provider: Provider, config: &Config) -> Box<dyn ProviderClient> {
    match provider {
        Provider::Gemini => Box::new(GeminiClient::new(config.api_key_for(Provider::Gemini))),
        Provider::LmStudio => Box::new(LmStudioClient::new(&config.local_host)),
    }
}

/// Map a reqwest failure onto the client error taxonomy, keeping the
/// backend-specific diagnostic text supplied by the caller.
fn classify_transport_error(
    e: &reqwest::Error,
    connection_msg: String,
    timeout_msg: String,
) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout(timeout_msg)
    } else if e.is_connect() {
        ClientError::Connection(connection_msg)
    } else {
        ClientError::Api(e.to_string())
    }
}
