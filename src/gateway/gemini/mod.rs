use crate::conversation::Turn;
use crate::core::error::GuideError;
use crate::gateway::GenerativeBackend;
use async_trait::async_trait;

mod client;
mod types;

pub use client::GeminiClient;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Clone)]
pub struct GeminiBackend {
    client: GeminiClient,
}

impl GeminiBackend {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self::with_endpoint(DEFAULT_BASE_URL.to_string(), api_key, model)
    }

    pub fn with_endpoint(endpoint: String, api_key: Option<String>, model: String) -> Self {
        Self {
            client: GeminiClient::new(endpoint, api_key.unwrap_or_default(), model),
        }
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    fn clone_backend(&self) -> Box<dyn GenerativeBackend> {
        Box::new(self.clone())
    }

    async fn generate(&self, instruction: &str, turns: &[Turn]) -> Result<String, GuideError> {
        self.client.generate_content(instruction, turns).await
    }
}
