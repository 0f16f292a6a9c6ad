use crate::core::error::GuideError;
use reqwest::{Client, Response};
use serde::Serialize;

/// Thin JSON POST client for the generation endpoint. Authentication rides
/// on a query parameter, per the Gemini REST convention. No client-side
/// timeout is set; the endpoint's own bound is the effective one.
#[derive(Clone)]
pub struct ApiClient {
    endpoint: String,
    query: Vec<(String, String)>,
    client: Client,
}

impl ApiClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            query: Vec::new(),
            client: Client::new(),
        }
    }

    pub fn add_query_param(&mut self, key: &str, value: String) {
        self.query.push((key.to_string(), value));
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, GuideError> {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), path);
        let response = self
            .client
            .post(&url)
            .query(&self.query)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;
        Ok(response)
    }
}
