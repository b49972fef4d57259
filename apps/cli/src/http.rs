//! HTTP backend: talks to the analyze endpoint with reqwest.

use async_trait::async_trait;
use serde_json::{json, Value};

use promptlens_api::analysis::models::Analysis;

use crate::session::{AnalyzeBackend, BackendError};

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl AnalyzeBackend for HttpBackend {
    async fn analyze(&self, prompt: &str) -> Result<Analysis, BackendError> {
        let response = self
            .client
            .post(format!("{}/api/analyze", self.base_url))
            .json(&json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|_| BackendError::Unavailable)?;

        if !response.status().is_success() {
            // Prefer the server's error message; fall back to the generic one.
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("error")?.as_str().map(str::to_string));
            return Err(match message {
                Some(message) => BackendError::Server(message),
                None => BackendError::Unavailable,
            });
        }

        response
            .json::<Analysis>()
            .await
            .map_err(|_| BackendError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_the_base_url() {
        let backend = HttpBackend::new("http://localhost:8080/");
        assert_eq!(backend.base_url, "http://localhost:8080");
    }
}
