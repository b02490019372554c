//! HTTP transport for the move-suggestion service.

use super::{MoveSuggester, SuggestionRequest, SuggestionResponse, SuggestionUnavailable};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Client for a service exposing `POST /predict` and `GET /health`.
#[derive(Debug, Clone)]
pub struct HttpSuggester {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSuggester {
    /// Creates a client with a per-request timeout.
    ///
    /// A trailing slash on `base_url` is ignored.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self, SuggestionUnavailable> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build HTTP client");
                SuggestionUnavailable::new(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probes the health route.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn health(&self) -> Result<(), SuggestionUnavailable> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(error = ?e, "Health request failed");
            SuggestionUnavailable::new(format!("Health request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Service unhealthy");
            return Err(SuggestionUnavailable::new(format!(
                "Health check returned {}",
                status
            )));
        }

        info!("Suggestion service healthy");
        Ok(())
    }
}

#[async_trait]
impl MoveSuggester for HttpSuggester {
    #[instrument(skip(self, request), fields(base_url = %self.base_url, player = request.current_player))]
    async fn suggest(
        &self,
        request: SuggestionRequest,
    ) -> Result<SuggestionResponse, SuggestionUnavailable> {
        let url = format!("{}/predict", self.base_url);
        debug!(url = %url, "Sending suggestion request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = ?e, "Suggestion request failed");
                SuggestionUnavailable::new(format!("Suggestion request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(error = ?e, "Failed to read suggestion response");
            SuggestionUnavailable::new(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            warn!(status = %status, response = %body, "Suggestion service error");
            return Err(SuggestionUnavailable::new(format!(
                "Suggestion service error {}: {}",
                status, body
            )));
        }

        let suggestion: SuggestionResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = ?e, response = %body, "Failed to parse suggestion");
            SuggestionUnavailable::new(format!("Failed to parse response: {}", e))
        })?;

        info!(row = suggestion.row, col = suggestion.col, "Received suggestion");
        Ok(suggestion)
    }

    fn name(&self) -> &str {
        "http"
    }
}
