use super::TwitterClient;
use crate::error::{GifterError, Result};
use serde_json::Value;
use tracing::{debug, info};

const STATUS_ENDPOINT: &str = "1.1/statuses/show.json";

impl TwitterClient {
    /// Looks up a single status by id.
    ///
    /// The body is returned as-is whatever the HTTP status: error payloads
    /// such as `{"errors": [...]}` for deleted or private posts reach the
    /// caller untouched. Only network failures and non-JSON bodies fail here.
    pub async fn fetch_status(&self, id: &str, token: &str) -> Result<Value> {
        let mut url = self
            .endpoint(STATUS_ENDPOINT)
            .map_err(|e| GifterError::InvalidStatusReference(format!("{id}: {e}")))?;
        url.query_pairs_mut().append_pair("id", id);

        info!("Fetching status {}", id);

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| GifterError::from_request("status lookup", e))?;

        debug!("Status lookup responded with HTTP {}", response.status());

        let body: Value = response
            .json()
            .await
            .map_err(|e| GifterError::from_request("status lookup", e))?;

        debug!("Status payload: {}", body);
        Ok(body)
    }
}

/// Error messages from an API error payload, if the body is one.
pub fn api_errors(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .map(|e| {
                    e["message"]
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| e.to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}
