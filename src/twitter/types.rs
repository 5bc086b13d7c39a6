use serde::Deserialize;

/// Body of a successful `oauth2/token` exchange.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token_type: Option<String>,
    pub access_token: Option<String>,
}
