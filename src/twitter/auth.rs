use super::{types::TokenResponse, TwitterClient};
use crate::config::Credentials;
use crate::error::{GifterError, Result};
use reqwest::{header::CONTENT_TYPE, StatusCode};
use tracing::{debug, info};

const TOKEN_ENDPOINT: &str = "oauth2/token";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";
const GRANT_BODY: &str = "grant_type=client_credentials";

impl TwitterClient {
    /// Exchanges consumer credentials for an application-only bearer token.
    ///
    /// The token is only returned if the response declares `token_type` as
    /// exactly `bearer`; anything else is an authorization failure even when
    /// an `access_token` is present.
    pub async fn acquire_token(&self, credentials: &Credentials) -> Result<String> {
        let url = self
            .endpoint(TOKEN_ENDPOINT)
            .map_err(|e| GifterError::Authorization(format!("invalid token endpoint: {e}")))?;

        info!("Requesting bearer token from {}", url);

        let response = self
            .http
            .post(url)
            .basic_auth(&credentials.key, Some(&credentials.secret))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(GRANT_BODY)
            .send()
            .await
            .map_err(|e| GifterError::from_request("token request", e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GifterError::Authorization(format!(
                "credentials rejected: HTTP {}",
                status
            )));
        }

        let response = response
            .error_for_status()
            .map_err(|e| GifterError::from_request("token request", e))?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| GifterError::from_request("token request", e))?;

        debug!("Token response type: {:?}", token.token_type);

        if token.token_type.as_deref() != Some("bearer") {
            return Err(GifterError::Authorization(format!(
                "unexpected token type {:?}",
                token.token_type.as_deref().unwrap_or("<none>")
            )));
        }

        let access_token = token.access_token.ok_or_else(|| {
            GifterError::Authorization("bearer response carried no access_token".to_string())
        })?;

        info!("Obtained bearer token");
        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{basic_auth, body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        Credentials {
            key: "consumer-key".to_string(),
            secret: "consumer-secret".to_string(),
        }
    }

    fn client_for(server: &MockServer) -> TwitterClient {
        let root = Url::parse(&format!("{}/", server.uri())).unwrap();
        TwitterClient::with_http(reqwest::Client::new(), root)
    }

    async fn mount_token(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_acquire_token_returns_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(basic_auth("consumer-key", "consumer-secret"))
            .and(header("content-type", FORM_CONTENT_TYPE))
            .and(body_string(GRANT_BODY))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"token_type": "bearer", "access_token": "T1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = client.acquire_token(&credentials()).await.unwrap();
        assert_eq!(token, "T1");
    }

    #[tokio::test]
    async fn test_non_bearer_token_is_rejected() {
        for token_type in ["mac", "Bearer", ""] {
            let server = MockServer::start().await;
            mount_token(
                &server,
                ResponseTemplate::new(200)
                    .set_body_json(json!({"token_type": token_type, "access_token": "T1"})),
            )
            .await;

            let client = client_for(&server);
            match client.acquire_token(&credentials()).await {
                Err(GifterError::Authorization(_)) => {}
                other => panic!("token_type {:?} gave {:?}", token_type, other),
            }
        }
    }

    #[tokio::test]
    async fn test_missing_token_type_is_rejected() {
        let server = MockServer::start().await;
        mount_token(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "T1"})),
        )
        .await;

        let client = client_for(&server);
        assert!(matches!(
            client.acquire_token(&credentials()).await,
            Err(GifterError::Authorization(_))
        ));
    }

    #[tokio::test]
    async fn test_bearer_without_access_token() {
        let server = MockServer::start().await;
        mount_token(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"token_type": "bearer"})),
        )
        .await;

        let client = client_for(&server);
        assert!(matches!(
            client.acquire_token(&credentials()).await,
            Err(GifterError::Authorization(_))
        ));
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let server = MockServer::start().await;
        mount_token(
            &server,
            ResponseTemplate::new(403)
                .set_body_json(json!({"errors": [{"code": 99, "message": "Unable to verify your credentials"}]})),
        )
        .await;

        let client = client_for(&server);
        assert!(matches!(
            client.acquire_token(&credentials()).await,
            Err(GifterError::Authorization(_))
        ));
    }

    #[tokio::test]
    async fn test_server_error_is_transport() {
        let server = MockServer::start().await;
        mount_token(&server, ResponseTemplate::new(503)).await;

        let client = client_for(&server);
        assert!(matches!(
            client.acquire_token(&credentials()).await,
            Err(GifterError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_slow_token_endpoint_times_out() {
        let server = MockServer::start().await;
        mount_token(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(json!({"token_type": "bearer", "access_token": "T1"}))
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .await;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(50))
            .build()
            .unwrap();
        let root = Url::parse(&format!("{}/", server.uri())).unwrap();
        let client = TwitterClient::with_http(http, root);

        assert!(matches!(
            client.acquire_token(&credentials()).await,
            Err(GifterError::Timeout { .. })
        ));
    }
}
