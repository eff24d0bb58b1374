//! OAuth refresh token exchange.
//!
//! Interactive consent (browser flow, loopback redirect) is out of scope for
//! this crate; the cached refresh token is the entry point. This module only
//! exchanges a refresh token for a short-lived access token.

use std::time::Duration;

use tracing::info;

use crate::error::{ApiError, ApiResult};

/// Google's OAuth 2.0 token endpoint.
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// OAuth client bound to one application's client id/secret.
#[derive(Debug)]
pub struct OAuthClient {
    client_id: String,
    client_secret: String,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Creates a new OAuth client.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            http_client,
        }
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// Returns the access token and its lifetime in seconds, when the server
    /// reports one.
    ///
    /// # Errors
    ///
    /// A rejected refresh token surfaces as an authentication error; the
    /// caller should clear the cached credential and re-authorize out of
    /// band.
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> ApiResult<(String, Option<i64>)> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http_client
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| ApiError::network(format!("token refresh request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ApiError::authentication(format!(
                "token refresh failed ({}): {}",
                status, body
            )));
        }

        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::invalid_response(format!("invalid token response: {}", e)))?;

        info!("successfully refreshed access token");
        Ok((token_response.access_token, token_response.expires_in))
    }
}

/// Response from the token endpoint.
#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}
