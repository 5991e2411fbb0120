use crate::api::RedditApiClient;
use linkharvest_core::{CoreError, Credentials, RedditApiError};
use serde::Deserialize;
use tracing::{debug, info};

/// Token endpoint path on the non-OAuth host.
const TOKEN_ENDPOINT: &str = "/api/v1/access_token";

/// Bearer token obtained through the password grant. Script-app tokens
/// last one hour, which a single run is expected to stay inside.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub scope: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl RedditApiClient {
    /// Authenticate a Reddit "script" app with the OAuth2 password grant.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken, CoreError> {
        let url = format!("{}{}", self.auth_base, TOKEN_ENDPOINT);
        let params = [
            ("grant_type", "password"),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];

        let _permit = self.rate_limiter.acquire_permit().await;
        info!("Requesting Reddit access token for u/{}", credentials.username);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .header("User-Agent", &self.user_agent)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CoreError::RedditApi(RedditApiError::RequestTimeout)
                } else {
                    CoreError::Network(e)
                }
            })?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(CoreError::RedditApi(RedditApiError::AuthenticationFailed {
                reason: "client id/secret rejected".to_string(),
            }));
        }
        if !status.is_success() {
            return Err(CoreError::RedditApi(RedditApiError::AuthenticationFailed {
                reason: format!("token endpoint returned status {status}"),
            }));
        }

        // Reddit reports grant failures as 200 with an error body.
        let body: TokenResponse = response.json().await.map_err(|_| {
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: "failed to parse token response".to_string(),
            })
        })?;

        if let Some(error) = body.error {
            return Err(CoreError::RedditApi(RedditApiError::AuthenticationFailed {
                reason: error,
            }));
        }

        match body.access_token {
            Some(access_token) => {
                debug!("Access token granted, scope: {:?}", body.scope);
                Ok(AccessToken {
                    access_token,
                    token_type: body.token_type.unwrap_or_else(|| "bearer".to_string()),
                    expires_in: body.expires_in.unwrap_or(3600),
                    scope: body.scope.unwrap_or_else(|| "*".to_string()),
                })
            }
            None => Err(CoreError::RedditApi(RedditApiError::AuthenticationFailed {
                reason: "token response missing access_token".to_string(),
            })),
        }
    }
}
