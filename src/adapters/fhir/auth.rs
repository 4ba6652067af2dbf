//! OAuth2 password grant against the clinical token endpoint

use super::models::{PasswordGrantRequest, TokenResponse};
use super::{build_http_client, TokenProvider};
use crate::config::{FhirConfig, SecretString};
use crate::domain::{AccessToken, AegisError, FhirError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;

/// Clinical system authentication client
///
/// Exchanges a user's username and password, together with the application's
/// client id and secret, for a bearer [`AccessToken`].
///
/// # Example
///
/// ```no_run
/// use aegis::adapters::fhir::FhirAuthClient;
/// use aegis::config::FhirConfig;
///
/// # async fn example() -> aegis::domain::Result<()> {
/// let client = FhirAuthClient::new(&FhirConfig::default())?;
/// let token = client.authenticate("clinician", "password").await?;
/// # Ok(())
/// # }
/// ```
pub struct FhirAuthClient {
    token_url: String,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    client: Client,
}

impl FhirAuthClient {
    pub fn new(config: &FhirConfig) -> Result<Self> {
        Ok(Self {
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            client: build_http_client(config)?,
        })
    }

    /// Request a token with the password grant
    ///
    /// Fails with a configuration error before any network call when the
    /// client id or secret is missing. HTTP 401 maps to
    /// [`FhirError::InvalidCredentials`]; every other failure, including a
    /// success response without a token, maps to
    /// [`FhirError::AuthenticationFailure`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AccessToken> {
        let client_id = self
            .client_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                AegisError::Configuration(
                    "fhir.client_id is required for clinical authentication".to_string(),
                )
            })?;

        let client_secret = self
            .client_secret
            .as_ref()
            .map(|s| s.expose_secret())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AegisError::Configuration(
                    "fhir.client_secret is required for clinical authentication".to_string(),
                )
            })?;

        tracing::debug!(
            token_url = %self.token_url,
            client_id = %client_id,
            "Requesting access token with password grant"
        );

        let request_body = PasswordGrantRequest {
            grant_type: "password",
            username,
            password,
            client_id,
            client_secret: client_secret.as_ref(),
        };

        let response = self
            .client
            .post(&self.token_url)
            .form(&request_body)
            .send()
            .await
            .map_err(|e| {
                FhirError::AuthenticationFailure(format!("Failed to request access token: {e}"))
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED => {
                tracing::warn!("Token endpoint rejected the supplied credentials");
                return Err(FhirError::InvalidCredentials.into());
            }
            status => {
                return Err(FhirError::AuthenticationFailure(format!(
                    "Token endpoint returned status {status}"
                ))
                .into());
            }
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            FhirError::AuthenticationFailure(format!("Failed to parse token response: {e}"))
        })?;

        let token_type = token_response.token_type.clone();
        let expires_in = token_response.expires_in;
        let access_token = token_response.into_access_token().ok_or_else(|| {
            FhirError::AuthenticationFailure(
                "Token response did not contain an access token".to_string(),
            )
        })?;

        tracing::info!(
            token_type = token_type.as_deref().unwrap_or("unspecified"),
            expires_in = ?expires_in,
            "Successfully acquired access token"
        );

        Ok(AccessToken::new(access_token))
    }
}

#[async_trait]
impl TokenProvider for FhirAuthClient {
    async fn authenticate(&self, username: &str, password: &str) -> Result<AccessToken> {
        FhirAuthClient::authenticate(self, username, password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config_with_client(id: Option<&str>, secret: Option<&str>) -> FhirConfig {
        FhirConfig {
            // Unroutable: any network attempt would fail as AuthenticationFailure
            token_url: "http://127.0.0.1:9/oauth2/token".to_string(),
            client_id: id.map(str::to_string),
            client_secret: secret.map(|s| secret_string(s.to_string())),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_client_id_is_configuration_error() {
        let client = FhirAuthClient::new(&config_with_client(None, Some("secret"))).unwrap();
        let err = client.authenticate("u", "p").await.unwrap_err();
        assert!(matches!(err, AegisError::Configuration(msg) if msg.contains("client_id")));
    }

    #[tokio::test]
    async fn test_empty_client_secret_is_configuration_error() {
        let client = FhirAuthClient::new(&config_with_client(Some("app"), Some(""))).unwrap();
        let err = client.authenticate("u", "p").await.unwrap_err();
        assert!(matches!(err, AegisError::Configuration(msg) if msg.contains("client_secret")));
    }

    #[tokio::test]
    async fn test_missing_client_secret_is_configuration_error() {
        let client = FhirAuthClient::new(&config_with_client(Some("app"), None)).unwrap();
        let err = client.authenticate("u", "p").await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
