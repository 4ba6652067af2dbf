//! Wire models for the clinical OAuth endpoint

use serde::{Deserialize, Serialize};

/// OAuth2 password grant request, sent form-encoded
#[derive(Serialize)]
pub(crate) struct PasswordGrantRequest<'a> {
    pub grant_type: &'static str,
    pub username: &'a str,
    pub password: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// OAuth2 token response
///
/// Every field is optional on the wire. A response without a non-empty
/// `access_token` is rejected by the auth client, not by deserialization.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl TokenResponse {
    /// The access token, if present and non-empty
    pub fn into_access_token(self) -> Option<String> {
        self.access_token.filter(|t| !t.is_empty())
    }
}
