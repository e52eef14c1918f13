//! A generic OpenID Connect client for the authorization code flow.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::{OAuthError, OAuthProfile, OAuthProvider, Provider};
use crate::config::ProviderCredentials;

const SCOPES: &str = "openid profile email";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Standard OpenID userinfo claims.
#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    name: Option<String>,
    email: Option<String>,
    picture: Option<String>,
}

impl From<UserInfo> for OAuthProfile {
    fn from(info: UserInfo) -> Self {
        OAuthProfile {
            provider_id: info.sub,
            display_name: info.name,
            email: info.email,
            picture: info.picture,
        }
    }
}

/// An OAuth provider speaking OpenID Connect.
#[derive(Debug, Clone)]
pub struct OidcProvider {
    provider: Provider,
    credentials: ProviderCredentials,
    authorize_endpoint: String,
    token_endpoint: String,
    userinfo_endpoint: String,
    client: Client,
}

impl OidcProvider {
    pub fn google(credentials: ProviderCredentials) -> Self {
        OidcProvider::new(
            Provider::Google,
            credentials,
            "https://accounts.google.com/o/oauth2/v2/auth",
            "https://oauth2.googleapis.com/token",
            "https://openidconnect.googleapis.com/v1/userinfo",
        )
    }

    pub fn linkedin(credentials: ProviderCredentials) -> Self {
        OidcProvider::new(
            Provider::Linkedin,
            credentials,
            "https://www.linkedin.com/oauth/v2/authorization",
            "https://www.linkedin.com/oauth/v2/accessToken",
            "https://api.linkedin.com/v2/userinfo",
        )
    }

    pub fn new(
        provider: Provider,
        credentials: ProviderCredentials,
        authorize_endpoint: &str,
        token_endpoint: &str,
        userinfo_endpoint: &str,
    ) -> Self {
        OidcProvider {
            provider,
            credentials,
            authorize_endpoint: authorize_endpoint.to_owned(),
            token_endpoint: token_endpoint.to_owned(),
            userinfo_endpoint: userinfo_endpoint.to_owned(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl OAuthProvider for OidcProvider {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn authorization_url(&self, state: &str) -> Result<String, OAuthError> {
        let url = Url::parse_with_params(
            &self.authorize_endpoint,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("redirect_uri", self.credentials.callback_url.as_str()),
                ("response_type", "code"),
                ("scope", SCOPES),
                ("state", state),
            ],
        )
        .map_err(|e| OAuthError::Configuration(e.to_string()))?;
        Ok(url.into())
    }

    async fn fetch_profile(&self, code: &str) -> Result<OAuthProfile, OAuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.credentials.callback_url.as_str()),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];

        let token: TokenResponse = self
            .client
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let info: UserInfo = self
            .client
            .get(&self.userinfo_endpoint)
            .bearer_auth(token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(info.into())
    }
}
