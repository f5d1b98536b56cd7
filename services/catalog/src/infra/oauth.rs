use anyhow::Context as _;
use serde::Deserialize;
use url::Url;

use crate::domain::repository::GoogleOAuthPort;
use crate::domain::types::GoogleProfile;
use crate::error::CatalogError;

const AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Clone)]
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_url: String,
}

impl GoogleOAuthClient {
    pub fn new(client_id: String, client_secret: String, redirect_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret,
            redirect_url,
        }
    }

    /// Where to send the browser to start the consent flow.
    pub fn authorize_url(&self) -> String {
        // The endpoint is a constant, so parsing cannot fail at runtime.
        let url = Url::parse_with_params(
            AUTHORIZE_ENDPOINT,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", "profile email"),
            ],
        )
        .expect("static authorize endpoint");
        url.into()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfoResponse {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl GoogleOAuthPort for GoogleOAuthClient {
    async fn exchange_code(&self, code: &str) -> Result<GoogleProfile, CatalogError> {
        let token: TokenResponse = self
            .http
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", &self.client_id),
                ("client_secret", &self.client_secret),
                ("redirect_uri", &self.redirect_url),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .context("request google token")?
            .error_for_status()
            .context("google token endpoint rejected the code")?
            .json()
            .await
            .context("decode google token response")?;

        let info: UserInfoResponse = self
            .http
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .context("request google userinfo")?
            .error_for_status()
            .context("google userinfo endpoint failed")?
            .json()
            .await
            .context("decode google userinfo response")?;

        Ok(GoogleProfile {
            id: info.id,
            display_name: info.name.unwrap_or_default(),
            emails: info.email.into_iter().collect(),
        })
    }
}
