//! Gitee OAuth connector implementation.
//!
//! Handles the full login flow against Gitee:
//! - Authorization URL generation with per-request CSRF state
//! - Authorization code exchange
//! - Profile and primary-email retrieval
//! - Username normalization

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ConfigStore;
use crate::error::{oauth_error, oauth_error_from, Error, OAuthErrorKind};
use crate::oauth::username::{normalize_username, CharsetPolicy, UsernamePolicy};
use crate::oauth::{AuthorizationRequest, Connector, ExternalLoginUserInfo, StateManager};

/// Fixed timeout for Gitee API calls made with the access token. The token
/// exchange itself carries no request timeout and inherits the caller's
/// deadline.
const API_TIMEOUT: Duration = Duration::from_secs(15);

/// Display name used when the host has not configured an override.
const DEFAULT_DISPLAY_NAME: &str = "Gitee";

/// Scopes requested from Gitee: profile plus email addresses.
const SCOPES: &str = "user_info,emails";

/// Gitee OAuth and API endpoints.
///
/// Defaults point at production Gitee; tests override them to target a mock
/// server.
#[derive(Debug, Clone)]
pub struct GiteeEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub user_url: String,
    pub emails_url: String,
}

impl Default for GiteeEndpoints {
    fn default() -> Self {
        Self {
            auth_url: "https://gitee.com/oauth/authorize".to_string(),
            token_url: "https://gitee.com/oauth/token".to_string(),
            user_url: "https://gitee.com/api/v5/user".to_string(),
            emails_url: "https://gitee.com/api/v5/emails".to_string(),
        }
    }
}

/// OAuth token response from Gitee.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: SecretString,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    expires_in: i64,
}

/// Gitee OAuth connector.
///
/// Stateless per request apart from the configuration snapshot and the
/// outstanding CSRF states; safe to share across concurrent login flows.
pub struct GiteeConnector {
    config: Arc<ConfigStore>,
    states: StateManager,
    username_policy: Arc<dyn UsernamePolicy>,
    endpoints: GiteeEndpoints,
    http_client: reqwest::Client,
}

impl GiteeConnector {
    /// Create a new Gitee connector reading credentials from `config`.
    pub fn new(config: Arc<ConfigStore>) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            config,
            states: StateManager::new(),
            username_policy: Arc::new(CharsetPolicy),
            endpoints: GiteeEndpoints::default(),
            http_client,
        })
    }

    /// Override the provider endpoints.
    pub fn with_endpoints(mut self, endpoints: GiteeEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Override the username validity policy.
    pub fn with_username_policy(mut self, policy: Arc<dyn UsernamePolicy>) -> Self {
        self.username_policy = policy;
        self
    }

    /// Exchange the authorization code for an access token.
    async fn exchange_code(
        &self,
        code: &str,
        receiver_url: &str,
    ) -> Result<TokenResponse, Error> {
        let config = self.config.snapshot();
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.expose_secret().as_str()),
            ("redirect_uri", receiver_url),
        ];

        debug!("exchanging Gitee authorization code for tokens");

        let response = self
            .http_client
            .post(&self.endpoints.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                warn!("Gitee code exchange request failed: {:?}", e);
                oauth_error_from(OAuthErrorKind::CodeExchangeFailed, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Gitee token endpoint returned {}: {}", status, error_text);
            return Err(oauth_error(
                OAuthErrorKind::CodeExchangeFailed,
                &format!("token endpoint returned {}: {}", status, error_text),
            ));
        }

        let tokens: TokenResponse = response.json().await.map_err(|e| {
            warn!("failed to parse Gitee token response: {:?}", e);
            oauth_error_from(OAuthErrorKind::CodeExchangeFailed, e)
        })?;

        debug!(
            "exchanged Gitee authorization code (type: {}, expires_in: {}s)",
            tokens.token_type, tokens.expires_in
        );
        Ok(tokens)
    }

    /// Fetch a bearer-authenticated Gitee API resource as raw text.
    async fn fetch_api(
        &self,
        url: &str,
        access_token: &SecretString,
        failure_kind: OAuthErrorKind,
    ) -> Result<String, Error> {
        let wrap = |message: String| -> Error {
            warn!("Gitee API call to {} failed: {}", url, message);
            oauth_error(failure_kind, &message)
        };

        let response = self
            .http_client
            .get(url)
            .bearer_auth(access_token.expose_secret())
            .timeout(API_TIMEOUT)
            .send()
            .await
            .map_err(|e| wrap(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(wrap(format!("endpoint returned {}: {}", status, error_text)));
        }

        response.text().await.map_err(|e| wrap(e.to_string()))
    }
}

#[async_trait]
impl Connector for GiteeConnector {
    fn slug(&self) -> &'static str {
        "gitee"
    }

    fn display_name(&self) -> String {
        let config = self.config.snapshot();
        if config.name.is_empty() {
            DEFAULT_DISPLAY_NAME.to_string()
        } else {
            config.name.clone()
        }
    }

    fn authorization_url(&self, receiver_url: &str) -> AuthorizationRequest {
        let config = self.config.snapshot();
        let state = self.states.generate();

        let url = format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            self.endpoints.auth_url,
            urlencoding::encode(&config.client_id),
            urlencoding::encode(receiver_url),
            urlencoding::encode(SCOPES),
            urlencoding::encode(&state),
        );

        AuthorizationRequest { url, state }
    }

    async fn exchange(
        &self,
        code: &str,
        state: &str,
        receiver_url: &str,
    ) -> Result<ExternalLoginUserInfo, Error> {
        if !self.states.validate(state) {
            return Err(oauth_error(
                OAuthErrorKind::InvalidState,
                "unknown, expired, or already-used state token",
            ));
        }

        let tokens = self.exchange_code(code, receiver_url).await?;

        let profile_body = self
            .fetch_api(
                &self.endpoints.user_url,
                &tokens.access_token,
                OAuthErrorKind::ProfileFetchFailed,
            )
            .await?;

        let profile = parse_json(&profile_body);
        let mut user_info = ExternalLoginUserInfo {
            external_id: json_field(&profile, "id"),
            display_name: json_field(&profile, "name"),
            username: json_field(&profile, "login"),
            avatar: json_field(&profile, "avatar_url"),
            email: String::new(),
            meta_info: profile_body,
        };

        // Non-fatal: the record is returned as-is and the host decides what to
        // do with an identity it cannot look up.
        if user_info.external_id.is_empty() {
            warn!("Gitee profile response carried no user id");
            return Ok(user_info);
        }

        let emails_body = self
            .fetch_api(
                &self.endpoints.emails_url,
                &tokens.access_token,
                OAuthErrorKind::EmailFetchFailed,
            )
            .await?;

        let emails = parse_json(&emails_body);
        user_info.email = emails
            .get(0)
            .map(|entry| json_field(entry, "email"))
            .unwrap_or_default();

        user_info.username = normalize_username(&user_info.username, &*self.username_policy);
        Ok(user_info)
    }
}

/// Parse a response body as JSON. An unparsable body behaves like an empty
/// object so that field extraction stays infallible.
fn parse_json(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or(Value::Null)
}

/// Extract a top-level field as a string, empty when absent. Numbers are
/// rendered in decimal, which covers Gitee's numeric user ids.
fn json_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
