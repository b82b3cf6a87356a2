//! HTTP client for the backend's `/auth` routes.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use opportunai_core::config::ApiConfig;

use crate::error::{AuthError, Result};
use crate::storage::CredentialStore;
use crate::types::{
    Envelope, ErrorBody, LoginRequest, LoginResponse, LogoutResponse, RegisterRequest,
    UserProfile,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
/// Environment variable overriding the configured base URL.
pub const API_URL_ENV: &str = "OPPORTUNAI_API_URL";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const LOGIN_PATH: &str = "/auth/login";

/// Auth client. Every request carries the stored bearer token when one
/// exists.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<CredentialStore>,
}

impl AuthClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        store: Arc<CredentialStore>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Unexpected(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "Auth client created");
        Ok(Self {
            http,
            base_url,
            store,
        })
    }

    pub fn from_config(config: &ApiConfig, store: Arc<CredentialStore>) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
            store,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        let token = self.store.token();
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        debug!(%method, path, authenticated = token.is_some(), "API request");

        let response = request.send().await?;
        let status = response.status();
        debug!(path, status = status.as_u16(), "API response");

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| AuthError::Unexpected(e.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.message);

        if status == StatusCode::UNAUTHORIZED && !path.contains(LOGIN_PATH) {
            warn!(path, "Session rejected by server, clearing credentials");
            self.store.clear()?;
            return Err(AuthError::Unauthorized);
        }

        warn!(path, status = status.as_u16(), "API request rejected");
        Err(AuthError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Log in and store the returned credentials in the scope chosen by
    /// `remember_me`.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<LoginResponse> {
        let body = LoginRequest {
            email,
            password,
            remember_me,
        };
        let response: LoginResponse = self.request(Method::POST, LOGIN_PATH, Some(&body)).await?;

        if response.token.is_empty() {
            warn!("Login response carried no token");
            return Ok(response);
        }
        self.store.save_token(&response.token, remember_me)?;
        if let Some(user) = &response.user {
            self.store.save_user(user, remember_me)?;
        }
        info!(remember_me, "Logged in");
        Ok(response)
    }

    /// Register a company account. Credentials are not stored; the user
    /// logs in afterwards.
    pub async fn register(&self, request: &RegisterRequest) -> Result<LoginResponse> {
        let response = self
            .request(Method::POST, "/auth/register", Some(request))
            .await?;
        info!("Registration accepted");
        Ok(response)
    }

    pub async fn profile(&self) -> Result<UserProfile> {
        let envelope: Envelope<UserProfile> = self
            .request::<(), _>(Method::GET, "/auth/profile", None)
            .await?;
        Ok(envelope.data)
    }

    /// Log out. Stored credentials are cleared even when the request fails.
    pub async fn logout(&self) -> Result<LogoutResponse> {
        let result = self
            .request::<(), LogoutResponse>(Method::POST, "/auth/logout", None)
            .await;
        self.store.clear()?;
        result
    }
}
