//! The HTTP client core
//!
//! Wraps a `reqwest::Client` with the fixed request timeout, bearer-token
//! injection, and `{success, message, data}` envelope handling. Endpoint
//! methods live in the sibling modules, grouped by backend screen.

use crate::error::{Error, Result, GENERIC_FAILURE};
use sanad_core::{ApiConfig, ApiEnvelope};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Path prefix shared by every endpoint.
pub(crate) const API_PREFIX: &str = "/api/v1/customer";

/// Client for the SANAD REST backend.
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
    /// Bearer credential attached to every request while set
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client from the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            config,
            http,
            token: RwLock::new(None),
        })
    }

    /// Set or clear the bearer credential for subsequent requests.
    pub fn set_auth_token(&self, token: Option<String>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    /// Whether a bearer credential is currently attached
    pub fn has_auth_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    fn current_token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    /// Build the full URL for an endpoint path under the API prefix.
    fn url(&self, path: &str) -> String {
        self.config.endpoint(&format!("{API_PREFIX}{path}"))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        self.expect_data(self.http.get(url)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        self.expect_data(self.http.post(url).json(body)).await
    }

    /// POST with an empty body, ignoring any `data` payload.
    pub(crate) async fn post_unit(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        self.execute::<serde_json::Value>(self.http.post(url))
            .await
            .map(|_| ())
    }

    /// POST with a body, ignoring any `data` payload.
    pub(crate) async fn post_unit_with<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let url = self.url(path);
        self.execute::<serde_json::Value>(self.http.post(url).json(body))
            .await
            .map(|_| ())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        self.execute::<serde_json::Value>(self.http.delete(url))
            .await
            .map(|_| ())
    }

    async fn expect_data<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        self.execute(request).await?.ok_or(Error::MissingData)
    }

    /// Send a request and unwrap the response envelope.
    ///
    /// Branches on `success` before trusting `data`. A 401 drops the stored
    /// bearer credential so a stale token cannot be replayed.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>> {
        let request = match self.current_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        debug!("Backend responded {}", status);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!("Backend returned 401, dropping bearer credential");
            self.set_auth_token(None);
        }

        let bytes = response.bytes().await?;
        let envelope: ApiEnvelope<T> = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(Error::Decode(e)),
            // Failure responses with non-envelope bodies still become Api errors
            Err(_) => {
                return Err(Error::Api {
                    status: status.as_u16(),
                    message: GENERIC_FAILURE.to_string(),
                })
            }
        };

        if !status.is_success() || !envelope.success {
            let message = if envelope.message.is_empty() {
                GENERIC_FAILURE.to_string()
            } else {
                envelope.message
            };
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(envelope.data)
    }
}
