//! Authentication endpoints

use crate::client::ApiClient;
use crate::error::Result;
use sanad_core::{AuthData, LoginRequest, RegisterRequest, ResetPasswordRequest};
use tracing::info;

impl ApiClient {
    /// `POST /auth/login` — authenticate with email or phone plus password.
    ///
    /// Adopts the returned token for subsequent requests; callers still
    /// persist it through the session.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthData> {
        let auth: AuthData = self.post("/auth/login", request).await?;
        info!("Logged in as {}", auth.customer.email);
        self.set_auth_token(Some(auth.token.clone()));
        Ok(auth)
    }

    /// `POST /auth/register` — create an account; responds like login.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthData> {
        let auth: AuthData = self.post("/auth/register", request).await?;
        info!("Registered {}", auth.customer.email);
        self.set_auth_token(Some(auth.token.clone()));
        Ok(auth)
    }

    /// `POST /auth/logout` — invalidate the server-side session.
    ///
    /// Best effort: callers clear the local session regardless of the
    /// result. Drops the bearer credential either way.
    pub async fn logout(&self) -> Result<()> {
        let result = self.post_unit("/auth/logout").await;
        self.set_auth_token(None);
        result
    }

    /// `POST /auth/reset_password` — change the password while logged in.
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<()> {
        self.post_unit_with("/auth/reset_password", request).await
    }

    /// `POST /auth/delete` — delete the account.
    pub async fn delete_account(&self) -> Result<()> {
        let result = self.post_unit("/auth/delete").await;
        if result.is_ok() {
            self.set_auth_token(None);
        }
        result
    }
}
