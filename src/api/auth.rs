use serde_json::json;
use tracing::debug;

use super::{ApiClient, ensure_success, into_json};
use crate::error::Result;
use crate::models::AuthResponse;

impl ApiClient {
    /// `POST /auth/login` with `{email, password}`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        debug!(%email, "login request");

        let response = self
            .http()
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        into_json(response, "Login failed").await
    }

    /// `POST /auth/register` with `{firstName, lastName, email, password}`.
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse> {
        debug!(%email, "register request");

        let response = self
            .http()
            .post(self.url("/auth/register"))
            .json(&json!({
                "firstName": first_name,
                "lastName": last_name,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        into_json(response, "Registration failed").await
    }

    /// `POST /auth/logout`, bearer auth. Any 2xx counts as success.
    pub async fn logout(&self, token: &str) -> Result<()> {
        let response = self
            .http()
            .post(self.url("/auth/logout"))
            .bearer_auth(token)
            .send()
            .await?;

        ensure_success(response, "Logout failed").await
    }
}
