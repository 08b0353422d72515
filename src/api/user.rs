use serde::Serialize;

use super::{ApiClient, into_json};
use crate::error::Result;
use crate::models::{AuthResponse, UserInfo, UserInfoResponse};

/// Fields the edit-profile form submits to `PUT /user/update`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ApiClient {
    /// `GET /user/info`, bearer auth.
    pub async fn fetch_profile(&self, token: &str) -> Result<UserInfo> {
        let response = self
            .http()
            .get(self.url("/user/info"))
            .bearer_auth(token)
            .send()
            .await?;

        into_json::<UserInfoResponse>(response, "Failed to fetch user info")
            .await
            .map(|body| body.data)
    }

    /// `PUT /user/update`, bearer auth.
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
        token: &str,
    ) -> Result<AuthResponse> {
        let response = self
            .http()
            .put(self.url("/user/update"))
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;

        into_json(response, "Update failed").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{Expectation, Server, all_of, matchers::*, responders::*};

    #[tokio::test]
    async fn fetch_profile_unwraps_data_envelope() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method("GET"),
                request::path("/user/info"),
                request::headers(contains(("authorization", "Bearer tok-123"))),
            ])
            .respond_with(json_encoded(serde_json::json!({
                "data": {
                    "email": "fulan@example.com",
                    "profile": {
                        "firstName": "Fulan",
                        "lastName": "bin Fulan",
                        "phone": "+62811111",
                        "address": null,
                        "photoUrl": null
                    }
                }
            }))),
        );

        let api = ApiClient::new(server.url_str("/"));
        let info = api.fetch_profile("tok-123").await.unwrap();
        assert_eq!(info.email, "fulan@example.com");
        assert_eq!(info.profile.phone.as_deref(), Some("+62811111"));
    }

    #[tokio::test]
    async fn update_profile_puts_camel_case_fields() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method("PUT"),
                request::path("/user/update"),
                request::body(json_decoded(eq(serde_json::json!({
                    "firstName": "Fulan",
                    "lastName": "Updated",
                    "email": "fulan@example.com",
                    "phone": null,
                    "address": "Jakarta"
                })))),
            ])
            .respond_with(json_encoded(serde_json::json!({
                "message": "Profile updated",
                "user": {
                    "id": "u1",
                    "email": "fulan@example.com",
                    "createdAt": "2026-01-01T00:00:00Z",
                    "updatedAt": "2026-08-30T00:00:00Z",
                    "profile": {
                        "firstName": "Fulan",
                        "lastName": "Updated",
                        "address": "Jakarta"
                    }
                },
                "token": "tok-123"
            }))),
        );

        let api = ApiClient::new(server.url_str("/"));
        let update = ProfileUpdate {
            first_name: "Fulan".into(),
            last_name: "Updated".into(),
            email: "fulan@example.com".into(),
            phone: None,
            address: Some("Jakarta".into()),
        };
        let response = api.update_profile(&update, "tok-123").await.unwrap();
        assert_eq!(response.user.profile.last_name, "Updated");
    }
}
