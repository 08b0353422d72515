use tracing::instrument;
use validator::Validate;

use crate::api::{ApiClient, ProfileUpdate};
use crate::error::Result;
use crate::notify::Notifier;

#[derive(Debug, Clone, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Edit-profile screen: pre-fills its form from `GET /user/info`, then
/// submits the whole form to `PUT /user/update`. Success keeps the user on
/// the page.
pub struct ProfileController<'a> {
    api: &'a ApiClient,
    token: String,
    notifier: &'a dyn Notifier,
}

impl<'a> ProfileController<'a> {
    pub fn new(api: &'a ApiClient, token: impl Into<String>, notifier: &'a dyn Notifier) -> Self {
        Self {
            api,
            token: token.into(),
            notifier,
        }
    }

    /// The `useQuery` half of the page: fetch current values into the form.
    pub async fn load(&self) -> Result<ProfileForm> {
        let info = self.api.fetch_profile(&self.token).await?;

        Ok(ProfileForm {
            first_name: info.profile.first_name,
            last_name: info.profile.last_name,
            email: info.email,
            phone: info.profile.phone,
            address: info.profile.address,
        })
    }

    #[instrument(name = "profile_submit", skip(self, form))]
    pub async fn submit(&self, form: &ProfileForm) -> Result<()> {
        form.validate()?;

        let update = ProfileUpdate {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
        };

        match self.api.update_profile(&update, &self.token).await {
            Ok(_) => {
                self.notifier.success("Profile updated successfully!");
                Ok(())
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing::{RecordingNotifier, sample_user_body};
    use httptest::{Expectation, Server, all_of, matchers::*, responders::*};

    #[tokio::test]
    async fn load_prefills_form_from_user_info() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method("GET"),
                request::path("/user/info"),
            ])
            .respond_with(json_encoded(serde_json::json!({
                "data": {
                    "email": "fulan@example.com",
                    "profile": {
                        "firstName": "Fulan",
                        "lastName": "bin Fulan",
                        "phone": "+62811111",
                        "address": "Jakarta"
                    }
                }
            }))),
        );

        let api = ApiClient::new(server.url_str("/"));
        let notifier = RecordingNotifier::default();
        let controller = ProfileController::new(&api, "tok-123", &notifier);

        let form = controller.load().await.unwrap();
        assert_eq!(form.first_name, "Fulan");
        assert_eq!(form.email, "fulan@example.com");
        assert_eq!(form.address.as_deref(), Some("Jakarta"));
    }

    #[tokio::test]
    async fn successful_update_notifies_and_stays() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method("PUT"),
                request::path("/user/update"),
            ])
            .times(1)
            .respond_with(json_encoded(serde_json::json!({
                "message": "Profile updated",
                "user": sample_user_body(),
                "token": "tok-123"
            }))),
        );

        let api = ApiClient::new(server.url_str("/"));
        let notifier = RecordingNotifier::default();
        let controller = ProfileController::new(&api, "tok-123", &notifier);

        let form = ProfileForm {
            first_name: "Fulan".into(),
            last_name: "Updated".into(),
            email: "fulan@example.com".into(),
            phone: None,
            address: None,
        };
        controller.submit(&form).await.unwrap();

        assert_eq!(
            notifier.successes.lock().unwrap().as_slice(),
            &["Profile updated successfully!"]
        );
    }

    #[tokio::test]
    async fn blank_email_never_reaches_the_network() {
        let server = Server::run();
        let api = ApiClient::new(server.url_str("/"));
        let notifier = RecordingNotifier::default();
        let controller = ProfileController::new(&api, "tok-123", &notifier);

        let form = ProfileForm {
            first_name: "Fulan".into(),
            last_name: "bin Fulan".into(),
            email: String::new(),
            phone: None,
            address: None,
        };
        assert!(controller.submit(&form).await.unwrap_err().is_validation());
    }
}
