use std::time::Duration;
use tracing::instrument;
use validator::Validate;

use crate::api::ApiClient;
use crate::error::Result;
use crate::notify::{Navigator, Notifier};
use crate::routes::Route;

#[derive(Debug, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Register screen: validate, call the gateway once, then send the user to
/// the login page after the notification delay. No session is stored here.
pub struct RegisterController<'a> {
    api: &'a ApiClient,
    notifier: &'a dyn Notifier,
    navigator: &'a dyn Navigator,
    notify_delay: Duration,
}

impl<'a> RegisterController<'a> {
    pub fn new(
        api: &'a ApiClient,
        notifier: &'a dyn Notifier,
        navigator: &'a dyn Navigator,
        notify_delay: Duration,
    ) -> Self {
        Self {
            api,
            notifier,
            navigator,
            notify_delay,
        }
    }

    #[instrument(name = "register_submit", skip(self, form), fields(email = %form.email))]
    pub async fn submit(&self, form: &RegisterForm) -> Result<()> {
        form.validate()?;

        match self
            .api
            .register(&form.first_name, &form.last_name, &form.email, &form.password)
            .await
        {
            Ok(_) => {
                self.notifier.success("Registration successful!");
                tokio::time::sleep(self.notify_delay).await;
                self.navigator.navigate(Route::Login).await;
                Ok(())
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }
}
