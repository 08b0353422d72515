use std::time::Duration;
use tracing::{info, instrument};
use validator::Validate;

use crate::api::ApiClient;
use crate::error::Result;
use crate::notify::{Navigator, Notifier};
use crate::routes::Route;
use crate::session::SessionStore;

#[derive(Debug, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login screen: validate, call the gateway once, store the session and
/// navigate home after the notification delay.
pub struct LoginController<'a> {
    api: &'a ApiClient,
    session: &'a SessionStore,
    notifier: &'a dyn Notifier,
    navigator: &'a dyn Navigator,
    notify_delay: Duration,
}

impl<'a> LoginController<'a> {
    pub fn new(
        api: &'a ApiClient,
        session: &'a SessionStore,
        notifier: &'a dyn Notifier,
        navigator: &'a dyn Navigator,
        notify_delay: Duration,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            navigator,
            notify_delay,
        }
    }

    #[instrument(name = "login_submit", skip(self, form), fields(email = %form.email))]
    pub async fn submit(&self, form: &LoginForm) -> Result<()> {
        // Field-level failures never reach the network.
        form.validate()?;

        match self.api.login(&form.email, &form.password).await {
            Ok(response) => {
                self.session.set_session(&response.token, &response.user);
                self.notifier.success("Login successful!");
                info!("login successful");

                tokio::time::sleep(self.notify_delay).await;
                self.navigator.navigate(Route::Home).await;
                Ok(())
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }
}
