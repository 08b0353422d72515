use tracing::{error, info};

use crate::api::ApiClient;
use crate::notify::Navigator;
use crate::routes::Route;
use crate::session::SessionStore;

mod attendance;
mod login;
mod profile;
mod register;

pub use attendance::{MarkAttendanceController, MarkState};
pub use login::{LoginController, LoginForm};
pub use profile::{ProfileController, ProfileForm};
pub use register::{RegisterController, RegisterForm};

/// Navbar logout: best effort against the server, then drop the local
/// session and go to the login page. A transport failure keeps the session,
/// mirroring the original client.
pub async fn logout(api: &ApiClient, session: &SessionStore, navigator: &dyn Navigator) {
    let Some(token) = session.token() else {
        return;
    };

    match api.logout(&token).await {
        Ok(()) => {
            session.clear_session();
            info!("logged out");
            navigator.navigate(Route::Login).await;
        }
        Err(err) => {
            error!(error = %err, "logout failed");
        }
    }
}
