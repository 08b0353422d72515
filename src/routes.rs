use crate::session::SessionStore;

/// The four screens of the client, by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    EditProfile,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::EditProfile => "/edit-profile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(Route),
}

/// Private pages render only with a session token present; otherwise the
/// user is sent to the login page.
pub fn private_route(session: &SessionStore) -> Access {
    if session.token().is_some() {
        Access::Granted
    } else {
        Access::Redirect(Route::Login)
    }
}

/// Public pages render only without a token; a logged-in user is sent home.
pub fn public_route(session: &SessionStore) -> Access {
    if session.token().is_some() {
        Access::Redirect(Route::Home)
    } else {
        Access::Granted
    }
}

/// The route table. Guards are evaluated synchronously on every navigation;
/// the token is never re-validated against the server here.
pub struct Router;

impl Router {
    pub fn resolve(route: Route, session: &SessionStore) -> Access {
        match route {
            Route::Home | Route::EditProfile => private_route(session),
            Route::Login | Route::Register => public_route(session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProfileDetails, UserProfile};
    use chrono::Utc;
    use std::time::Duration;

    fn user() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            email: "fulan@example.com".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
            profile: ProfileDetails {
                first_name: "Fulan".into(),
                last_name: "bin Fulan".into(),
                phone: None,
                address: None,
                photo_url: None,
            },
        }
    }

    #[test]
    fn home_without_token_redirects_to_login() {
        let session = SessionStore::new(Duration::from_secs(3600));
        assert_eq!(
            Router::resolve(Route::Home, &session),
            Access::Redirect(Route::Login)
        );
        assert_eq!(
            Router::resolve(Route::EditProfile, &session),
            Access::Redirect(Route::Login)
        );
    }

    #[test]
    fn login_with_token_redirects_home() {
        let session = SessionStore::new(Duration::from_secs(3600));
        session.set_session("tok-123", &user());

        assert_eq!(
            Router::resolve(Route::Login, &session),
            Access::Redirect(Route::Home)
        );
        assert_eq!(
            Router::resolve(Route::Register, &session),
            Access::Redirect(Route::Home)
        );
        assert_eq!(Router::resolve(Route::Home, &session), Access::Granted);
    }

    #[test]
    fn public_pages_render_without_token() {
        let session = SessionStore::new(Duration::from_secs(3600));
        assert_eq!(Router::resolve(Route::Login, &session), Access::Granted);
        assert_eq!(Router::resolve(Route::Register, &session), Access::Granted);
    }
}
