use moka::sync::Cache;
use std::time::Duration;

use crate::models::{Session, UserProfile};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// Client-persisted session state: the bearer token and the serialized user
/// profile, each stored as its own entry with a fixed time-to-live. Expiry is
/// enforced by the cache itself and is never re-validated against the server;
/// there is no refresh-on-access.
pub struct SessionStore {
    entries: Cache<&'static str, String>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(2)
            .time_to_live(ttl)
            .build();
        Self { entries }
    }

    /// Persist token and user. Single writer in normal use (login only).
    pub fn set_session(&self, token: &str, user: &UserProfile) {
        let user_json = serde_json::to_string(user).expect("serialize user profile");
        self.entries.insert(TOKEN_KEY, token.to_string());
        self.entries.insert(USER_KEY, user_json);
    }

    /// Current session, or `None` when absent, expired or unreadable.
    pub fn get_session(&self) -> Option<Session> {
        let token = self.entries.get(TOKEN_KEY)?;
        let user_json = self.entries.get(USER_KEY)?;
        let user = serde_json::from_str(&user_json).ok()?;
        Some(Session { token, user })
    }

    /// The bearer token alone; what the route guards check.
    pub fn token(&self) -> Option<String> {
        self.entries.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn clear_session(&self) {
        self.entries.invalidate(TOKEN_KEY);
        self.entries.invalidate(USER_KEY);
    }
}
