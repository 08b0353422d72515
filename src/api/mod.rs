use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};

mod attendance;
mod auth;
mod user;

pub use user::ProfileUpdate;

// One connection pool for the whole process; every gateway call goes
// through it.
static HTTP: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Thin gateway over the attendance API: one method per backend operation,
/// each a single HTTP round trip. No retries, no timeouts beyond the
/// transport default; failures surface immediately to the calling
/// controller.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: HTTP.clone(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Where an uploaded attendance photo can be viewed:
    /// `<base>/storage/file/<basename-of-photoUrl>`.
    pub fn photo_display_url(&self, photo_url: &str) -> String {
        // a trailing slash must not produce an empty basename
        let basename = photo_url
            .rsplit('/')
            .find(|part| !part.is_empty())
            .unwrap_or(photo_url);
        format!("{}/storage/file/{}", self.base_url, basename)
    }
}

async fn request_error(response: reqwest::Response, default_message: &str) -> ClientError {
    let status = response.status();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| default_message.to_string());

    tracing::debug!(status = status.as_u16(), %message, "request rejected");

    ClientError::Request {
        status: status.as_u16(),
        message,
    }
}

/// Map a response to its parsed JSON body, or to a `Request` error carrying
/// the server's `message` (falling back to `default_message` when the body
/// has none or is not JSON).
pub(crate) async fn into_json<T: DeserializeOwned>(
    response: reqwest::Response,
    default_message: &str,
) -> Result<T> {
    if !response.status().is_success() {
        return Err(request_error(response, default_message).await);
    }

    Ok(response.json::<T>().await?)
}

/// Like [`into_json`] for operations whose success body is irrelevant (or
/// empty), e.g. logout.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
    default_message: &str,
) -> Result<()> {
    if !response.status().is_success() {
        return Err(request_error(response, default_message).await);
    }
    Ok(())
}
