use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::CapturedPhoto;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Positioning capability. Asynchronous and single-shot; the caller is
/// responsible for user-facing messaging on failure.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_coordinates(&self) -> Result<Coordinates>;
}

/// Camera capability: one still frame per call, failing when no active
/// stream exists.
#[async_trait]
pub trait CameraCapture: Send + Sync {
    async fn capture_still_image(&self) -> Result<CapturedPhoto>;
}

/// Coordinates handed in up front, e.g. from CLI flags. Always succeeds.
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_coordinates(&self) -> Result<Coordinates> {
        Ok(self.0)
    }
}

/// File-input capture: reads an image from disk instead of a live stream.
pub struct FileCamera {
    pub path: std::path::PathBuf,
}

#[async_trait]
impl CameraCapture for FileCamera {
    async fn capture_still_image(&self) -> Result<CapturedPhoto> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            ClientError::Location {
                message: format!("cannot read photo {}: {e}", self.path.display()),
            }
        })?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "capture.jpg".to_string());
        let mime = match self.path.extension().and_then(|e| e.to_str()) {
            Some("png") => "image/png",
            _ => "image/jpeg",
        };

        Ok(CapturedPhoto {
            bytes,
            file_name,
            mime: mime.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    name: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

/// Reverse-geocoding provider, queried outside the attendance API gateway
/// with its own credentials.
#[derive(Clone)]
pub struct Geocoder {
    http: reqwest::Client,
    url: String,
    app_id: String,
}

impl Geocoder {
    pub fn new(url: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            app_id: app_id.into(),
        }
    }

    /// `GET <provider>?lat&lon&limit=1&appid=<key>`; the first result's
    /// name/state/country joined into one display string.
    pub async fn reverse(&self, coords: Coordinates) -> Result<String> {
        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("limit", "1".to_string()),
                ("appid", self.app_id.clone()),
            ])
            .send()
            .await
            .map_err(|e| ClientError::Geocode {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Geocode {
                message: format!("provider returned {status}"),
            });
        }

        let entries: Vec<GeocodeEntry> =
            response.json().await.map_err(|e| ClientError::Geocode {
                message: e.to_string(),
            })?;

        let Some(first) = entries.into_iter().next() else {
            return Err(ClientError::LocationNotFound);
        };

        let mut parts = vec![first.name];
        parts.extend(first.state.into_iter().filter(|s| !s.is_empty()));
        parts.extend(first.country.into_iter().filter(|c| !c.is_empty()));
        let location = parts.join(", ");

        debug!(%location, "reverse geocoded");
        Ok(location)
    }
}
