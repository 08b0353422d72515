use derive_more::{Display, Error};
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Failure taxonomy of the client. Network failures are caught at the
/// controller boundary and shown as transient notifications; none are fatal
/// and the user may always retry the same action.
#[derive(Debug, Display, Error)]
pub enum ClientError {
    /// Non-2xx HTTP response from the attendance API. Carries the server's
    /// `message` field, or a per-operation fallback when the body has none.
    #[display(fmt = "{}", message)]
    Request { status: u16, message: String },

    /// The request never produced a response (connect, body or decode error).
    #[display(fmt = "request failed: {}", source)]
    Transport { source: reqwest::Error },

    /// Positioning or camera capture failed (permission denied, unsupported,
    /// provider error, no active stream).
    #[display(fmt = "{}", message)]
    Location { message: String },

    /// The geocoding provider returned no result for the coordinates.
    #[display(fmt = "location not found")]
    LocationNotFound,

    /// Transport or provider failure while reverse-geocoding.
    #[display(fmt = "geocoding failed: {}", message)]
    Geocode { message: String },

    /// Local required-field failures. Never reaches the network.
    #[display(fmt = "{}", errors)]
    Validation { errors: ValidationErrors },
}

impl From<reqwest::Error> for ClientError {
    fn from(source: reqwest::Error) -> Self {
        ClientError::Transport { source }
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        ClientError::Validation { errors }
    }
}

impl ClientError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }
}
