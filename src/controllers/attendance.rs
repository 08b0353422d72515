use tracing::{instrument, warn};
use validator::{ValidationError, ValidationErrors};

use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::geo::{CameraCapture, Coordinates, Geocoder, LocationProvider};
use crate::models::{AttendanceRecord, AttendanceStatus, AttendanceSubmission, CapturedPhoto};
use crate::notify::Notifier;
use crate::report::ReportQueryController;

/// Where the mark-attendance screen currently is. Submission failure drops
/// back to `LocationResolved` with captured data intact so the user can
/// retry; success loops to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkState {
    Idle,
    LocationRequested,
    LocationResolved,
    CapturePending,
    CaptureComplete,
    Submitting,
}

pub struct MarkAttendanceController<'a> {
    api: &'a ApiClient,
    geocoder: &'a Geocoder,
    token: String,
    notifier: &'a dyn Notifier,
    state: MarkState,
    coordinates: Option<Coordinates>,
    location: Option<String>,
    photo: Option<CapturedPhoto>,
}

fn location_required() -> ClientError {
    let mut errors = ValidationErrors::new();
    let mut error = ValidationError::new("required");
    error.message = Some("Location is required".into());
    errors.add("location", error);
    ClientError::Validation { errors }
}

impl<'a> MarkAttendanceController<'a> {
    pub fn new(
        api: &'a ApiClient,
        geocoder: &'a Geocoder,
        token: impl Into<String>,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            api,
            geocoder,
            token: token.into(),
            notifier,
            state: MarkState::Idle,
            coordinates: None,
            location: None,
            photo: None,
        }
    }

    pub fn state(&self) -> MarkState {
        self.state
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn photo(&self) -> Option<&CapturedPhoto> {
        self.photo.as_ref()
    }

    /// Ask the positioning capability for coordinates, then turn them into a
    /// display string via the geocoding provider.
    #[instrument(name = "resolve_location", skip(self, provider))]
    pub async fn resolve_location(&mut self, provider: &dyn LocationProvider) -> Result<()> {
        self.state = MarkState::LocationRequested;

        let coords = match provider.current_coordinates().await {
            Ok(coords) => coords,
            Err(err) => {
                self.notifier.error(&err.to_string());
                self.state = MarkState::Idle;
                return Err(err);
            }
        };

        let location = match self.geocoder.reverse(coords).await {
            Ok(location) => location,
            Err(err) => {
                self.notifier.error(&err.to_string());
                self.state = MarkState::Idle;
                return Err(err);
            }
        };

        self.coordinates = Some(coords);
        self.location = Some(location);
        self.state = MarkState::LocationResolved;
        Ok(())
    }

    /// Optional step after the location is resolved.
    pub async fn capture_photo(&mut self, camera: &dyn CameraCapture) -> Result<()> {
        if !matches!(
            self.state,
            MarkState::LocationResolved | MarkState::CaptureComplete
        ) {
            return Err(location_required());
        }

        self.state = MarkState::CapturePending;

        match camera.capture_still_image().await {
            Ok(photo) => {
                self.photo = Some(photo);
                self.state = MarkState::CaptureComplete;
                Ok(())
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                self.state = if self.photo.is_some() {
                    MarkState::CaptureComplete
                } else {
                    MarkState::LocationResolved
                };
                Err(err)
            }
        }
    }

    /// Submit the attendance mark. Requires a resolved location; on success
    /// the dependent report query is refetched and the screen resets.
    #[instrument(name = "mark_submit", skip(self, report), fields(status = %status))]
    pub async fn submit(
        &mut self,
        status: AttendanceStatus,
        report: &mut ReportQueryController,
    ) -> Result<AttendanceRecord> {
        let (Some(coords), Some(location)) = (self.coordinates, self.location.clone()) else {
            return Err(location_required());
        };

        let submission = AttendanceSubmission {
            longitude: coords.longitude,
            latitude: coords.latitude,
            location,
            status,
            photo: self.photo.clone(),
        };

        self.state = MarkState::Submitting;

        match self.api.submit_attendance(&submission, &self.token).await {
            Ok(record) => {
                self.notifier.success("Attendance marked successfully!");

                self.coordinates = None;
                self.location = None;
                self.photo = None;
                self.state = MarkState::Idle;

                if let Err(err) = report.refresh().await {
                    warn!(error = %err, "report refetch after submission failed");
                }

                Ok(record)
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                // captured data stays so the user can retry
                self.state = MarkState::LocationResolved;
                Err(err)
            }
        }
    }
}
