use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Profile fields nested inside a [`UserProfile`]. Server is authoritative;
/// mutated only through the profile-update operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    pub profile: ProfileDetails,
}

/// Credential plus cached profile held by the client for the duration of a
/// login. Presence of a non-empty token means "authenticated".
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Response shape shared by login, register and profile update.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserProfile,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoResponse {
    pub data: UserInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    pub profile: ProfileDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Sick,
}

/// One attendance entry as the server reports it. Immutable from the
/// client's perspective; rendered read-only in the report table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub status: AttendanceStatus,
    pub location: String,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportResponse {
    pub attendance: Vec<AttendanceRecord>,
}

/// Date range, timezone and pagination parameters of the attendance history
/// query. Serialized straight into the report query string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub timezone: String,
    pub limit: u32,
    pub offset: u32,
}

/// A single still frame captured for attendance proof.
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime: String,
}

/// Ephemeral multipart payload for `POST /attendance/mark`. Constructed per
/// submit, discarded once the request completes.
#[derive(Debug, Clone)]
pub struct AttendanceSubmission {
    pub longitude: f64,
    pub latitude: f64,
    pub location: String,
    pub status: AttendanceStatus,
    pub photo: Option<CapturedPhoto>,
}
