use reqwest::multipart::{Form, Part};
use tracing::debug;

use super::{ApiClient, into_json};
use crate::error::Result;
use crate::models::{AttendanceRecord, AttendanceSubmission, ReportFilter, ReportResponse};

impl ApiClient {
    /// `POST /attendance/mark`, bearer auth, multipart body: longitude,
    /// latitude, location, status and an optional photo.
    pub async fn submit_attendance(
        &self,
        submission: &AttendanceSubmission,
        token: &str,
    ) -> Result<AttendanceRecord> {
        debug!(
            latitude = submission.latitude,
            longitude = submission.longitude,
            status = %submission.status,
            has_photo = submission.photo.is_some(),
            "submitting attendance"
        );

        let mut form = Form::new()
            .text("longitude", submission.longitude.to_string())
            .text("latitude", submission.latitude.to_string())
            .text("location", submission.location.clone())
            .text("status", submission.status.to_string());

        if let Some(photo) = &submission.photo {
            let part = Part::bytes(photo.bytes.clone())
                .file_name(photo.file_name.clone())
                .mime_str(&photo.mime)?;
            form = form.part("photo", part);
        }

        let response = self
            .http()
            .post(self.url("/attendance/mark"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        into_json(response, "Failed to mark attendance").await
    }

    /// `GET /attendance/report?startDate&endDate&timezone&limit&offset`,
    /// bearer auth.
    pub async fn fetch_attendance_report(
        &self,
        filter: &ReportFilter,
        token: &str,
    ) -> Result<Vec<AttendanceRecord>> {
        let response = self
            .http()
            .get(self.url("/attendance/report"))
            .query(filter)
            .bearer_auth(token)
            .send()
            .await?;

        into_json::<ReportResponse>(response, "Failed to fetch attendance report")
            .await
            .map(|body| body.attendance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, CapturedPhoto};
    use chrono::NaiveDate;
    use httptest::{Expectation, Server, all_of, matchers::*, responders::*};

    fn record_body(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "timestamp": "2026-08-01T09:00:00Z",
            "status": "PRESENT",
            "location": "Menteng, Jakarta, ID",
            "longitude": 106.8456,
            "latitude": -6.2088,
            "photoUrl": "uploads/a1.jpg"
        })
    }

    #[tokio::test]
    async fn submit_attendance_posts_multipart_with_bearer() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method("POST"),
                request::path("/attendance/mark"),
                request::headers(contains(("authorization", "Bearer tok-123"))),
                request::headers(contains(key("content-type"))),
            ])
            .times(1)
            .respond_with(json_encoded(record_body("a1"))),
        );

        let api = ApiClient::new(server.url_str("/"));
        let submission = AttendanceSubmission {
            longitude: 106.8456,
            latitude: -6.2088,
            location: "Menteng, Jakarta, ID".into(),
            status: AttendanceStatus::Present,
            photo: Some(CapturedPhoto {
                bytes: vec![0xff, 0xd8, 0xff],
                file_name: "capture.jpg".into(),
                mime: "image/jpeg".into(),
            }),
        };

        let record = api.submit_attendance(&submission, "tok-123").await.unwrap();
        assert_eq!(record.id, "a1");
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[tokio::test]
    async fn report_sends_filter_as_query_string() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method("GET"),
                request::path("/attendance/report"),
                request::query(url_decoded(contains(("startDate", "2026-08-01")))),
                request::query(url_decoded(contains(("endDate", "2026-08-31")))),
                request::query(url_decoded(contains(("timezone", "Asia/Jakarta")))),
                request::query(url_decoded(contains(("limit", "5")))),
                request::query(url_decoded(contains(("offset", "10")))),
            ])
            .respond_with(json_encoded(serde_json::json!({
                "attendance": [record_body("a1"), record_body("a2")]
            }))),
        );

        let api = ApiClient::new(server.url_str("/"));
        let filter = ReportFilter {
            start_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
            timezone: "Asia/Jakarta".into(),
            limit: 5,
            offset: 10,
        };

        let records = api.fetch_attendance_report(&filter, "tok-123").await.unwrap();
        assert_eq!(records.len(), 2);
    }
}
