use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{AttendanceRecord, ReportFilter};

/// The dependency set of one logical report query. Changing any component
/// re-queries; changing only limit/offset is pagination within the same
/// query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueryKey {
    start_date: NaiveDate,
    end_date: NaiveDate,
    timezone: String,
}

impl QueryKey {
    fn of(filter: &ReportFilter) -> Self {
        Self {
            start_date: filter.start_date,
            end_date: filter.end_date,
            timezone: filter.timezone.clone(),
        }
    }
}

/// Holds the attendance-history filter and re-issues the report fetch
/// whenever its offset changes or a new filter is applied. Pages fetched
/// under the current query key are cached so pagination can show a known
/// page while the fetch is in flight; the cache is dropped when the key
/// changes.
pub struct ReportQueryController {
    api: ApiClient,
    token: String,
    filter: ReportFilter,
    key: QueryKey,
    pages: HashMap<u32, Vec<AttendanceRecord>>,
    records: Vec<AttendanceRecord>,
    is_loading: bool,
    is_error: bool,
}

impl ReportQueryController {
    pub fn new(api: ApiClient, token: impl Into<String>, filter: ReportFilter) -> Self {
        let key = QueryKey::of(&filter);
        Self {
            api,
            token: token.into(),
            filter,
            key,
            pages: HashMap::new(),
            records: Vec::new(),
            is_loading: false,
            is_error: false,
        }
    }

    pub fn filter(&self) -> &ReportFilter {
        &self.filter
    }

    /// Records of the current page.
    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    /// `isLoading` analog: set for the duration of the fetch inside
    /// `refetch`. Callers hold `&mut self` across that await, so this reads
    /// `true` only from a concurrent harness watching mid-flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Last-page heuristic: "Next" stays enabled only while the current page
    /// came back full. A full final page is indistinguishable from a
    /// non-final one without a total count from the server.
    pub fn has_next(&self) -> bool {
        self.records.len() as u32 >= self.filter.limit
    }

    pub fn has_previous(&self) -> bool {
        self.filter.offset > 0
    }

    /// New filter submission: offset always resets to 0 before refetching.
    /// A changed date range or timezone drops the cached pages.
    #[instrument(skip(self, new_filter))]
    pub async fn apply_filter(&mut self, mut new_filter: ReportFilter) -> Result<()> {
        new_filter.offset = 0;

        let new_key = QueryKey::of(&new_filter);
        if new_key != self.key {
            debug!("query key changed, dropping cached pages");
            self.pages.clear();
            self.key = new_key;
        }

        self.filter = new_filter;
        self.refetch().await
    }

    /// Disabled (no-op) when the current page is already short of `limit`.
    pub async fn next_page(&mut self) -> Result<()> {
        if !self.has_next() {
            return Ok(());
        }
        let offset = self.filter.offset + self.filter.limit;
        self.set_offset(offset).await
    }

    /// Disabled (no-op) at offset 0; otherwise steps back one page, clamped
    /// at the lower bound.
    pub async fn previous_page(&mut self) -> Result<()> {
        if !self.has_previous() {
            return Ok(());
        }
        let offset = self.filter.offset.saturating_sub(self.filter.limit);
        self.set_offset(offset).await
    }

    /// Re-run the current query, e.g. after an attendance submission.
    pub async fn refresh(&mut self) -> Result<()> {
        self.refetch().await
    }

    // Every offset change funnels through here so the refetch effect cannot
    // be skipped.
    async fn set_offset(&mut self, offset: u32) -> Result<()> {
        if offset == self.filter.offset {
            return Ok(());
        }
        self.filter.offset = offset;

        // Known page for this offset: show it while the fetch runs.
        if let Some(cached) = self.pages.get(&offset) {
            self.records = cached.clone();
        }

        self.refetch().await
    }

    async fn refetch(&mut self) -> Result<()> {
        self.is_loading = true;

        let outcome = self
            .api
            .fetch_attendance_report(&self.filter, &self.token)
            .await;
        self.is_loading = false;

        match outcome {
            Ok(records) => {
                debug!(
                    offset = self.filter.offset,
                    count = records.len(),
                    "report page fetched"
                );
                self.pages.insert(self.filter.offset, records.clone());
                self.records = records;
                self.is_error = false;
                Ok(())
            }
            Err(err) => {
                self.is_error = true;
                Err(err)
            }
        }
    }
}
