//! Driving port for calendar reads.
//!
//! Fetching never fails on a missing document: the engine synthesises a
//! fresh draft and reports `exists = false`, so callers can render an empty
//! month without a special case. Reads never consult the permission gate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{CalendarDocument, CalendarSettings, Error, MonthKey};

/// Request to fetch the calendar for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchCalendarRequest {
    pub month: u32,
    pub year: i32,
}

/// Response carrying the stored document or a fresh draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchCalendarResponse {
    /// Whether a saved document existed for the key.
    pub exists: bool,
    pub document: CalendarDocument,
}

/// Domain use-case port for calendar reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleQuery: Send + Sync {
    /// Fetch the calendar for `(month, year)`, synthesising a draft when no
    /// document was ever saved.
    async fn fetch_calendar(
        &self,
        request: FetchCalendarRequest,
    ) -> Result<FetchCalendarResponse, Error>;
}

/// Fixture query returning a draft for every month.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureScheduleQuery;

#[async_trait]
impl ScheduleQuery for FixtureScheduleQuery {
    async fn fetch_calendar(
        &self,
        request: FetchCalendarRequest,
    ) -> Result<FetchCalendarResponse, Error> {
        let key = MonthKey::new(request.month, request.year)
            .map_err(|err| Error::invalid_calendar_parameters(err.to_string()))?;
        let settings = CalendarSettings::default();
        Ok(FetchCalendarResponse {
            exists: false,
            document: CalendarDocument::draft(key, settings.weekday_locale),
        })
    }
}
