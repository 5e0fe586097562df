//! Calendar scheduling domain service.
//!
//! Implements the schedule driving ports over the calendar and technician
//! repositories. Every operation is request-scoped: the document is an
//! explicit value loaded, mutated, and saved within one call. Concurrent
//! saves to the same month follow last-write-wins — the whole document is
//! overwritten, never merged — so callers re-fetch before re-mutating when
//! they need current state.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::calendar::{
    CalendarDocument, DocumentError, MonthKey,
};
use crate::domain::ports::{
    AssignShiftRequest, AssignShiftResponse, CalendarRepository, CalendarRepositoryError,
    FetchCalendarRequest, FetchCalendarResponse, SaveCalendarRequest, SaveCalendarResponse,
    ScheduleCommand, ScheduleQuery, SwapWeekOrderRequest, SwapWeekOrderResponse,
    TechnicianRepository, TechnicianRepositoryError,
};
use crate::domain::{
    CalendarSettings, Error, Operator, PermissionGate, ShiftCode, Technician,
};

/// Scheduling service implementing the driving ports.
#[derive(Clone)]
pub struct ScheduleService<C, T> {
    calendars: Arc<C>,
    technicians: Arc<T>,
    settings: CalendarSettings,
}

impl<C, T> ScheduleService<C, T> {
    /// Create a new service over the given repositories.
    pub fn new(calendars: Arc<C>, technicians: Arc<T>, settings: CalendarSettings) -> Self {
        Self {
            calendars,
            technicians,
            settings,
        }
    }
}

impl<C, T> ScheduleService<C, T>
where
    C: CalendarRepository,
    T: TechnicianRepository,
{
    fn parse_key(month: u32, year: i32) -> Result<MonthKey, Error> {
        MonthKey::new(month, year).map_err(|err| {
            Error::invalid_calendar_parameters(err.to_string())
                .with_details(json!({ "month": month, "year": year }))
        })
    }

    fn map_calendar_error(error: CalendarRepositoryError) -> Error {
        match error {
            CalendarRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("calendar repository unavailable: {message}"))
            }
            CalendarRepositoryError::Query { message } => {
                Error::internal(format!("calendar repository error: {message}"))
            }
        }
    }

    fn map_technician_error(error: TechnicianRepositoryError) -> Error {
        match error {
            TechnicianRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("technician repository unavailable: {message}"))
            }
            TechnicianRepositoryError::Query { message }
            | TechnicianRepositoryError::DuplicateName { name: message } => {
                Error::internal(format!("technician repository error: {message}"))
            }
        }
    }

    fn map_document_error(error: DocumentError) -> Error {
        match error {
            DocumentError::WeekOutOfRange { week_index, weeks } => {
                Error::invalid_calendar_parameters(format!(
                    "week index {week_index} out of range for {weeks} weeks"
                ))
            }
            DocumentError::Order(err) => Error::invalid_calendar_parameters(err.to_string()),
            DocumentError::Assignment(err) => {
                use crate::domain::calendar::AssignmentError;
                match err {
                    AssignmentError::PaddingDay { cell } => Error::padding_day_assignment(
                        format!("cannot assign a shift to padding cell at {cell}"),
                    ),
                    other => Error::invalid_calendar_parameters(other.to_string()),
                }
            }
        }
    }

    async fn load_or_draft(&self, key: MonthKey) -> Result<(bool, CalendarDocument), Error> {
        let stored = self
            .calendars
            .find_by_key(&key)
            .await
            .map_err(Self::map_calendar_error)?;
        match stored {
            Some(document) => Ok((true, document)),
            None => Ok((
                false,
                CalendarDocument::draft(key, self.settings.weekday_locale),
            )),
        }
    }

    async fn roster(&self) -> Result<Vec<Technician>, Error> {
        self.technicians
            .list_active()
            .await
            .map_err(Self::map_technician_error)
    }

    async fn persist(
        &self,
        mut document: CalendarDocument,
        actor: &Operator,
    ) -> Result<CalendarDocument, Error> {
        document.stamp_saved(chrono::Utc::now(), actor);
        self.calendars
            .upsert(&document)
            .await
            .map_err(Self::map_calendar_error)?;
        Ok(document)
    }
}

#[async_trait]
impl<C, T> ScheduleQuery for ScheduleService<C, T>
where
    C: CalendarRepository,
    T: TechnicianRepository,
{
    async fn fetch_calendar(
        &self,
        request: FetchCalendarRequest,
    ) -> Result<FetchCalendarResponse, Error> {
        let key = Self::parse_key(request.month, request.year)?;
        let (exists, document) = self.load_or_draft(key).await?;
        Ok(FetchCalendarResponse { exists, document })
    }
}

#[async_trait]
impl<C, T> ScheduleCommand for ScheduleService<C, T>
where
    C: CalendarRepository,
    T: TechnicianRepository,
{
    async fn save_calendar(
        &self,
        request: SaveCalendarRequest,
    ) -> Result<SaveCalendarResponse, Error> {
        PermissionGate::ensure_can_mutate(&request.actor)?;

        let key = request.document.month_key();
        let document = self.persist(request.document, &request.actor).await?;

        debug!(month = key.month(), year = key.year(), "calendar saved");
        Ok(SaveCalendarResponse { document })
    }

    async fn swap_week_order(
        &self,
        request: SwapWeekOrderRequest,
    ) -> Result<SwapWeekOrderResponse, Error> {
        PermissionGate::ensure_can_mutate(&request.actor)?;

        let key = Self::parse_key(request.month, request.year)?;
        let (_, mut document) = self.load_or_draft(key).await?;
        let roster = self.roster().await?;

        document
            .swap_week_order(
                request.week_index,
                request.position_a,
                request.position_b,
                &roster,
            )
            .map_err(Self::map_document_error)?;

        let document = self.persist(document, &request.actor).await?;
        debug!(
            month = key.month(),
            year = key.year(),
            week_index = request.week_index,
            "week order swapped"
        );
        Ok(SwapWeekOrderResponse { document })
    }

    async fn assign_shift(
        &self,
        request: AssignShiftRequest,
    ) -> Result<AssignShiftResponse, Error> {
        PermissionGate::ensure_can_mutate(&request.actor)?;

        let key = Self::parse_key(request.month, request.year)?;
        let code: ShiftCode = request.shift_code.parse().map_err(|_| {
            Error::invalid_shift_code(format!("unknown shift code: {}", request.shift_code))
                .with_details(json!({ "shiftCode": request.shift_code }))
        })?;

        let (_, mut document) = self.load_or_draft(key).await?;
        document
            .assign_shift(request.cell, code)
            .map_err(Self::map_document_error)?;

        let document = self.persist(document, &request.actor).await?;
        debug!(
            month = key.month(),
            year = key.year(),
            week_index = request.cell.week_index,
            day_index = request.cell.day_index,
            slot_index = request.cell.slot_index,
            code = code.as_str(),
            "shift assigned"
        );
        Ok(AssignShiftResponse { document })
    }
}
