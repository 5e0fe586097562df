//! Driving port for calendar mutations.
//!
//! Every operation is request-scoped: permission check, load, mutate, save,
//! respond — nothing survives between requests. Shift codes arrive as
//! strings and parse through the closed enumeration at this boundary, so an
//! unknown code is rejected before any document is touched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{CalendarDocument, CellRef, Error, Operator};

/// Request to upsert a whole calendar document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCalendarRequest {
    pub actor: Operator,
    pub document: CalendarDocument,
}

/// Response carrying the saved document with fresh metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCalendarResponse {
    pub document: CalendarDocument,
}

/// Request to exchange two slot positions within one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapWeekOrderRequest {
    pub actor: Operator,
    pub month: u32,
    pub year: i32,
    pub week_index: usize,
    pub position_a: usize,
    pub position_b: usize,
}

/// Response carrying the document after the swap was persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapWeekOrderResponse {
    pub document: CalendarDocument,
}

/// Request to record a shift code at one technician/day cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignShiftRequest {
    pub actor: Operator,
    pub month: u32,
    pub year: i32,
    pub cell: CellRef,
    /// Stable string form of the shift code, e.g. `"morning"`.
    pub shift_code: String,
}

/// Response carrying the document after the assignment was persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignShiftResponse {
    pub document: CalendarDocument,
}

/// Domain use-case port for calendar writes.
///
/// All three operations require the mutate capability and fail with
/// `InsufficientPrivilege` — before loading anything — when the actor is
/// read-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleCommand: Send + Sync {
    /// Upsert a whole document under its month key, stamping `updated_at`
    /// and, on first save, `created_by`. Last write wins.
    async fn save_calendar(
        &self,
        request: SaveCalendarRequest,
    ) -> Result<SaveCalendarResponse, Error>;

    /// Exchange two slot positions within one week and persist the result.
    async fn swap_week_order(
        &self,
        request: SwapWeekOrderRequest,
    ) -> Result<SwapWeekOrderResponse, Error>;

    /// Record a shift code at a cell and persist the result.
    async fn assign_shift(
        &self,
        request: AssignShiftRequest,
    ) -> Result<AssignShiftResponse, Error>;
}
