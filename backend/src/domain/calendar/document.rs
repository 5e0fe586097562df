//! The persisted calendar aggregate.
//!
//! A [`CalendarDocument`] is an explicit value: operations load it, mutate
//! it, and save it back whole. There is no ambient calendar state anywhere
//! in the engine. Documents are keyed by [`MonthKey`], created on first
//! save, and only ever overwritten — never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Operator, OperatorId, ShiftCode, Technician, WeekdayLocale};

use super::assignments::{AssignmentError, CellRef, ShiftAssignmentStore};
use super::grid::{MonthKey, MonthKeyValidationError, Week, build_month_grid, grid_matches_key};
use super::week_order::{SlotEntry, SlotOccupant, WeekOrderError, WeekOrderTable};

/// Validation errors raised while mutating a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    WeekOutOfRange { week_index: usize, weeks: usize },
    Order(WeekOrderError),
    Assignment(AssignmentError),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WeekOutOfRange { week_index, weeks } => {
                write!(f, "week index {week_index} out of range for {weeks} weeks")
            }
            Self::Order(err) => err.fmt(f),
            Self::Assignment(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<WeekOrderError> for DocumentError {
    fn from(value: WeekOrderError) -> Self {
        Self::Order(value)
    }
}

impl From<AssignmentError> for DocumentError {
    fn from(value: AssignmentError) -> Self {
        Self::Assignment(value)
    }
}

/// One month's schedule: grid, per-week order, assignments, metadata.
///
/// ## Invariants
/// - `weeks` is exactly the grid [`build_month_grid`] produces for
///   `month_key` (day-number layout; the weekday locale may differ);
/// - every materialised week order and stored assignment satisfies its own
///   module's invariants against that grid.
///
/// # Examples
///
/// ```
/// use backend::domain::{CalendarDocument, MonthKey, WeekdayLocale};
///
/// let key = MonthKey::new(2, 2024).unwrap();
/// let doc = CalendarDocument::draft(key, WeekdayLocale::Spanish);
/// assert_eq!(doc.weeks().len(), 5);
/// assert!(doc.updated_at().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "CalendarDocumentDto", into = "CalendarDocumentDto")]
pub struct CalendarDocument {
    month_key: MonthKey,
    weeks: Vec<Week>,
    week_orders: WeekOrderTable,
    assignments: ShiftAssignmentStore,
    updated_at: Option<DateTime<Utc>>,
    created_by: Option<OperatorId>,
}

impl CalendarDocument {
    /// Synthesise a fresh, never-saved document for a month.
    pub fn draft(month_key: MonthKey, locale: WeekdayLocale) -> Self {
        Self {
            weeks: build_month_grid(&month_key, locale),
            month_key,
            week_orders: WeekOrderTable::default(),
            assignments: ShiftAssignmentStore::default(),
            updated_at: None,
            created_by: None,
        }
    }

    /// The (month, year) persistence key.
    pub fn month_key(&self) -> MonthKey {
        self.month_key
    }

    /// The week/day grid.
    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// The per-week order table.
    pub fn week_orders(&self) -> &WeekOrderTable {
        &self.week_orders
    }

    /// The sparse assignment store.
    pub fn assignments(&self) -> &ShiftAssignmentStore {
        &self.assignments
    }

    /// When the document was last saved; `None` for an unsaved draft.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Operator who first saved the document.
    pub fn created_by(&self) -> Option<OperatorId> {
        self.created_by
    }

    /// Effective slot order for a week (explicit or roster default).
    pub fn order_for(&self, week_index: usize, roster: &[Technician]) -> Vec<SlotOccupant> {
        self.week_orders.order_for(week_index, roster)
    }

    /// Effective slot order resolved to display entries.
    pub fn resolve_entries(&self, week_index: usize, roster: &[Technician]) -> Vec<SlotEntry> {
        self.week_orders.resolve_entries(week_index, roster)
    }

    /// Shift code at a cell; absent entries read as [`ShiftCode::None`].
    pub fn shift_at(&self, cell: CellRef) -> ShiftCode {
        self.assignments.shift_at(cell)
    }

    /// Exchange two slot positions within one week of this month.
    pub fn swap_week_order(
        &mut self,
        week_index: usize,
        position_a: usize,
        position_b: usize,
        roster: &[Technician],
    ) -> Result<(), DocumentError> {
        if week_index >= self.weeks.len() {
            return Err(DocumentError::WeekOutOfRange {
                week_index,
                weeks: self.weeks.len(),
            });
        }
        self.week_orders
            .swap(week_index, position_a, position_b, roster)?;
        Ok(())
    }

    /// Record a shift code at a cell, validating against the grid.
    pub fn assign_shift(&mut self, cell: CellRef, code: ShiftCode) -> Result<(), DocumentError> {
        self.assignments.assign(&self.weeks, cell, code)?;
        Ok(())
    }

    /// Stamp save metadata: `updated_at` always, `created_by` on first save.
    pub fn stamp_saved(&mut self, saved_at: DateTime<Utc>, saved_by: &Operator) {
        self.updated_at = Some(saved_at);
        if self.created_by.is_none() {
            self.created_by = Some(saved_by.id());
        }
    }
}

/// Validation errors for documents arriving from storage or a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    Key(MonthKeyValidationError),
    GridMismatch,
    InvalidWeekOrder,
    InvalidAssignment,
}

impl std::fmt::Display for DocumentValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(err) => err.fmt(f),
            Self::GridMismatch => {
                write!(f, "stored weeks do not match the month grid for the key")
            }
            Self::InvalidWeekOrder => {
                write!(f, "a stored week order violates the slot invariants")
            }
            Self::InvalidAssignment => {
                write!(f, "a stored assignment references an invalid or padding cell")
            }
        }
    }
}

impl std::error::Error for DocumentValidationError {}

impl From<MonthKeyValidationError> for DocumentValidationError {
    fn from(value: MonthKeyValidationError) -> Self {
        Self::Key(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarDocumentDto {
    month: u32,
    year: i32,
    weeks: Vec<Week>,
    week_orders: WeekOrderTable,
    assignments: ShiftAssignmentStore,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_by: Option<OperatorId>,
}

impl From<CalendarDocument> for CalendarDocumentDto {
    fn from(value: CalendarDocument) -> Self {
        Self {
            month: value.month_key.month(),
            year: value.month_key.year(),
            weeks: value.weeks,
            week_orders: value.week_orders,
            assignments: value.assignments,
            updated_at: value.updated_at,
            created_by: value.created_by,
        }
    }
}

impl TryFrom<CalendarDocumentDto> for CalendarDocument {
    type Error = DocumentValidationError;

    fn try_from(value: CalendarDocumentDto) -> Result<Self, Self::Error> {
        let month_key = MonthKey::new(value.month, value.year)?;
        if !grid_matches_key(&month_key, &value.weeks) {
            return Err(DocumentValidationError::GridMismatch);
        }
        if !value.week_orders.all_orders_valid() {
            return Err(DocumentValidationError::InvalidWeekOrder);
        }
        if !value.assignments.all_cells_valid(&value.weeks) {
            return Err(DocumentValidationError::InvalidAssignment);
        }
        Ok(Self {
            month_key,
            weeks: value.weeks,
            week_orders: value.week_orders,
            assignments: value.assignments,
            updated_at: value.updated_at,
            created_by: value.created_by,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ColorTag, Role, TechnicianId, TechnicianName};
    use rstest::rstest;

    fn technician(name: &str) -> Technician {
        Technician::new(
            TechnicianId::random(),
            TechnicianName::new(name).expect("valid name"),
            ColorTag::new("#93C47D").expect("valid tag"),
        )
    }

    fn sample_roster() -> Vec<Technician> {
        vec![technician("Ana"), technician("Luis")]
    }

    fn draft_february() -> CalendarDocument {
        let key = MonthKey::new(2, 2024).expect("valid key");
        CalendarDocument::draft(key, WeekdayLocale::Spanish)
    }

    #[rstest]
    fn draft_has_empty_state_and_no_metadata() {
        let doc = draft_february();
        assert!(doc.week_orders().is_empty());
        assert!(doc.assignments().is_empty());
        assert!(doc.updated_at().is_none());
        assert!(doc.created_by().is_none());
    }

    #[rstest]
    fn swap_rejects_weeks_outside_the_month() {
        let mut doc = draft_february();
        let roster = sample_roster();

        let err = doc
            .swap_week_order(9, 0, 1, &roster)
            .expect_err("week 9 does not exist in February");
        assert!(matches!(err, DocumentError::WeekOutOfRange { .. }));
        assert!(doc.week_orders().is_empty());
    }

    #[rstest]
    fn mutations_flow_through_to_state() {
        let mut doc = draft_february();
        let roster = sample_roster();
        let cell = CellRef::new(0, 4, 0);

        doc.swap_week_order(1, 0, 1, &roster).expect("swap succeeds");
        doc.assign_shift(cell, ShiftCode::Morning)
            .expect("assignment succeeds");

        assert_eq!(doc.shift_at(cell), ShiftCode::Morning);
        let order = doc.order_for(1, &roster);
        assert_eq!(order.len(), 4);
        assert_eq!(
            doc.week_orders().explicit_weeks().collect::<Vec<_>>(),
            vec![1]
        );
    }

    #[rstest]
    fn stamp_saved_sets_updated_at_and_keeps_creator() {
        let mut doc = draft_february();
        let first = Operator::new("Eva", Role::Admin);
        let second = Operator::new("Iker", Role::Admin);

        let t1 = Utc::now();
        doc.stamp_saved(t1, &first);
        assert_eq!(doc.updated_at(), Some(t1));
        assert_eq!(doc.created_by(), Some(first.id()));

        let t2 = Utc::now();
        doc.stamp_saved(t2, &second);
        assert_eq!(doc.updated_at(), Some(t2));
        // Creator never changes after the first save.
        assert_eq!(doc.created_by(), Some(first.id()));
    }

    #[rstest]
    fn serde_round_trip_preserves_everything() {
        let mut doc = draft_february();
        let roster = sample_roster();
        doc.swap_week_order(2, 1, 3, &roster).expect("swap succeeds");
        doc.assign_shift(CellRef::new(0, 4, 1), ShiftCode::Vacation)
            .expect("assignment succeeds");
        doc.stamp_saved(Utc::now(), &Operator::new("Eva", Role::Admin));

        let encoded = serde_json::to_string(&doc).expect("serialise");
        let decoded: CalendarDocument = serde_json::from_str(&encoded).expect("deserialise");
        assert_eq!(decoded, doc);
    }

    #[rstest]
    fn deserialisation_rejects_a_mismatched_grid() {
        let doc = draft_february();
        let mut value = serde_json::to_value(&doc).expect("serialise");
        value["month"] = serde_json::json!(3);

        let result: Result<CalendarDocument, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[rstest]
    fn deserialisation_rejects_padding_assignments() {
        let doc = draft_february();
        let mut value = serde_json::to_value(&doc).expect("serialise");
        value["assignments"] = serde_json::json!([
            {"weekIndex": 0, "dayIndex": 0, "slotIndex": 0, "shiftCode": "morning"}
        ]);

        let result: Result<CalendarDocument, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}
