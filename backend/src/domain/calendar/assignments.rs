//! Shift assignments layered onto the month grid.
//!
//! Assignments are sparse: a cell without an entry reads as
//! [`ShiftCode::None`], and writing `None` clears the entry rather than
//! storing it. Writes are validated against the grid before anything
//! changes — out-of-range references and padding days are rejected whole.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::ShiftCode;

use super::grid::{DAYS_PER_WEEK, Week};
use super::week_order::SLOTS_PER_WEEK;

/// Coordinates of one technician/day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRef {
    /// Week row, `0..weeks.len()`.
    pub week_index: usize,
    /// Day column within the week, `0..7`.
    pub day_index: usize,
    /// Technician slot row, `0..4`.
    pub slot_index: usize,
}

impl CellRef {
    /// Convenience constructor.
    pub fn new(week_index: usize, day_index: usize, slot_index: usize) -> Self {
        Self {
            week_index,
            day_index,
            slot_index,
        }
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "week {} day {} slot {}",
            self.week_index, self.day_index, self.slot_index
        )
    }
}

/// Validation errors returned by [`ShiftAssignmentStore::assign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    WeekOutOfRange { week_index: usize, weeks: usize },
    DayOutOfRange { day_index: usize },
    SlotOutOfRange { slot_index: usize },
    PaddingDay { cell: CellRef },
}

impl std::fmt::Display for AssignmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WeekOutOfRange { week_index, weeks } => {
                write!(f, "week index {week_index} out of range for {weeks} weeks")
            }
            Self::DayOutOfRange { day_index } => {
                write!(f, "day index must be below {DAYS_PER_WEEK}, got {day_index}")
            }
            Self::SlotOutOfRange { slot_index } => {
                write!(
                    f,
                    "slot index must be below {SLOTS_PER_WEEK}, got {slot_index}"
                )
            }
            Self::PaddingDay { cell } => {
                write!(f, "cannot assign a shift to padding cell at {cell}")
            }
        }
    }
}

impl std::error::Error for AssignmentError {}

/// Sparse map from cell coordinates to shift codes.
///
/// # Examples
///
/// ```
/// use backend::domain::{CellRef, ShiftAssignmentStore, ShiftCode};
///
/// let store = ShiftAssignmentStore::default();
/// assert_eq!(store.shift_at(CellRef::new(0, 0, 0)), ShiftCode::None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<CellAssignmentDto>", into = "Vec<CellAssignmentDto>")]
pub struct ShiftAssignmentStore {
    cells: BTreeMap<CellRef, ShiftCode>,
}

impl ShiftAssignmentStore {
    /// Shift code at a cell; absent entries read as [`ShiftCode::None`].
    pub fn shift_at(&self, cell: CellRef) -> ShiftCode {
        self.cells.get(&cell).copied().unwrap_or_default()
    }

    /// Validate `cell` against the grid and record `code`.
    ///
    /// Writing [`ShiftCode::None`] clears the entry. Nothing changes when
    /// validation fails.
    pub fn assign(
        &mut self,
        weeks: &[Week],
        cell: CellRef,
        code: ShiftCode,
    ) -> Result<(), AssignmentError> {
        let week = weeks
            .get(cell.week_index)
            .ok_or(AssignmentError::WeekOutOfRange {
                week_index: cell.week_index,
                weeks: weeks.len(),
            })?;
        let day = week.day(cell.day_index).ok_or(AssignmentError::DayOutOfRange {
            day_index: cell.day_index,
        })?;
        if cell.slot_index >= SLOTS_PER_WEEK {
            return Err(AssignmentError::SlotOutOfRange {
                slot_index: cell.slot_index,
            });
        }
        if day.is_padding() {
            return Err(AssignmentError::PaddingDay { cell });
        }

        if code.is_assigned() {
            self.cells.insert(cell, code);
        } else {
            self.cells.remove(&cell);
        }
        Ok(())
    }

    /// Iterate over the stored (non-`None`) assignments.
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, ShiftCode)> + '_ {
        self.cells.iter().map(|(cell, code)| (*cell, *code))
    }

    /// Number of stored assignments.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell carries an assignment.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether every stored cell is addressable and non-padding in `weeks`.
    pub(crate) fn all_cells_valid(&self, weeks: &[Week]) -> bool {
        self.cells.iter().all(|(cell, code)| {
            code.is_assigned()
                && cell.slot_index < SLOTS_PER_WEEK
                && weeks
                    .get(cell.week_index)
                    .and_then(|week| week.day(cell.day_index))
                    .is_some_and(|day| !day.is_padding())
        })
    }
}

/// Flat serialisation entry; JSON object keys must be strings, so the cell
/// map persists as a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellAssignmentDto {
    week_index: usize,
    day_index: usize,
    slot_index: usize,
    shift_code: ShiftCode,
}

impl From<ShiftAssignmentStore> for Vec<CellAssignmentDto> {
    fn from(value: ShiftAssignmentStore) -> Self {
        value
            .cells
            .into_iter()
            .map(|(cell, shift_code)| CellAssignmentDto {
                week_index: cell.week_index,
                day_index: cell.day_index,
                slot_index: cell.slot_index,
                shift_code,
            })
            .collect()
    }
}

/// Deserialisation errors for stored assignment lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredAssignmentError {
    DuplicateCell { cell: CellRef },
    NoneEntry { cell: CellRef },
}

impl std::fmt::Display for StoredAssignmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateCell { cell } => {
                write!(f, "duplicate stored assignment for {cell}")
            }
            Self::NoneEntry { cell } => {
                write!(f, "stored assignment for {cell} carries no shift code")
            }
        }
    }
}

impl std::error::Error for StoredAssignmentError {}

impl TryFrom<Vec<CellAssignmentDto>> for ShiftAssignmentStore {
    type Error = StoredAssignmentError;

    fn try_from(value: Vec<CellAssignmentDto>) -> Result<Self, Self::Error> {
        let mut cells = BTreeMap::new();
        for entry in value {
            let cell = CellRef::new(entry.week_index, entry.day_index, entry.slot_index);
            if !entry.shift_code.is_assigned() {
                return Err(StoredAssignmentError::NoneEntry { cell });
            }
            if cells.insert(cell, entry.shift_code).is_some() {
                return Err(StoredAssignmentError::DuplicateCell { cell });
            }
        }
        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{MonthKey, WeekdayLocale, build_month_grid};
    use rstest::rstest;

    fn february_2024() -> Vec<Week> {
        let key = MonthKey::new(2, 2024).expect("valid key");
        build_month_grid(&key, WeekdayLocale::Spanish)
    }

    #[rstest]
    fn absent_cells_read_as_none() {
        let store = ShiftAssignmentStore::default();
        assert_eq!(store.shift_at(CellRef::new(1, 2, 3)), ShiftCode::None);
        assert!(store.is_empty());
    }

    #[rstest]
    fn assign_and_read_back() {
        let weeks = february_2024();
        let mut store = ShiftAssignmentStore::default();
        let cell = CellRef::new(0, 4, 0);

        store
            .assign(&weeks, cell, ShiftCode::Morning)
            .expect("assignment succeeds");
        assert_eq!(store.shift_at(cell), ShiftCode::Morning);
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    fn assigning_none_clears_the_entry() {
        let weeks = february_2024();
        let mut store = ShiftAssignmentStore::default();
        let cell = CellRef::new(1, 0, 2);

        store
            .assign(&weeks, cell, ShiftCode::Night)
            .expect("assignment succeeds");
        store
            .assign(&weeks, cell, ShiftCode::None)
            .expect("clearing succeeds");

        assert_eq!(store.shift_at(cell), ShiftCode::None);
        assert!(store.is_empty());
    }

    #[rstest]
    fn padding_cells_reject_assignment() {
        // February 2024 starts on a Thursday; columns 0..4 of week 0 pad.
        let weeks = february_2024();
        let mut store = ShiftAssignmentStore::default();
        let cell = CellRef::new(0, 0, 0);

        let err = store
            .assign(&weeks, cell, ShiftCode::Morning)
            .expect_err("padding must be rejected");
        assert_eq!(err, AssignmentError::PaddingDay { cell });
        assert!(store.is_empty());
    }

    #[rstest]
    #[case::week(CellRef::new(9, 0, 0))]
    #[case::day(CellRef::new(0, 7, 0))]
    #[case::slot(CellRef::new(0, 4, 4))]
    fn out_of_range_references_are_rejected(#[case] cell: CellRef) {
        let weeks = february_2024();
        let mut store = ShiftAssignmentStore::default();

        assert!(store.assign(&weeks, cell, ShiftCode::Support).is_err());
        assert!(store.is_empty());
    }

    #[rstest]
    fn serde_round_trip_preserves_assignments() {
        let weeks = february_2024();
        let mut store = ShiftAssignmentStore::default();
        store
            .assign(&weeks, CellRef::new(0, 4, 0), ShiftCode::Morning)
            .expect("assignment succeeds");
        store
            .assign(&weeks, CellRef::new(2, 3, 1), ShiftCode::RestDay)
            .expect("assignment succeeds");

        let encoded = serde_json::to_string(&store).expect("serialise");
        let decoded: ShiftAssignmentStore = serde_json::from_str(&encoded).expect("deserialise");
        assert_eq!(decoded, store);
    }

    #[rstest]
    fn deserialisation_rejects_duplicate_cells() {
        let raw = r#"[
            {"weekIndex":0,"dayIndex":4,"slotIndex":0,"shiftCode":"morning"},
            {"weekIndex":0,"dayIndex":4,"slotIndex":0,"shiftCode":"night"}
        ]"#;
        let result: Result<ShiftAssignmentStore, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }

    #[rstest]
    fn deserialisation_rejects_stored_none() {
        let raw = r#"[{"weekIndex":0,"dayIndex":4,"slotIndex":0,"shiftCode":"none"}]"#;
        let result: Result<ShiftAssignmentStore, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }
}
