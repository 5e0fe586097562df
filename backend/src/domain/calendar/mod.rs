//! Calendar grid, per-week ordering, shift assignments, and the persisted
//! aggregate that binds them.

mod assignments;
mod document;
mod grid;
mod week_order;

pub use assignments::{AssignmentError, CellRef, ShiftAssignmentStore, StoredAssignmentError};
pub use document::{CalendarDocument, DocumentError, DocumentValidationError};
pub use grid::{
    DAYS_PER_WEEK, Day, MonthKey, MonthKeyValidationError, Week, build_month_grid,
};
pub use week_order::{
    SLOTS_PER_WEEK, SlotEntry, SlotOccupant, WeekOrderError, WeekOrderTable,
};
