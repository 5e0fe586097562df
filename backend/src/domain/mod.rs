//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: model the shift-scheduling calendar as explicit, strongly typed
//! values — no ambient mutable state — and expose the engine's operations
//! through driving ports implemented by request-scoped services. Types are
//! immutable where possible; invariants and serialisation contracts (serde)
//! are documented in each type's Rustdoc.

pub mod calendar;
pub mod error;
pub mod export;
pub mod permission;
pub mod ports;
mod roster_service;
mod schedule_service;
pub mod settings;
pub mod shift;
pub mod technician;

pub use self::calendar::{
    AssignmentError, CalendarDocument, CellRef, DAYS_PER_WEEK, Day, DocumentError,
    DocumentValidationError, MonthKey, MonthKeyValidationError, SLOTS_PER_WEEK,
    ShiftAssignmentStore, SlotEntry, SlotOccupant, StoredAssignmentError, Week, WeekOrderError,
    WeekOrderTable, build_month_grid,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::export::{
    CalendarExport, CalendarExporter, EXPORT_WEEK_CAP, ExportCell, ExportRow, ExportWeek,
    LegendEntry,
};
pub use self::permission::{Operator, OperatorId, PermissionGate, Role};
pub use self::roster_service::RosterService;
pub use self::schedule_service::ScheduleService;
pub use self::settings::{CalendarSettings, WeekdayLocale};
pub use self::shift::{ALL_SHIFT_CODES, ParseShiftCodeError, ShiftCode};
pub use self::technician::{
    ColorTag, TECHNICIAN_NAME_MAX, Technician, TechnicianId, TechnicianName,
    TechnicianValidationError,
};

/// Convenient engine result alias.
///
/// # Examples
/// ```
/// use backend::domain::{EngineResult, Error};
///
/// fn deny() -> EngineResult<()> {
///     Err(Error::insufficient_privilege("calendar is read-only"))
/// }
/// ```
pub type EngineResult<T> = Result<T, Error>;
