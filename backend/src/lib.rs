//! Per-week technician shift-scheduling calendar engine.
//!
//! Given a month and year the engine builds a week/day grid, orders up to
//! four technician slots independently per week, assigns shift codes to
//! technician/day cells, persists the whole document keyed by (month, year),
//! and renders a five-week capped export. Authentication, HTTP wiring, and
//! storage technology live in external collaborators behind the ports in
//! [`domain::ports`]; [`outbound::persistence`] ships deterministic
//! in-memory adapters.

pub mod domain;
pub mod outbound;

pub use domain::{EngineResult, Error, ErrorCode};
