//! Persistence adapters for the calendar and roster driven ports.

mod memory;

pub use memory::{InMemoryCalendarRepository, InMemoryTechnicianRepository};
