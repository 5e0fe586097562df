//! Domain ports and supporting types for the hexagonal boundary.

mod calendar_repository;
mod roster_command;
mod roster_query;
mod schedule_command;
mod schedule_query;
mod technician_repository;

#[cfg(test)]
pub use calendar_repository::MockCalendarRepository;
pub use calendar_repository::{
    CalendarRepository, CalendarRepositoryError, FixtureCalendarRepository,
};
#[cfg(test)]
pub use roster_command::MockRosterCommand;
pub use roster_command::{
    CreateTechnicianRequest, CreateTechnicianResponse, FixtureRosterCommand, RosterCommand,
};
#[cfg(test)]
pub use roster_query::MockRosterQuery;
pub use roster_query::{FixtureRosterQuery, RosterQuery};
#[cfg(test)]
pub use schedule_command::MockScheduleCommand;
pub use schedule_command::{
    AssignShiftRequest, AssignShiftResponse, SaveCalendarRequest, SaveCalendarResponse,
    ScheduleCommand, SwapWeekOrderRequest, SwapWeekOrderResponse,
};
#[cfg(test)]
pub use schedule_query::MockScheduleQuery;
pub use schedule_query::{FetchCalendarRequest, FetchCalendarResponse, FixtureScheduleQuery, ScheduleQuery};
#[cfg(test)]
pub use technician_repository::MockTechnicianRepository;
pub use technician_repository::{
    FixtureTechnicianRepository, TechnicianRepository, TechnicianRepositoryError,
};
