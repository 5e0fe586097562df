//! Driving port for roster reads.

use async_trait::async_trait;

use crate::domain::{Error, Technician};

/// Domain use-case port for listing schedulable technicians.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterQuery: Send + Sync {
    /// Active technicians ordered by name (case-insensitive).
    async fn list_technicians(&self) -> Result<Vec<Technician>, Error>;
}

/// Fixture roster query with a single deterministic technician.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRosterQuery;

#[async_trait]
impl RosterQuery for FixtureRosterQuery {
    async fn list_technicians(&self) -> Result<Vec<Technician>, Error> {
        const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

        // These values are compile-time constants; surface invalid data as
        // an internal error so automated checks catch regressions.
        let technician = Technician::try_from_strings(FIXTURE_ID, "Ana", "#3AB0FF")
            .map_err(|err| Error::internal(format!("invalid fixture technician: {err}")))?;
        Ok(vec![technician])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_query_returns_the_expected_technician() {
        let query = FixtureRosterQuery;
        let roster = query.list_technicians().await.expect("roster list");

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name().as_ref(), "Ana");
        assert!(roster[0].is_active());
    }
}
