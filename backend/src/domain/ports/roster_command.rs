//! Driving port for roster mutations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{
    ColorTag, Error, Operator, PermissionGate, Technician, TechnicianId, TechnicianName,
};

/// Request to add a technician to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTechnicianRequest {
    pub actor: Operator,
    pub name: String,
    pub color_tag: String,
}

/// Response carrying the created technician.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTechnicianResponse {
    pub technician: Technician,
}

/// Domain use-case port for roster writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterCommand: Send + Sync {
    /// Create an active technician.
    ///
    /// Requires the mutate capability; rejects names already held by an
    /// active technician (case-insensitive) with `DuplicateTechnicianName`.
    async fn create_technician(
        &self,
        request: CreateTechnicianRequest,
    ) -> Result<CreateTechnicianResponse, Error>;
}

/// Fixture command that validates inputs but persists nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRosterCommand;

#[async_trait]
impl RosterCommand for FixtureRosterCommand {
    async fn create_technician(
        &self,
        request: CreateTechnicianRequest,
    ) -> Result<CreateTechnicianResponse, Error> {
        PermissionGate::ensure_can_mutate(&request.actor)?;
        let name = TechnicianName::new(request.name)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let color_tag = ColorTag::new(request.color_tag)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        Ok(CreateTechnicianResponse {
            technician: Technician::new(TechnicianId::random(), name, color_tag),
        })
    }
}
