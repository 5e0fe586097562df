//! Roster domain service.
//!
//! Implements the roster driving ports over the technician repository,
//! enforcing the permission gate and the case-insensitive uniqueness of
//! active technician names.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CreateTechnicianRequest, CreateTechnicianResponse, RosterCommand, RosterQuery,
    TechnicianRepository, TechnicianRepositoryError,
};
use crate::domain::{
    ColorTag, Error, PermissionGate, Technician, TechnicianId, TechnicianName,
};

/// Roster service implementing the driving ports.
#[derive(Clone)]
pub struct RosterService<T> {
    technicians: Arc<T>,
}

impl<T> RosterService<T> {
    /// Create a new service over the given repository.
    pub fn new(technicians: Arc<T>) -> Self {
        Self { technicians }
    }
}

impl<T> RosterService<T>
where
    T: TechnicianRepository,
{
    fn map_repository_error(error: TechnicianRepositoryError) -> Error {
        match error {
            TechnicianRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("technician repository unavailable: {message}"))
            }
            TechnicianRepositoryError::Query { message } => {
                Error::internal(format!("technician repository error: {message}"))
            }
            TechnicianRepositoryError::DuplicateName { name } => {
                Self::duplicate_name_error(&name)
            }
        }
    }

    fn duplicate_name_error(name: &str) -> Error {
        Error::duplicate_technician_name(format!(
            "an active technician named {name} already exists"
        ))
    }
}

#[async_trait]
impl<T> RosterQuery for RosterService<T>
where
    T: TechnicianRepository,
{
    async fn list_technicians(&self) -> Result<Vec<Technician>, Error> {
        let mut roster = self
            .technicians
            .list_active()
            .await
            .map_err(Self::map_repository_error)?;
        roster.sort_by_key(|t| (t.name().fold_key(), t.id().clone()));
        Ok(roster)
    }
}

#[async_trait]
impl<T> RosterCommand for RosterService<T>
where
    T: TechnicianRepository,
{
    async fn create_technician(
        &self,
        request: CreateTechnicianRequest,
    ) -> Result<CreateTechnicianResponse, Error> {
        PermissionGate::ensure_can_mutate(&request.actor)?;

        let name = TechnicianName::new(request.name)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let color_tag = ColorTag::new(request.color_tag)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        // Pre-check before inserting; adapters with a unique index still
        // return DuplicateName if a concurrent insert wins the race.
        if self
            .technicians
            .find_active_by_name(&name)
            .await
            .map_err(Self::map_repository_error)?
            .is_some()
        {
            return Err(Self::duplicate_name_error(name.as_ref()));
        }

        let technician = Technician::new(TechnicianId::random(), name, color_tag);
        self.technicians
            .insert(&technician)
            .await
            .map_err(Self::map_repository_error)?;

        debug!(
            technician = %technician.id(),
            name = technician.name().as_ref(),
            "technician created"
        );
        Ok(CreateTechnicianResponse { technician })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockTechnicianRepository;
    use crate::domain::{ErrorCode, Operator, Role};

    fn make_service(repo: MockTechnicianRepository) -> RosterService<MockTechnicianRepository> {
        RosterService::new(Arc::new(repo))
    }

    fn technician(name: &str) -> Technician {
        Technician::new(
            TechnicianId::random(),
            TechnicianName::new(name).expect("valid name"),
            ColorTag::new("#3AB0FF").expect("valid tag"),
        )
    }

    fn create_request(actor: Operator, name: &str) -> CreateTechnicianRequest {
        CreateTechnicianRequest {
            actor,
            name: name.to_owned(),
            color_tag: "#93C47D".to_owned(),
        }
    }

    #[tokio::test]
    async fn list_orders_technicians_by_name() {
        let mut repo = MockTechnicianRepository::new();
        repo.expect_list_active()
            .times(1)
            .return_once(|| Ok(vec![technician("Marta"), technician("ana")]));

        let roster = make_service(repo)
            .list_technicians()
            .await
            .expect("list succeeds");

        let names: Vec<&str> = roster.iter().map(|t| t.name().as_ref()).collect();
        assert_eq!(names, ["ana", "Marta"]);
    }

    #[tokio::test]
    async fn create_inserts_a_new_technician() {
        let mut repo = MockTechnicianRepository::new();
        repo.expect_find_active_by_name()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_insert().times(1).return_once(|_| Ok(()));

        let response = make_service(repo)
            .create_technician(create_request(Operator::new("Eva", Role::Admin), "Ana"))
            .await
            .expect("creation succeeds");

        assert_eq!(response.technician.name().as_ref(), "Ana");
        assert!(response.technician.is_active());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_active_names() {
        let mut repo = MockTechnicianRepository::new();
        repo.expect_find_active_by_name()
            .times(1)
            .return_once(|_| Ok(Some(technician("Ana"))));
        repo.expect_insert().times(0);

        let err = make_service(repo)
            .create_technician(create_request(Operator::new("Eva", Role::Admin), "ANA"))
            .await
            .expect_err("duplicate must fail");

        assert_eq!(err.code(), ErrorCode::DuplicateTechnicianName);
    }

    #[tokio::test]
    async fn create_maps_adapter_duplicate_races() {
        let mut repo = MockTechnicianRepository::new();
        repo.expect_find_active_by_name()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .return_once(|_| Err(TechnicianRepositoryError::duplicate_name("Ana")));

        let err = make_service(repo)
            .create_technician(create_request(Operator::new("Eva", Role::Admin), "Ana"))
            .await
            .expect_err("duplicate must fail");

        assert_eq!(err.code(), ErrorCode::DuplicateTechnicianName);
    }

    #[tokio::test]
    async fn create_denies_read_only_actors_before_any_lookup() {
        let mut repo = MockTechnicianRepository::new();
        repo.expect_find_active_by_name().times(0);
        repo.expect_insert().times(0);

        let err = make_service(repo)
            .create_technician(create_request(Operator::new("Sam", Role::ReadOnly), "Ana"))
            .await
            .expect_err("read-only actor must be denied");

        assert_eq!(err.code(), ErrorCode::InsufficientPrivilege);
    }

    #[tokio::test]
    async fn create_rejects_malformed_inputs() {
        let mut repo = MockTechnicianRepository::new();
        repo.expect_find_active_by_name().times(0);
        repo.expect_insert().times(0);

        let err = make_service(repo)
            .create_technician(create_request(Operator::new("Eva", Role::Admin), "   "))
            .await
            .expect_err("blank name must fail");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn connection_failures_surface_as_service_unavailable() {
        let mut repo = MockTechnicianRepository::new();
        repo.expect_list_active()
            .times(1)
            .return_once(|| Err(TechnicianRepositoryError::connection("refused")));

        let err = make_service(repo)
            .list_technicians()
            .await
            .expect_err("connection failure must surface");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
