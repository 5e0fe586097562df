//! Driven port for the technician roster store.
//!
//! One row per technician; technicians are never hard-deleted, so the store
//! only ever inserts and toggles the active flag (the toggle belongs to an
//! external administrative surface, not to this port).

use async_trait::async_trait;

use crate::domain::{Technician, TechnicianName};

/// Errors raised by technician repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TechnicianRepositoryError {
    /// Repository connection could not be established.
    #[error("technician repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("technician repository query failed: {message}")]
    Query { message: String },
    /// An active technician with the same name already exists.
    #[error("an active technician named {name} already exists")]
    DuplicateName { name: String },
}

impl TechnicianRepositoryError {
    /// Build a [`TechnicianRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`TechnicianRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Build a [`TechnicianRepositoryError::DuplicateName`].
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }
}

/// Port for roster storage and retrieval.
///
/// Name uniqueness is case-insensitive and scoped to *active* technicians;
/// a retired technician's name may be reused.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TechnicianRepository: Send + Sync {
    /// All active technicians, in storage order.
    async fn list_active(&self) -> Result<Vec<Technician>, TechnicianRepositoryError>;

    /// Find an active technician whose name matches case-insensitively.
    async fn find_active_by_name(
        &self,
        name: &TechnicianName,
    ) -> Result<Option<Technician>, TechnicianRepositoryError>;

    /// Insert a new technician row.
    ///
    /// Adapters with a unique index return
    /// [`TechnicianRepositoryError::DuplicateName`] when an active row with
    /// the same folded name exists.
    async fn insert(&self, technician: &Technician) -> Result<(), TechnicianRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the roster.
///
/// The roster reads as empty and inserts are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTechnicianRepository;

#[async_trait]
impl TechnicianRepository for FixtureTechnicianRepository {
    async fn list_active(&self) -> Result<Vec<Technician>, TechnicianRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_active_by_name(
        &self,
        _name: &TechnicianName,
    ) -> Result<Option<Technician>, TechnicianRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _technician: &Technician) -> Result<(), TechnicianRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColorTag, TechnicianId};
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_repository_reads_an_empty_roster() {
        let repo = FixtureTechnicianRepository;
        assert!(repo.list_active().await.expect("list succeeds").is_empty());

        let name = TechnicianName::new("Ana").expect("valid name");
        assert!(repo
            .find_active_by_name(&name)
            .await
            .expect("lookup succeeds")
            .is_none());
    }

    #[tokio::test]
    async fn fixture_repository_accepts_inserts() {
        let repo = FixtureTechnicianRepository;
        let technician = Technician::new(
            TechnicianId::random(),
            TechnicianName::new("Ana").expect("valid name"),
            ColorTag::new("#3AB0FF").expect("valid tag"),
        );

        repo.insert(&technician).await.expect("insert succeeds");
    }

    #[rstest]
    fn duplicate_name_error_carries_the_name() {
        let err = TechnicianRepositoryError::duplicate_name("Ana");
        assert!(err.to_string().contains("Ana"));
    }
}
