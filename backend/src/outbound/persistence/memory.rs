//! Deterministic in-memory persistence adapters.
//!
//! Real persistence technology belongs to external collaborators; these
//! adapters satisfy the driven ports with plain maps behind
//! `tokio::sync::RwLock`. The integration suite runs on them, and embedders
//! without a database can too. Writes overwrite whole documents, matching
//! the engine's last-write-wins contract.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    CalendarRepository, CalendarRepositoryError, TechnicianRepository, TechnicianRepositoryError,
};
use crate::domain::{CalendarDocument, MonthKey, Technician, TechnicianName};

/// In-memory calendar document store, one row per month key.
#[derive(Debug, Default)]
pub struct InMemoryCalendarRepository {
    rows: RwLock<BTreeMap<MonthKey, CalendarDocument>>,
}

impl InMemoryCalendarRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether no document was ever saved.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl CalendarRepository for InMemoryCalendarRepository {
    async fn find_by_key(
        &self,
        key: &MonthKey,
    ) -> Result<Option<CalendarDocument>, CalendarRepositoryError> {
        Ok(self.rows.read().await.get(key).cloned())
    }

    async fn upsert(&self, document: &CalendarDocument) -> Result<(), CalendarRepositoryError> {
        self.rows
            .write()
            .await
            .insert(document.month_key(), document.clone());
        Ok(())
    }
}

/// In-memory technician roster store.
///
/// Enforces the case-insensitive unique-active-name constraint the way a
/// database unique index would, so the duplicate-race path of the roster
/// service stays exercised.
#[derive(Debug, Default)]
pub struct InMemoryTechnicianRepository {
    rows: RwLock<Vec<Technician>>,
}

impl InMemoryTechnicianRepository {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a roster pre-seeded with technicians.
    ///
    /// Seeding bypasses the uniqueness check; tests own their fixtures.
    pub fn with_technicians(technicians: Vec<Technician>) -> Self {
        Self {
            rows: RwLock::new(technicians),
        }
    }
}

#[async_trait]
impl TechnicianRepository for InMemoryTechnicianRepository {
    async fn list_active(&self) -> Result<Vec<Technician>, TechnicianRepositoryError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|t| t.is_active())
            .cloned()
            .collect())
    }

    async fn find_active_by_name(
        &self,
        name: &TechnicianName,
    ) -> Result<Option<Technician>, TechnicianRepositoryError> {
        let key = name.fold_key();
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|t| t.is_active() && t.name().fold_key() == key)
            .cloned())
    }

    async fn insert(&self, technician: &Technician) -> Result<(), TechnicianRepositoryError> {
        let mut rows = self.rows.write().await;
        let key = technician.name().fold_key();
        if rows
            .iter()
            .any(|t| t.is_active() && t.name().fold_key() == key)
        {
            return Err(TechnicianRepositoryError::duplicate_name(
                technician.name().as_ref(),
            ));
        }
        rows.push(technician.clone());
        Ok(())
    }
}
