//! Driven port for calendar document persistence.
//!
//! The engine only requires a keyed read/write store: one document per
//! (month, year). Adapters decide the technology; upserts overwrite the
//! whole document, so concurrent writers follow last-write-wins with no
//! field-level merge.

use async_trait::async_trait;

use crate::domain::{CalendarDocument, MonthKey};

/// Errors raised by calendar repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarRepositoryError {
    /// Repository connection could not be established.
    #[error("calendar repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("calendar repository query failed: {message}")]
    Query { message: String },
}

impl CalendarRepositoryError {
    /// Build a [`CalendarRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`CalendarRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for calendar document storage and retrieval.
///
/// ## Semantics
///
/// - `find_by_key` returns `None` when no document was ever saved for the
///   key; the caller synthesises a fresh draft in that case.
/// - `upsert` inserts on first save and overwrites afterwards. The caller
///   stamps `updated_at` before calling; the repository stores the document
///   verbatim.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarRepository: Send + Sync {
    /// Fetch the document for a month, if one was ever saved.
    async fn find_by_key(
        &self,
        key: &MonthKey,
    ) -> Result<Option<CalendarDocument>, CalendarRepositoryError>;

    /// Insert or overwrite the document under its month key.
    async fn upsert(&self, document: &CalendarDocument) -> Result<(), CalendarRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Lookups always miss and saves are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCalendarRepository;

#[async_trait]
impl CalendarRepository for FixtureCalendarRepository {
    async fn find_by_key(
        &self,
        _key: &MonthKey,
    ) -> Result<Option<CalendarDocument>, CalendarRepositoryError> {
        Ok(None)
    }

    async fn upsert(&self, _document: &CalendarDocument) -> Result<(), CalendarRepositoryError> {
        Ok(())
    }
}
