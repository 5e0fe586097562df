//! Operator identity and the mutate-capability gate.
//!
//! Authentication lives in an external collaborator; the engine only
//! receives the already-authenticated actor. Every mutating operation calls
//! [`PermissionGate::ensure_can_mutate`] before touching any state, so a
//! refusal is guaranteed to have zero observable side effects. Read paths
//! never consult the gate.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Error, ErrorCode};

/// Stable operator identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(Uuid);

impl OperatorId {
    /// Wrap an existing UUID.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`OperatorId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Capability level granted to an operator by the authentication
/// collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May mutate calendars and the roster.
    Admin,
    /// May only read; every mutation fails with `InsufficientPrivilege`.
    ReadOnly,
}

/// The authenticated actor on whose behalf an operation runs.
///
/// # Examples
///
/// ```
/// use backend::domain::{Operator, PermissionGate, Role};
///
/// let admin = Operator::new("Eva", Role::Admin);
/// let viewer = Operator::new("Sam", Role::ReadOnly);
///
/// assert!(PermissionGate::can_mutate(&admin));
/// assert!(!PermissionGate::can_mutate(&viewer));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    id: OperatorId,
    name: String,
    role: Role,
}

impl Operator {
    /// Build an operator with a fresh random id.
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self::with_id(OperatorId::random(), name, role)
    }

    /// Build an operator with a known id.
    pub fn with_id(id: OperatorId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }

    /// Stable operator identifier.
    pub fn id(&self) -> OperatorId {
        self.id
    }

    /// Display name used in logs.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Granted capability level.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Single enforcement point for the mutate capability.
///
/// The gate is stateless; it evaluates the actor's role once per operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionGate;

impl PermissionGate {
    /// Whether the actor holds the mutate capability.
    pub fn can_mutate(actor: &Operator) -> bool {
        matches!(actor.role(), Role::Admin)
    }

    /// Check the gate, converting a refusal into a read-only error.
    ///
    /// Callers invoke this before loading or mutating anything, so a denial
    /// provably leaves no partial state behind.
    ///
    /// # Examples
    ///
    /// ```
    /// use backend::domain::{ErrorCode, Operator, PermissionGate, Role};
    ///
    /// let viewer = Operator::new("Sam", Role::ReadOnly);
    /// let err = PermissionGate::ensure_can_mutate(&viewer).unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::InsufficientPrivilege);
    /// ```
    pub fn ensure_can_mutate(actor: &Operator) -> Result<(), Error> {
        if Self::can_mutate(actor) {
            Ok(())
        } else {
            Err(Error::new(
                ErrorCode::InsufficientPrivilege,
                "calendar is read-only for this operator",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::admin(Role::Admin, true)]
    #[case::read_only(Role::ReadOnly, false)]
    fn gate_follows_role(#[case] role: Role, #[case] allowed: bool) {
        let actor = Operator::new("Eva", role);
        assert_eq!(PermissionGate::can_mutate(&actor), allowed);
        assert_eq!(PermissionGate::ensure_can_mutate(&actor).is_ok(), allowed);
    }

    #[rstest]
    fn refusal_reports_read_only_signal() {
        let viewer = Operator::new("Sam", Role::ReadOnly);
        let err = PermissionGate::ensure_can_mutate(&viewer).expect_err("must be denied");
        assert_eq!(err.code(), ErrorCode::InsufficientPrivilege);
        assert!(err.message().contains("read-only"));
    }

    #[rstest]
    fn role_serde_uses_snake_case() {
        let encoded = serde_json::to_string(&Role::ReadOnly).expect("serialise");
        assert_eq!(encoded, "\"read_only\"");
    }
}
