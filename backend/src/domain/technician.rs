//! Technician data model.
//!
//! Technicians are the people scheduled onto the calendar. Calendar state
//! references them by [`TechnicianId`] only — never by embedded value — so a
//! rename or colour change never invalidates stored documents. Technicians
//! are never hard-deleted; retirement is an `active` flag toggle owned by an
//! external administrative surface.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the technician constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TechnicianValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
    InvalidColorTag,
}

impl fmt::Display for TechnicianValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "technician id must not be empty"),
            Self::InvalidId => write!(f, "technician id must be a valid UUID"),
            Self::EmptyName => write!(f, "technician name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "technician name must be at most {max} characters")
            }
            Self::InvalidColorTag => {
                write!(f, "colour tag must be a #RRGGBB hex value")
            }
        }
    }
}

impl std::error::Error for TechnicianValidationError {}

/// Stable technician identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TechnicianId(Uuid);

impl TechnicianId {
    /// Validate and construct a [`TechnicianId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, TechnicianValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(TechnicianValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| TechnicianValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`TechnicianId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TechnicianId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<TechnicianId> for String {
    fn from(value: TechnicianId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for TechnicianId {
    type Error = TechnicianValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum allowed length for a technician name.
pub const TECHNICIAN_NAME_MAX: usize = 64;

/// Human readable technician name.
///
/// ## Invariants
/// - trimmed of surrounding whitespace, non-empty, at most
///   [`TECHNICIAN_NAME_MAX`] characters.
///
/// Duplicate detection across the roster compares names case-insensitively
/// through [`TechnicianName::fold_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TechnicianName(String);

impl TechnicianName {
    /// Validate and construct a [`TechnicianName`] from owned input.
    ///
    /// # Examples
    ///
    /// ```
    /// use backend::domain::TechnicianName;
    ///
    /// let name = TechnicianName::new("  Ana  ").unwrap();
    /// assert_eq!(name.as_ref(), "Ana");
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, TechnicianValidationError> {
        let trimmed = name.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(TechnicianValidationError::EmptyName);
        }
        if trimmed.chars().count() > TECHNICIAN_NAME_MAX {
            return Err(TechnicianValidationError::NameTooLong {
                max: TECHNICIAN_NAME_MAX,
            });
        }
        Ok(Self(trimmed))
    }

    /// Case-insensitive comparison key for duplicate detection.
    ///
    /// # Examples
    ///
    /// ```
    /// use backend::domain::TechnicianName;
    ///
    /// let a = TechnicianName::new("Ana").unwrap();
    /// let b = TechnicianName::new("ANA").unwrap();
    /// assert_eq!(a.fold_key(), b.fold_key());
    /// ```
    pub fn fold_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl AsRef<str> for TechnicianName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TechnicianName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TechnicianName> for String {
    fn from(value: TechnicianName) -> Self {
        value.0
    }
}

impl TryFrom<String> for TechnicianName {
    type Error = TechnicianValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Display colour assigned to a technician, as a `#RRGGBB` hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorTag(String);

impl ColorTag {
    /// Validate and construct a [`ColorTag`].
    ///
    /// # Examples
    ///
    /// ```
    /// use backend::domain::ColorTag;
    ///
    /// assert!(ColorTag::new("#3AB0FF").is_ok());
    /// assert!(ColorTag::new("blue").is_err());
    /// ```
    pub fn new(tag: impl Into<String>) -> Result<Self, TechnicianValidationError> {
        let tag = tag.into();
        let mut chars = tag.chars();
        let well_formed = chars.next() == Some('#')
            && tag.chars().count() == 7
            && chars.all(|c| c.is_ascii_hexdigit());
        if !well_formed {
            return Err(TechnicianValidationError::InvalidColorTag);
        }
        Ok(Self(tag.to_ascii_uppercase()))
    }
}

impl AsRef<str> for ColorTag {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ColorTag> for String {
    fn from(value: ColorTag) -> Self {
        value.0
    }
}

impl TryFrom<String> for ColorTag {
    type Error = TechnicianValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A technician on the roster.
///
/// ## Invariants
/// - `id` is a valid UUID; `name` and `color_tag` satisfy their newtype
///   invariants.
/// - Identity is carried by `id` alone; calendar documents never embed the
///   name or colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "TechnicianDto", into = "TechnicianDto")]
pub struct Technician {
    id: TechnicianId,
    name: TechnicianName,
    color_tag: ColorTag,
    active: bool,
}

impl Technician {
    /// Build a new active [`Technician`] from validated components.
    pub fn new(id: TechnicianId, name: TechnicianName, color_tag: ColorTag) -> Self {
        Self {
            id,
            name,
            color_tag,
            active: true,
        }
    }

    /// Fallible constructor from string inputs.
    ///
    /// # Examples
    ///
    /// ```
    /// use backend::domain::Technician;
    ///
    /// let tech = Technician::try_from_strings(
    ///     "3fa85f64-5717-4562-b3fc-2c963f66afa6",
    ///     "Ana",
    ///     "#3AB0FF",
    /// )
    /// .unwrap();
    /// assert!(tech.is_active());
    /// ```
    pub fn try_from_strings(
        id: impl AsRef<str>,
        name: impl Into<String>,
        color_tag: impl Into<String>,
    ) -> Result<Self, TechnicianValidationError> {
        Ok(Self::new(
            TechnicianId::new(id)?,
            TechnicianName::new(name)?,
            ColorTag::new(color_tag)?,
        ))
    }

    /// Stable technician identifier.
    pub fn id(&self) -> &TechnicianId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &TechnicianName {
        &self.name
    }

    /// Display colour tag.
    pub fn color_tag(&self) -> &ColorTag {
        &self.color_tag
    }

    /// Whether the technician is eligible for scheduling.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Copy of this technician with the given active flag.
    ///
    /// Retirement is owned by an external administrative surface; the engine
    /// only needs the flag when filtering the roster.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TechnicianDto {
    id: String,
    name: String,
    color_tag: String,
    active: bool,
}

impl From<Technician> for TechnicianDto {
    fn from(value: Technician) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.into(),
            color_tag: value.color_tag.into(),
            active: value.active,
        }
    }
}

impl TryFrom<TechnicianDto> for Technician {
    type Error = TechnicianValidationError;

    fn try_from(value: TechnicianDto) -> Result<Self, Self::Error> {
        let technician = Technician::try_from_strings(value.id, value.name, value.color_tag)?;
        Ok(technician.with_active(value.active))
    }
}
