//! Shift code enumeration and its fixed display mapping.
//!
//! The set of codes assignable to a technician/day cell is closed: unknown
//! codes are rejected at the parse boundary, never coerced. Each code carries
//! a fixed display label and legend colour so rendered output is identical
//! regardless of ambient locale state.

use serde::{Deserialize, Serialize};

/// Shift or absence category for one technician/day cell.
///
/// # Examples
///
/// ```
/// use backend::domain::ShiftCode;
///
/// let code: ShiftCode = "morning".parse().unwrap();
/// assert_eq!(code, ShiftCode::Morning);
/// assert_eq!(code.display_label(), "5-12");
/// assert!("urgent".parse::<ShiftCode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShiftCode {
    /// No shift assigned; the cell renders blank.
    #[default]
    None,
    /// Morning shift, 5:00–12:00.
    Morning,
    /// Afternoon shift, 15:00–22:00.
    Afternoon,
    /// Night shift, 22:00–5:00.
    Night,
    /// On-call support.
    Support,
    /// Rest day.
    RestDay,
    /// Vacation.
    Vacation,
}

/// Every member of the closed enumeration, in legend order.
pub const ALL_SHIFT_CODES: [ShiftCode; 7] = [
    ShiftCode::None,
    ShiftCode::Morning,
    ShiftCode::Afternoon,
    ShiftCode::Night,
    ShiftCode::Support,
    ShiftCode::RestDay,
    ShiftCode::Vacation,
];

impl ShiftCode {
    /// Returns the stable string representation used in storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use backend::domain::ShiftCode;
    ///
    /// assert_eq!(ShiftCode::RestDay.as_str(), "rest_day");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Night => "night",
            Self::Support => "support",
            Self::RestDay => "rest_day",
            Self::Vacation => "vacation",
        }
    }

    /// Fixed text shown in an exported cell.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Morning => "5-12",
            Self::Afternoon => "3-10",
            Self::Night => "10-5",
            Self::Support => "Apoyo",
            Self::RestDay => "Descanso",
            Self::Vacation => "Vacaciones",
        }
    }

    /// Fixed legend colour for the exported artifact.
    pub fn legend_color(&self) -> &'static str {
        match self {
            Self::None => "#FFFFFF",
            Self::Morning => "#FFD966",
            Self::Afternoon => "#9FC5E8",
            Self::Night => "#8E7CC3",
            Self::Support => "#93C47D",
            Self::RestDay => "#CCCCCC",
            Self::Vacation => "#F6B26B",
        }
    }

    /// Whether the cell carries an actual assignment.
    pub fn is_assigned(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a string outside the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseShiftCodeError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseShiftCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown shift code: {}", self.input)
    }
}

impl std::error::Error for ParseShiftCodeError {}

impl std::str::FromStr for ShiftCode {
    type Err = ParseShiftCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "night" => Ok(Self::Night),
            "support" => Ok(Self::Support),
            "rest_day" => Ok(Self::RestDay),
            "vacation" => Ok(Self::Vacation),
            _ => Err(ParseShiftCodeError {
                input: s.to_owned(),
            }),
        }
    }
}
