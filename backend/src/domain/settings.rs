//! Engine settings.
//!
//! The calendar engine is a library; it carries no CLI or environment
//! layering. Embedders deserialise [`CalendarSettings`] from whatever
//! configuration source they own and pass it to the services at
//! construction. The slot count and export cap are contractual constants,
//! not settings — see [`crate::domain::calendar::SLOTS_PER_WEEK`] and
//! [`crate::domain::export::EXPORT_WEEK_CAP`].

use serde::{Deserialize, Serialize};

/// Language table used for the weekday names embedded in each grid day.
///
/// The names are fixed tables, so rendered output never depends on ambient
/// locale state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekdayLocale {
    /// Spanish weekday names (Domingo..Sábado). Default.
    #[default]
    Spanish,
    /// English weekday names (Sunday..Saturday).
    English,
}

const SPANISH_WEEKDAYS: [&str; 7] = [
    "Domingo",
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
];

const ENGLISH_WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

impl WeekdayLocale {
    /// Weekday names for this locale, Sunday first.
    ///
    /// # Examples
    ///
    /// ```
    /// use backend::domain::WeekdayLocale;
    ///
    /// assert_eq!(WeekdayLocale::Spanish.weekday_names()[4], "Jueves");
    /// assert_eq!(WeekdayLocale::English.weekday_names()[4], "Thursday");
    /// ```
    pub fn weekday_names(&self) -> [&'static str; 7] {
        match self {
            Self::Spanish => SPANISH_WEEKDAYS,
            Self::English => ENGLISH_WEEKDAYS,
        }
    }

    /// Name for the weekday at `column` (0 = Sunday .. 6 = Saturday).
    ///
    /// Columns past Saturday wrap, which keeps grid construction total.
    pub fn weekday_name(&self, column: usize) -> &'static str {
        self.weekday_names()[column % 7]
    }
}

/// Settings shared by the scheduling services and the exporter.
///
/// # Examples
///
/// ```
/// use backend::domain::{CalendarSettings, WeekdayLocale};
///
/// let settings = CalendarSettings::default();
/// assert_eq!(settings.weekday_locale, WeekdayLocale::Spanish);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CalendarSettings {
    /// Locale for the weekday names written into each grid day.
    #[serde(default)]
    pub weekday_locale: WeekdayLocale,
}
