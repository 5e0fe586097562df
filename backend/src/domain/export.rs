//! Calendar export rendering.
//!
//! The export is a pure projection of a document plus the roster: no locale
//! or clock state leaks in. The artifact is capped at [`EXPORT_WEEK_CAP`]
//! week sections regardless of how many weeks the month spans — a
//! documented, intentional truncation carried over from the paper layout
//! the export reproduces. Dropped weeks are counted in
//! [`CalendarExport::truncated_weeks`] and logged, never silent.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::calendar::CalendarDocument;
use super::shift::{ALL_SHIFT_CODES, ShiftCode};
use super::technician::{ColorTag, Technician};
use crate::domain::CellRef;

/// Maximum number of week sections an export renders.
pub const EXPORT_WEEK_CAP: usize = 5;

/// One legend line mapping a shift code to its display text and colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub code: ShiftCode,
    pub label: String,
    pub color: String,
}

/// One rendered cell: the code plus its fixed display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportCell {
    pub code: ShiftCode,
    pub label: String,
}

/// One technician row within a week section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_tag: Option<ColorTag>,
    pub cells: Vec<ExportCell>,
}

/// One week section of the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportWeek {
    pub week_index: usize,
    pub day_headers: Vec<String>,
    pub rows: Vec<ExportRow>,
}

/// The export artifact handed to the download surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarExport {
    pub month: u32,
    pub year: i32,
    pub weeks: Vec<ExportWeek>,
    /// Number of week rows the cap dropped; zero for months of five weeks
    /// or fewer.
    pub truncated_weeks: usize,
    pub legend: Vec<LegendEntry>,
}

/// Renders [`CalendarDocument`] values into [`CalendarExport`] artifacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarExporter;

impl CalendarExporter {
    /// Render the first [`EXPORT_WEEK_CAP`] weeks of a document.
    ///
    /// Technician rows follow the document's per-week order; cells carry the
    /// fixed display labels; the legend covers the whole closed enumeration.
    ///
    /// # Examples
    ///
    /// ```
    /// use backend::domain::{
    ///     CalendarDocument, CalendarExporter, MonthKey, WeekdayLocale,
    /// };
    ///
    /// let key = MonthKey::new(2, 2024).unwrap();
    /// let doc = CalendarDocument::draft(key, WeekdayLocale::Spanish);
    /// let export = CalendarExporter::render(&doc, &[]);
    ///
    /// assert_eq!(export.weeks.len(), 5);
    /// assert_eq!(export.truncated_weeks, 0);
    /// ```
    pub fn render(document: &CalendarDocument, roster: &[Technician]) -> CalendarExport {
        let key = document.month_key();
        let total_weeks = document.weeks().len();
        let rendered_weeks = total_weeks.min(EXPORT_WEEK_CAP);
        let truncated_weeks = total_weeks - rendered_weeks;

        if truncated_weeks > 0 {
            warn!(
                month = key.month(),
                year = key.year(),
                dropped = truncated_weeks,
                "export truncated to {EXPORT_WEEK_CAP} weeks"
            );
        }

        let weeks = document
            .weeks()
            .iter()
            .take(EXPORT_WEEK_CAP)
            .enumerate()
            .map(|(week_index, week)| {
                let day_headers = week
                    .days()
                    .iter()
                    .map(|day| match day.day_number {
                        Some(number) => format!("{} {number}", day.weekday_name),
                        None => day.weekday_name.clone(),
                    })
                    .collect();

                let rows = document
                    .resolve_entries(week_index, roster)
                    .into_iter()
                    .enumerate()
                    .map(|(slot_index, entry)| ExportRow {
                        display_name: entry.display_name,
                        color_tag: entry.color_tag,
                        cells: (0..week.days().len())
                            .map(|day_index| {
                                let code = document
                                    .shift_at(CellRef::new(week_index, day_index, slot_index));
                                ExportCell {
                                    code,
                                    label: code.display_label().to_owned(),
                                }
                            })
                            .collect(),
                    })
                    .collect();

                ExportWeek {
                    week_index,
                    day_headers,
                    rows,
                }
            })
            .collect();

        CalendarExport {
            month: key.month(),
            year: key.year(),
            weeks,
            truncated_weeks,
            legend: Self::legend(),
        }
    }

    /// Legend covering every member of the closed enumeration.
    pub fn legend() -> Vec<LegendEntry> {
        ALL_SHIFT_CODES
            .iter()
            .map(|code| LegendEntry {
                code: *code,
                label: code.display_label().to_owned(),
                color: code.legend_color().to_owned(),
            })
            .collect()
    }
}

const NAME_COLUMN_WIDTH: usize = 20;
const CELL_COLUMN_WIDTH: usize = 12;

impl CalendarExport {
    /// Deterministic fixed-width text rendering of the artifact.
    ///
    /// Intended for plain-text downloads and test assertions; two renders of
    /// the same document are byte-identical.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Calendario {:04}-{:02}\n", self.year, self.month));

        for week in &self.weeks {
            out.push_str(&format!("\nSemana {}\n", week.week_index + 1));
            out.push_str(&format!("{:NAME_COLUMN_WIDTH$}", ""));
            for header in &week.day_headers {
                out.push_str(&format!("|{header:^CELL_COLUMN_WIDTH$}"));
            }
            out.push('\n');
            for row in &week.rows {
                out.push_str(&format!("{:NAME_COLUMN_WIDTH$}", row.display_name));
                for cell in &row.cells {
                    out.push_str(&format!("|{:^CELL_COLUMN_WIDTH$}", cell.label));
                }
                out.push('\n');
            }
        }

        if self.truncated_weeks > 0 {
            out.push_str(&format!(
                "\n({} semana(s) fuera del límite de {EXPORT_WEEK_CAP})\n",
                self.truncated_weeks
            ));
        }

        out.push_str("\nLeyenda:\n");
        for entry in &self.legend {
            if entry.code.is_assigned() {
                out.push_str(&format!(
                    "  {} = {} ({})\n",
                    entry.code, entry.label, entry.color
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{
        MonthKey, TechnicianId, TechnicianName, WeekdayLocale,
    };
    use rstest::rstest;

    fn technician(name: &str, color: &str) -> Technician {
        Technician::new(
            TechnicianId::random(),
            TechnicianName::new(name).expect("valid name"),
            ColorTag::new(color).expect("valid tag"),
        )
    }

    fn draft(month: u32, year: i32) -> CalendarDocument {
        let key = MonthKey::new(month, year).expect("valid key");
        CalendarDocument::draft(key, WeekdayLocale::Spanish)
    }

    #[rstest]
    fn six_week_month_renders_exactly_five_sections() {
        // March 2025 starts on a Saturday and spans six week rows.
        let doc = draft(3, 2025);
        assert_eq!(doc.weeks().len(), 6);

        let export = CalendarExporter::render(&doc, &[]);
        assert_eq!(export.weeks.len(), EXPORT_WEEK_CAP);
        assert_eq!(export.truncated_weeks, 1);
        let indexes: Vec<usize> = export.weeks.iter().map(|w| w.week_index).collect();
        assert_eq!(indexes, [0, 1, 2, 3, 4]);
    }

    #[rstest]
    fn five_week_month_is_not_truncated() {
        let export = CalendarExporter::render(&draft(2, 2024), &[]);
        assert_eq!(export.weeks.len(), 5);
        assert_eq!(export.truncated_weeks, 0);
    }

    #[rstest]
    fn rows_follow_the_week_order_table() {
        let roster = vec![
            technician("Marta", "#FFD966"),
            technician("Ana", "#9FC5E8"),
        ];
        let mut doc = draft(2, 2024);
        doc.swap_week_order(1, 0, 1, &roster).expect("swap succeeds");

        let export = CalendarExporter::render(&doc, &roster);

        // Default order is alphabetical; week 1 was swapped.
        let week0: Vec<&str> = export.weeks[0]
            .rows
            .iter()
            .map(|r| r.display_name.as_str())
            .collect();
        let week1: Vec<&str> = export.weeks[1]
            .rows
            .iter()
            .map(|r| r.display_name.as_str())
            .collect();
        assert_eq!(week0, ["Ana", "Marta", "Technician 3", "Technician 4"]);
        assert_eq!(week1, ["Marta", "Ana", "Technician 3", "Technician 4"]);
    }

    #[rstest]
    fn cells_carry_the_fixed_display_labels() {
        let roster = vec![technician("Ana", "#FFD966")];
        let mut doc = draft(2, 2024);
        doc.assign_shift(CellRef::new(0, 4, 0), ShiftCode::Morning)
            .expect("assignment succeeds");
        doc.assign_shift(CellRef::new(0, 5, 0), ShiftCode::RestDay)
            .expect("assignment succeeds");

        let export = CalendarExporter::render(&doc, &roster);
        let first_row = &export.weeks[0].rows[0];
        assert_eq!(first_row.cells[4].label, "5-12");
        assert_eq!(first_row.cells[5].label, "Descanso");
        assert_eq!(first_row.cells[0].label, "");
    }

    #[rstest]
    fn day_headers_combine_weekday_and_number() {
        let export = CalendarExporter::render(&draft(2, 2024), &[]);
        let headers = &export.weeks[0].day_headers;
        // Thursday 1st of February 2024; the leading columns pad.
        assert_eq!(headers[0], "Domingo");
        assert_eq!(headers[4], "Jueves 1");
    }

    #[rstest]
    fn legend_covers_every_assignable_code() {
        let legend = CalendarExporter::legend();
        assert_eq!(legend.len(), ALL_SHIFT_CODES.len());
        for code in ALL_SHIFT_CODES {
            assert!(legend.iter().any(|entry| entry.code == code));
        }
    }

    #[rstest]
    fn plain_text_render_is_deterministic() {
        let roster = vec![technician("Ana", "#FFD966")];
        let mut doc = draft(3, 2025);
        doc.assign_shift(CellRef::new(1, 2, 0), ShiftCode::Night)
            .expect("assignment succeeds");

        let export = CalendarExporter::render(&doc, &roster);
        let first = export.to_plain_text();
        let second = export.to_plain_text();

        assert_eq!(first, second);
        assert!(first.contains("Calendario 2025-03"));
        assert!(first.contains("Semana 5"));
        assert!(!first.contains("Semana 6"));
        assert!(first.contains("10-5"));
        assert!(first.contains("Leyenda:"));
    }

    #[rstest]
    fn export_serde_round_trip() {
        let export = CalendarExporter::render(&draft(2, 2024), &[]);
        let encoded = serde_json::to_string(&export).expect("serialise");
        let decoded: CalendarExport = serde_json::from_str(&encoded).expect("deserialise");
        assert_eq!(decoded, export);
    }
}
