//! Per-week technician display order.
//!
//! Each week of the month orders its four technician rows independently: a
//! swap in week 2 must never reach week 1 or week 3. Weeks without an
//! explicit order fall back to the roster default (active technicians by
//! name, padded with placeholders to exactly four slots). The first swap on
//! a week materialises that default before exchanging positions, so later
//! roster changes cannot retroactively reshuffle an already-arranged week.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ColorTag, Technician, TechnicianId};

/// Fixed number of technician row positions per week.
pub const SLOTS_PER_WEEK: usize = 4;

/// Validation errors returned by [`WeekOrderTable::swap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekOrderError {
    PositionOutOfRange { position: usize },
}

impl std::fmt::Display for WeekOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PositionOutOfRange { position } => write!(
                f,
                "slot position must be below {SLOTS_PER_WEEK}, got {position}"
            ),
        }
    }
}

impl std::error::Error for WeekOrderError {}

/// What occupies one of a week's four slots.
///
/// Placeholders fill the roster out to four slots when fewer technicians
/// exist; they carry only their 1-based slot position, never an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotOccupant {
    /// A real technician, referenced by id only.
    Technician(TechnicianId),
    /// Synthetic filler for an unstaffed slot (1-based position).
    Placeholder(u8),
}

/// Display label for an unstaffed slot.
pub(crate) fn placeholder_label(position: u8) -> String {
    format!("Technician {position}")
}

/// A slot occupant resolved against the roster for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEntry {
    /// The underlying occupant.
    pub occupant: SlotOccupant,
    /// Name rendered on the row.
    pub display_name: String,
    /// Colour tag when the occupant is a roster technician.
    pub color_tag: Option<ColorTag>,
}

/// Mapping from week index to that week's explicit slot order.
///
/// ## Invariants
/// - every stored order holds exactly [`SLOTS_PER_WEEK`] occupants with no
///   technician id appearing twice;
/// - swapping positions in one week leaves every other week untouched.
///
/// # Examples
///
/// ```
/// use backend::domain::WeekOrderTable;
///
/// let table = WeekOrderTable::default();
/// let order = table.order_for(0, &[]);
/// assert_eq!(order.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WeekOrderTable {
    orders: BTreeMap<usize, Vec<SlotOccupant>>,
}

impl WeekOrderTable {
    /// The default slot order for the given roster: active technicians by
    /// name, truncated to four, padded with placeholders.
    pub fn default_order(roster: &[Technician]) -> Vec<SlotOccupant> {
        let mut active: Vec<&Technician> = roster.iter().filter(|t| t.is_active()).collect();
        active.sort_by_key(|t| (t.name().fold_key(), t.id().clone()));

        (0..SLOTS_PER_WEEK)
            .map(|position| match active.get(position) {
                Some(technician) => SlotOccupant::Technician(technician.id().clone()),
                None => SlotOccupant::Placeholder((position + 1) as u8),
            })
            .collect()
    }

    /// The effective slot order for a week: the explicit order when present,
    /// else the roster default.
    pub fn order_for(&self, week_index: usize, roster: &[Technician]) -> Vec<SlotOccupant> {
        self.orders
            .get(&week_index)
            .cloned()
            .unwrap_or_else(|| Self::default_order(roster))
    }

    /// The effective order resolved to display entries.
    ///
    /// A technician id no longer on the roster renders as the placeholder
    /// label for its position, mirroring what an unstaffed slot shows.
    pub fn resolve_entries(&self, week_index: usize, roster: &[Technician]) -> Vec<SlotEntry> {
        self.order_for(week_index, roster)
            .into_iter()
            .enumerate()
            .map(|(position, occupant)| {
                let fallback = placeholder_label((position + 1) as u8);
                match &occupant {
                    SlotOccupant::Technician(id) => {
                        match roster.iter().find(|t| t.id() == id) {
                            Some(technician) => SlotEntry {
                                display_name: technician.name().to_string(),
                                color_tag: Some(technician.color_tag().clone()),
                                occupant,
                            },
                            None => SlotEntry {
                                display_name: fallback,
                                color_tag: None,
                                occupant,
                            },
                        }
                    }
                    SlotOccupant::Placeholder(position) => SlotEntry {
                        display_name: placeholder_label(*position),
                        color_tag: None,
                        occupant,
                    },
                }
            })
            .collect()
    }

    /// Exchange two slot positions within one week.
    ///
    /// Materialises the default order on first touch, then swaps. The order
    /// stays a permutation of the same occupants; no other week changes.
    pub fn swap(
        &mut self,
        week_index: usize,
        position_a: usize,
        position_b: usize,
        roster: &[Technician],
    ) -> Result<(), WeekOrderError> {
        for position in [position_a, position_b] {
            if position >= SLOTS_PER_WEEK {
                return Err(WeekOrderError::PositionOutOfRange { position });
            }
        }

        let order = self
            .orders
            .entry(week_index)
            .or_insert_with(|| Self::default_order(roster));
        order.swap(position_a, position_b);
        Ok(())
    }

    /// Week indexes with an explicit (materialised) order.
    pub fn explicit_weeks(&self) -> impl Iterator<Item = usize> + '_ {
        self.orders.keys().copied()
    }

    /// Whether any week has a materialised order.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Whether a stored order satisfies the table invariants.
    pub(crate) fn is_valid_order(order: &[SlotOccupant]) -> bool {
        if order.len() != SLOTS_PER_WEEK {
            return false;
        }
        let mut ids: Vec<&TechnicianId> = order
            .iter()
            .filter_map(|occupant| match occupant {
                SlotOccupant::Technician(id) => Some(id),
                SlotOccupant::Placeholder(_) => None,
            })
            .collect();
        ids.sort();
        ids.windows(2).all(|pair| pair[0] != pair[1])
    }

    pub(crate) fn all_orders_valid(&self) -> bool {
        self.orders.values().all(|order| Self::is_valid_order(order))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ColorTag, TechnicianName};
    use rstest::rstest;

    fn technician(name: &str) -> Technician {
        Technician::new(
            TechnicianId::random(),
            TechnicianName::new(name).expect("valid name"),
            ColorTag::new("#3AB0FF").expect("valid tag"),
        )
    }

    fn sample_roster() -> Vec<Technician> {
        vec![
            technician("Marta"),
            technician("Ana"),
            technician("Luis"),
            technician("Pedro"),
        ]
    }

    #[rstest]
    fn default_order_sorts_by_name_case_insensitively() {
        let roster = sample_roster();
        let order = WeekOrderTable::default_order(&roster);

        let names: Vec<String> = WeekOrderTable::default()
            .resolve_entries(0, &roster)
            .into_iter()
            .map(|entry| entry.display_name)
            .collect();
        assert_eq!(names, ["Ana", "Luis", "Marta", "Pedro"]);
        assert!(WeekOrderTable::is_valid_order(&order));
    }

    #[rstest]
    #[case::empty(0, 4)]
    #[case::partial(2, 2)]
    #[case::full(4, 0)]
    fn short_rosters_pad_with_placeholders(
        #[case] technicians: usize,
        #[case] placeholders: usize,
    ) {
        let roster: Vec<Technician> = sample_roster().into_iter().take(technicians).collect();
        let order = WeekOrderTable::default_order(&roster);

        assert_eq!(order.len(), SLOTS_PER_WEEK);
        let filler = order
            .iter()
            .filter(|o| matches!(o, SlotOccupant::Placeholder(_)))
            .count();
        assert_eq!(filler, placeholders);
    }

    #[rstest]
    fn placeholders_carry_their_slot_position() {
        let roster: Vec<Technician> = sample_roster().into_iter().take(2).collect();
        let order = WeekOrderTable::default_order(&roster);

        assert_eq!(order[2], SlotOccupant::Placeholder(3));
        assert_eq!(order[3], SlotOccupant::Placeholder(4));

        let entries = WeekOrderTable::default().resolve_entries(0, &roster);
        assert_eq!(entries[2].display_name, "Technician 3");
        assert_eq!(entries[3].display_name, "Technician 4");
    }

    #[rstest]
    fn inactive_technicians_never_enter_the_default_order() {
        let mut roster = sample_roster();
        roster[0] = roster[0].clone().with_active(false);

        let order = WeekOrderTable::default_order(&roster);
        let inactive_id = roster[0].id();
        assert!(!order
            .iter()
            .any(|o| matches!(o, SlotOccupant::Technician(id) if id == inactive_id)));
    }

    #[rstest]
    fn swap_exchanges_exactly_two_positions() {
        let roster = sample_roster();
        let mut table = WeekOrderTable::default();
        let before = table.order_for(1, &roster);

        table.swap(1, 0, 3, &roster).expect("swap succeeds");
        let after = table.order_for(1, &roster);

        assert_eq!(after[0], before[3]);
        assert_eq!(after[3], before[0]);
        assert_eq!(after[1], before[1]);
        assert_eq!(after[2], before[2]);
        assert!(WeekOrderTable::is_valid_order(&after));
    }

    #[rstest]
    fn swapping_twice_restores_the_original_order() {
        let roster = sample_roster();
        let mut table = WeekOrderTable::default();
        let before = table.order_for(2, &roster);

        table.swap(2, 1, 3, &roster).expect("first swap");
        table.swap(2, 1, 3, &roster).expect("second swap");

        assert_eq!(table.order_for(2, &roster), before);
    }

    #[rstest]
    fn swap_is_local_to_its_week() {
        let roster = sample_roster();
        let mut table = WeekOrderTable::default();
        let week_one_before = table.order_for(1, &roster);
        let week_three_before = table.order_for(3, &roster);

        table.swap(2, 0, 1, &roster).expect("swap succeeds");

        assert_eq!(table.order_for(1, &roster), week_one_before);
        assert_eq!(table.order_for(3, &roster), week_three_before);
        assert_eq!(table.explicit_weeks().collect::<Vec<_>>(), vec![2]);
    }

    #[rstest]
    #[case::first(4, 0)]
    #[case::second(0, 9)]
    fn swap_rejects_out_of_range_positions(#[case] a: usize, #[case] b: usize) {
        let roster = sample_roster();
        let mut table = WeekOrderTable::default();

        let err = table.swap(0, a, b, &roster).expect_err("must fail");
        assert!(matches!(err, WeekOrderError::PositionOutOfRange { .. }));
        assert!(table.is_empty());
    }

    #[rstest]
    fn serde_round_trip_preserves_materialised_orders() {
        let roster = sample_roster();
        let mut table = WeekOrderTable::default();
        table.swap(1, 0, 2, &roster).expect("swap succeeds");

        let encoded = serde_json::to_string(&table).expect("serialise");
        let decoded: WeekOrderTable = serde_json::from_str(&encoded).expect("deserialise");
        assert_eq!(decoded, table);
    }
}
