//! Guest-to-table assignment.

use std::collections::BTreeMap;

use super::guest::GuestId;
use super::table::TableId;

/// Mapping from guest id to table id.
///
/// Backed by a `BTreeMap`, so iteration is ordered by guest id and two
/// equal assignments always render identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    seats: BTreeMap<GuestId, TableId>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats `guest` at `table`, returning the previous table if any.
    pub fn assign(&mut self, guest: GuestId, table: TableId) -> Option<TableId> {
        self.seats.insert(guest, table)
    }

    /// Table the guest is seated at.
    pub fn table_of(&self, guest: GuestId) -> Option<TableId> {
        self.seats.get(&guest).copied()
    }

    /// Guests seated at `table`, ascending by id.
    pub fn guests_at(&self, table: TableId) -> Vec<GuestId> {
        self.seats
            .iter()
            .filter(|&(_, &t)| t == table)
            .map(|(&g, _)| g)
            .collect()
    }

    /// Number of guests seated at `table`.
    pub fn occupancy(&self, table: TableId) -> usize {
        self.seats.values().filter(|&&t| t == table).count()
    }

    /// `(guest, table)` rows ordered by guest id, ready for tabular export.
    pub fn rows(&self) -> impl Iterator<Item = (GuestId, TableId)> + '_ {
        self.seats.iter().map(|(&g, &t)| (g, t))
    }

    /// Number of seated guests.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Returns `true` if both guests sit at the same table.
    pub fn seated_together(&self, a: GuestId, b: GuestId) -> bool {
        match (self.table_of(a), self.table_of(b)) {
            (Some(ta), Some(tb)) => ta == tb,
            _ => false,
        }
    }
}

impl FromIterator<(GuestId, TableId)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (GuestId, TableId)>>(iter: I) -> Self {
        Self {
            seats: iter.into_iter().collect(),
        }
    }
}
