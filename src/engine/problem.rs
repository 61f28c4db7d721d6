//! Validated seating problem.

use std::collections::HashMap;

use crate::error::{SeatingError, ValidationError};
use crate::models::{Assignment, Guest, GuestId, Relationship, Table, TableId};
use crate::validation;

/// A validated, immutable seating instance.
///
/// Guests and tables are stored sorted by id; the dense index of a guest
/// or table used throughout the engine is its position in that order, so
/// results do not depend on input ordering.
///
/// # Examples
///
/// ```
/// use u_seating::engine::SeatingProblem;
/// use u_seating::models::{Guest, Table};
///
/// let guests = vec![Guest::new(2, "Bob"), Guest::new(1, "Alice")];
/// let tables = vec![Table::new(1, "Head", 2)];
/// let problem = SeatingProblem::new(&guests, &tables, &[]).unwrap();
/// assert_eq!(problem.guests()[0].name, "Alice");
/// ```
#[derive(Debug, Clone)]
pub struct SeatingProblem {
    guests: Vec<Guest>,
    tables: Vec<Table>,
    relationships: Vec<Relationship>,
    guest_index: HashMap<GuestId, usize>,
    table_index: HashMap<TableId, usize>,
    targets: Vec<usize>,
}

impl SeatingProblem {
    /// Validates the inputs and builds the problem.
    ///
    /// # Errors
    ///
    /// See [`validation::validate_inputs`].
    pub fn new(
        guests: &[Guest],
        tables: &[Table],
        relationships: &[Relationship],
    ) -> Result<Self, SeatingError> {
        validation::validate_inputs(guests, tables, relationships)?;

        let mut guests = guests.to_vec();
        guests.sort_by_key(|g| g.id);
        let mut tables = tables.to_vec();
        tables.sort_by_key(|t| t.id);

        let guest_index = guests.iter().enumerate().map(|(i, g)| (g.id, i)).collect();
        let table_index = tables.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        let capacities: Vec<usize> = tables.iter().map(|t| t.capacity).collect();
        let targets = target_sizes(guests.len(), &capacities);

        Ok(Self {
            guests,
            tables,
            relationships: relationships.to_vec(),
            guest_index,
            table_index,
            targets,
        })
    }

    /// Guests, sorted by id.
    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    /// Tables, sorted by id.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Relationships, in input order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn guest_count(&self) -> usize {
        self.guests.len()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Sum of all table capacities.
    pub fn total_capacity(&self) -> usize {
        validation::total_capacity(&self.tables)
    }

    /// Dense index of a guest id.
    pub fn guest_index(&self, id: GuestId) -> Option<usize> {
        self.guest_index.get(&id).copied()
    }

    /// Dense index of a table id.
    pub fn table_index(&self, id: TableId) -> Option<usize> {
        self.table_index.get(&id).copied()
    }

    pub(crate) fn guest_index_map(&self) -> &HashMap<GuestId, usize> {
        &self.guest_index
    }

    /// Capacity of the table at dense index `t`.
    pub fn capacity(&self, t: usize) -> usize {
        self.tables[t].capacity
    }

    /// Near-equal target size per table (dense index order).
    ///
    /// Targets sum to the guest count and never exceed capacity.
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Verifies an assignment against this problem.
    pub fn check(&self, assignment: &Assignment) -> Result<(), ValidationError> {
        validation::check_assignment(&self.guests, &self.tables, assignment)
    }
}

/// Spreads `guests` over tables as evenly as capacities allow.
///
/// Every table first gets `guests / tables` (capped by capacity); the
/// remainder, plus whatever caps held back, goes one seat at a time to the
/// tables with the most headroom, lowest index first among equals.
fn target_sizes(guests: usize, capacities: &[usize]) -> Vec<usize> {
    if capacities.is_empty() || guests == 0 {
        return vec![0; capacities.len()];
    }

    let base = guests / capacities.len();
    let mut targets: Vec<usize> = capacities.iter().map(|&c| c.min(base)).collect();
    let mut need = guests - targets.iter().sum::<usize>();

    while need > 0 {
        let mut order: Vec<usize> = (0..capacities.len())
            .filter(|&t| targets[t] < capacities[t])
            .collect();
        if order.is_empty() {
            break;
        }
        order.sort_by_key(|&t| std::cmp::Reverse(capacities[t] - targets[t]));
        for t in order {
            if need == 0 {
                break;
            }
            targets[t] += 1;
            need -= 1;
        }
    }

    targets
}
