//! Input integrity checks.
//!
//! Run before any solving work. Capacity is checked first, then the
//! structure of each collection, then every relationship in input order,
//! so the reported error always points at the first offending record.

use std::collections::{HashMap, HashSet};

use crate::error::{CapacityError, SeatingError, ValidationError};
use crate::models::{Assignment, Guest, GuestId, Relationship, Table, TableId};

/// Sum of all table capacities.
pub fn total_capacity(tables: &[Table]) -> usize {
    tables.iter().map(|t| t.capacity).sum()
}

/// Checks that the tables can seat every guest.
pub fn validate_capacity(guests: &[Guest], tables: &[Table]) -> Result<(), CapacityError> {
    let capacity = total_capacity(tables);
    if capacity < guests.len() {
        return Err(CapacityError {
            guests: guests.len(),
            capacity,
        });
    }
    Ok(())
}

/// Validates guests, tables and relationships together.
///
/// # Errors
///
/// - [`SeatingError::Capacity`] when total capacity is below the guest count
/// - [`SeatingError::Validation`] for duplicate ids, zero-capacity tables,
///   or relationships that reference unknown guests, pair a guest with
///   itself, or carry a strength outside `[0, 1]`
pub fn validate_inputs(
    guests: &[Guest],
    tables: &[Table],
    relationships: &[Relationship],
) -> Result<(), SeatingError> {
    validate_capacity(guests, tables)?;

    let mut guest_ids = HashSet::with_capacity(guests.len());
    for guest in guests {
        if !guest_ids.insert(guest.id) {
            return Err(ValidationError::DuplicateGuest(guest.id).into());
        }
    }

    let mut table_ids = HashSet::with_capacity(tables.len());
    for table in tables {
        if !table_ids.insert(table.id) {
            return Err(ValidationError::DuplicateTable(table.id).into());
        }
        if table.capacity == 0 {
            return Err(ValidationError::ZeroCapacity(table.id).into());
        }
    }

    for (index, rel) in relationships.iter().enumerate() {
        validate_relationship(index, rel, &guest_ids)?;
    }

    Ok(())
}

fn validate_relationship(
    index: usize,
    rel: &Relationship,
    guest_ids: &HashSet<GuestId>,
) -> Result<(), ValidationError> {
    for guest in [rel.a, rel.b] {
        if !guest_ids.contains(&guest) {
            return Err(ValidationError::UnknownGuest { index, guest });
        }
    }
    if rel.a == rel.b {
        return Err(ValidationError::SelfRelationship {
            index,
            guest: rel.a,
        });
    }
    if !rel.strength.is_finite() || !(0.0..=1.0).contains(&rel.strength) {
        return Err(ValidationError::StrengthOutOfRange {
            index,
            strength: rel.strength,
        });
    }
    Ok(())
}

/// Verifies that `assignment` seats every guest exactly once at a known
/// table without exceeding any capacity.
pub fn check_assignment(
    guests: &[Guest],
    tables: &[Table],
    assignment: &Assignment,
) -> Result<(), ValidationError> {
    let capacities: HashMap<TableId, usize> = tables.iter().map(|t| (t.id, t.capacity)).collect();
    let guest_ids: HashSet<GuestId> = guests.iter().map(|g| g.id).collect();

    for guest in guests {
        if assignment.table_of(guest.id).is_none() {
            return Err(ValidationError::Unassigned(guest.id));
        }
    }

    let mut seated: HashMap<TableId, usize> = HashMap::new();
    for (guest, table) in assignment.rows() {
        if !guest_ids.contains(&guest) {
            return Err(ValidationError::UnexpectedGuest(guest));
        }
        if !capacities.contains_key(&table) {
            return Err(ValidationError::UnknownTable { guest, table });
        }
        *seated.entry(table).or_insert(0) += 1;
    }

    for table in tables {
        let count = seated.get(&table.id).copied().unwrap_or(0);
        if count > table.capacity {
            return Err(ValidationError::OverCapacity {
                table: table.id,
                seated: count,
                capacity: table.capacity,
            });
        }
    }

    Ok(())
}
