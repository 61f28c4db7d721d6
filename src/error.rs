//! Error types.
//!
//! Input problems are fatal: the engine never returns a partial
//! assignment alongside an error.

use thiserror::Error;

use crate::models::{GuestId, TableId};

/// Total table capacity cannot seat every guest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("insufficient capacity: {guests} guests but only {capacity} seats")]
pub struct CapacityError {
    /// Number of guests to seat.
    pub guests: usize,
    /// Sum of all table capacities.
    pub capacity: usize,
}

/// Malformed input or an inconsistent assignment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A relationship names a guest id missing from the guest list.
    #[error("relationship #{index} references unknown guest {guest}")]
    UnknownGuest { index: usize, guest: GuestId },

    /// Two guests share an id.
    #[error("duplicate guest id {0}")]
    DuplicateGuest(GuestId),

    /// Two tables share an id.
    #[error("duplicate table id {0}")]
    DuplicateTable(TableId),

    /// A table seats nobody.
    #[error("table {0} has zero capacity")]
    ZeroCapacity(TableId),

    /// A relationship pairs a guest with themselves.
    #[error("relationship #{index} pairs guest {guest} with itself")]
    SelfRelationship { index: usize, guest: GuestId },

    /// A strength is non-finite or outside `[0, 1]`.
    #[error("relationship #{index} strength {strength} is outside [0, 1]")]
    StrengthOutOfRange { index: usize, strength: f64 },

    /// A guest is missing from the assignment.
    #[error("guest {0} is not assigned to any table")]
    Unassigned(GuestId),

    /// The assignment seats a guest id missing from the guest list.
    #[error("assignment contains unknown guest {0}")]
    UnexpectedGuest(GuestId),

    /// The assignment uses a table id missing from the table list.
    #[error("guest {guest} is assigned to unknown table {table}")]
    UnknownTable { guest: GuestId, table: TableId },

    /// A table holds more guests than its capacity.
    #[error("table {table} seats {seated} guests but has capacity {capacity}")]
    OverCapacity {
        table: TableId,
        seated: usize,
        capacity: usize,
    },
}

/// Error returned by [`solve`](crate::engine::solve) and
/// [`SeatingProblem::new`](crate::engine::SeatingProblem::new).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeatingError {
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "toml")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_message() {
        let err = SeatingError::from(CapacityError {
            guests: 4,
            capacity: 3,
        });
        assert_eq!(
            err.to_string(),
            "insufficient capacity: 4 guests but only 3 seats"
        );
    }

    #[test]
    fn test_validation_error_message() {
        let err = SeatingError::from(ValidationError::UnknownGuest { index: 2, guest: 7 });
        assert_eq!(
            err.to_string(),
            "relationship #2 references unknown guest 7"
        );
        assert!(matches!(err, SeatingError::Validation(_)));
    }
}
