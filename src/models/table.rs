//! Table model.

use std::fmt;

/// Unique table identifier.
pub type TableId = u32;

/// A table with a fixed number of seats.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Unique identifier. Lower ids win placement ties.
    pub id: TableId,
    /// Display name.
    pub name: String,
    /// Maximum number of guests. Must be positive.
    pub capacity: usize,
    /// Where the table stands in the venue (display only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,
}

impl Table {
    /// Creates a table without a location.
    pub fn new(id: TableId, name: impl Into<String>, capacity: usize) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            location: None,
        }
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Table({}: {}, capacity={})",
            self.id, self.name, self.capacity
        )
    }
}
