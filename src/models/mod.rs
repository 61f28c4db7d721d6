//! Seating domain types.
//!
//! All types are plain values. They are built once by the caller (usually
//! from tabular input), borrowed immutably by the engine, and never mutated
//! during solving.
//!
//! - [`Guest`]: a person to seat, with pass-through metadata
//! - [`Table`]: a seating location with a fixed capacity
//! - [`Relationship`]: a weighted, unordered guest pair with a [`RelationshipKind`]
//! - [`Assignment`]: the final guest → table mapping

mod assignment;
mod guest;
mod relationship;
mod table;

pub use assignment::Assignment;
pub use guest::{Guest, GuestId};
pub use relationship::{ParseKindError, Relationship, RelationshipKind};
pub use table::{Table, TableId};
