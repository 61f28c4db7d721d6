//! Wedding guest table assignment.
//!
//! Given guests, tables with fixed capacities, and weighted pairwise
//! relationships between guests, produces a seating that keeps friends
//! and family together and separates pairs marked `avoid`:
//!
//! - **models**: guest, table, relationship and assignment value types
//! - **validation**: capacity and referential-integrity checks
//! - **affinity**: signed pairwise affinity ledger
//! - **engine**: greedy construction, swap/relocate local search and
//!   iterated-local-search refinement
//! - **report**: score breakdown, per-table grades and plan rendering
//!
//! # Quick start
//!
//! ```
//! use u_seating::models::{Guest, Relationship, RelationshipKind, Table};
//!
//! let guests = vec![
//!     Guest::new(1, "Alice"),
//!     Guest::new(2, "Bob"),
//!     Guest::new(3, "Carol"),
//! ];
//! let tables = vec![Table::new(1, "Head", 2), Table::new(2, "Side", 2)];
//! let rels = vec![
//!     Relationship::new(1, 2, RelationshipKind::PlusOne, 1.0),
//!     Relationship::new(1, 3, RelationshipKind::Avoid, 0.8),
//! ];
//!
//! let result = u_seating::solve(&guests, &tables, &rels).unwrap();
//! assert_eq!(result.assignment.len(), 3);
//! assert_eq!(result.report.violated_count, 0);
//! ```
//!
//! # Logging
//!
//! The engine emits `tracing` events (`solve_start`, `phase_start`,
//! `phase_end`, `solve_end` at info, per-pass progress at debug). No
//! subscriber is installed.

pub mod affinity;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod validation;

pub use engine::solve;
pub use error::SeatingError;
