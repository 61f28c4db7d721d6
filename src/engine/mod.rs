//! Guest-to-table assignment engine.
//!
//! Seats every guest at exactly one table without exceeding capacity,
//! maximizing the summed pairwise affinity of guests sharing a table.
//! A greedy construction phase produces a complete seating, which is then
//! hill-climbed with swap and relocate moves and optionally refined by
//! iterated local search.
//!
//! # Examples
//!
//! ```
//! use u_seating::engine::solve;
//! use u_seating::models::{Guest, Relationship, RelationshipKind, Table};
//!
//! let guests = vec![Guest::new(1, "Alice"), Guest::new(2, "Bob")];
//! let tables = vec![Table::new(1, "Left", 1), Table::new(2, "Right", 1)];
//! let rels = vec![Relationship::new(1, 2, RelationshipKind::Avoid, 1.0)];
//!
//! let result = solve(&guests, &tables, &rels).unwrap();
//! assert_ne!(result.assignment.table_of(1), result.assignment.table_of(2));
//! ```
//!
//! # References
//!
//! - Lewis, R. & Carroll, F. (2016). "Creating seating plans: a practical
//!   application", *Journal of the Operational Research Society* 67(11),
//!   1353-1362.
//! - Lourenço, H. R., Martin, O. C. & Stützle, T. (2003). "Iterated Local
//!   Search", *Handbook of Metaheuristics*, 320-353.

mod config;
mod construction;
mod local_search;
pub(crate) mod objective;
mod perturbation;
mod problem;
mod runner;
mod state;

pub use config::SeatingConfig;
pub use problem::SeatingProblem;
pub use runner::{SeatingResult, SeatingRunner};

use crate::error::SeatingError;
use crate::models::{Guest, Relationship, Table};

/// Seats `guests` at `tables` with the default configuration.
///
/// # Errors
///
/// - [`SeatingError::Capacity`] if the tables seat fewer people than there
///   are guests
/// - [`SeatingError::Validation`] if a relationship names an unknown guest
///   or the input is otherwise malformed
pub fn solve(
    guests: &[Guest],
    tables: &[Table],
    relationships: &[Relationship],
) -> Result<SeatingResult, SeatingError> {
    solve_with(guests, tables, relationships, &SeatingConfig::default())
}

/// Like [`solve`], with an explicit configuration.
///
/// # Panics
///
/// Panics if `config` fails [`SeatingConfig::validate`].
pub fn solve_with(
    guests: &[Guest],
    tables: &[Table],
    relationships: &[Relationship],
    config: &SeatingConfig,
) -> Result<SeatingResult, SeatingError> {
    let problem = SeatingProblem::new(guests, tables, relationships)?;
    Ok(SeatingRunner::run(&problem, config))
}
