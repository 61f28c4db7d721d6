//! Greedy construction phase.
//!
//! # Algorithm
//!
//! 1. Order guests by total positive affinity, descending (lower index
//!    first among equals)
//! 2. For each guest, consider every table with a free seat. A guest
//!    without relationships goes to the least-full table. Otherwise pick
//!    the table with the highest gain (affinity with guests already seated
//!    there plus the balance-term change); among equal gains prefer the
//!    most free seats, then the lowest table index
//! 3. Seat the guest and update the cached links
//!
//! Preferring free seats on ties sends the first member of a group to a
//! table with room for the rest of it.
//!
//! Seating one guest per step into any open table keeps
//! `free seats >= unplaced guests`, so validated input is always fully
//! seated.

use std::cmp::Ordering;
use std::time::Instant;

use tracing::{debug, info};

use super::objective::{Objective, EPSILON};
use super::problem::SeatingProblem;
use super::state::Seating;

/// Builds a complete initial seating.
pub(crate) fn construct(problem: &SeatingProblem, objective: &Objective) -> Seating {
    let start = Instant::now();
    let n_guests = problem.guest_count();
    let n_tables = problem.table_count();
    let affinity = objective.affinity();

    info!(
        event = "phase_start",
        phase = "Construction",
        guests = n_guests,
        tables = n_tables,
    );

    let mut seating = Seating::empty(n_guests, n_tables);

    for g in placement_order(objective) {
        let table = if affinity.has_relationships(g) {
            best_gain_table(problem, objective, &seating, g)
        } else {
            least_full_table(problem, &seating)
        }
        .expect("validated capacity always leaves a free seat");

        debug!(
            event = "place",
            guest = problem.guests()[g].id,
            table = problem.tables()[table].id,
            gain = seating.seat_delta(objective, g, table),
        );
        seating.seat(objective, g, table);
    }

    info!(
        event = "phase_end",
        phase = "Construction",
        duration_ms = start.elapsed().as_millis() as u64,
        steps = n_guests,
        score = seating.objective(objective),
    );

    seating
}

/// Guest indices sorted by positive affinity, strongest first.
fn placement_order(objective: &Objective) -> Vec<usize> {
    let affinity = objective.affinity();
    let totals: Vec<f64> = (0..affinity.len())
        .map(|g| affinity.positive_total(g))
        .collect();
    let mut order: Vec<usize> = (0..affinity.len()).collect();
    order.sort_by(|&a, &b| {
        totals[b]
            .partial_cmp(&totals[a])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    order
}

fn open_tables<'a>(
    problem: &'a SeatingProblem,
    seating: &'a Seating,
) -> impl Iterator<Item = usize> + 'a {
    (0..problem.table_count()).filter(move |&t| seating.occupancy(t) < problem.capacity(t))
}

fn best_gain_table(
    problem: &SeatingProblem,
    objective: &Objective,
    seating: &Seating,
    g: usize,
) -> Option<usize> {
    let free = |t: usize| problem.capacity(t) - seating.occupancy(t);
    let mut best: Option<(usize, f64)> = None;
    for t in open_tables(problem, seating) {
        let gain = seating.seat_delta(objective, g, t);
        match best {
            Some((_, best_gain)) if gain < best_gain - EPSILON => {}
            Some((bt, best_gain)) if gain <= best_gain + EPSILON && free(t) <= free(bt) => {}
            _ => best = Some((t, gain)),
        }
    }
    best.map(|(t, _)| t)
}

fn least_full_table(problem: &SeatingProblem, seating: &Seating) -> Option<usize> {
    open_tables(problem, seating).min_by_key(|&t| seating.occupancy(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SeatingConfig;
    use crate::models::{Guest, Relationship, RelationshipKind, Table};

    fn build(
        n_guests: u32,
        tables: Vec<Table>,
        rels: Vec<Relationship>,
        config: &SeatingConfig,
    ) -> (SeatingProblem, Objective) {
        let guests: Vec<Guest> = (1..=n_guests)
            .map(|id| Guest::new(id, format!("G{id}")))
            .collect();
        let problem = SeatingProblem::new(&guests, &tables, &rels).unwrap();
        let objective = Objective::new(&problem, config);
        (problem, objective)
    }

    #[test]
    fn test_family_seated_together() {
        let (problem, objective) = build(
            2,
            vec![Table::new(1, "Only", 2)],
            vec![Relationship::new(1, 2, RelationshipKind::Family, 1.0)],
            &SeatingConfig::default(),
        );
        let seating = construct(&problem, &objective);
        assert_eq!(seating.table_of(0), Some(0));
        assert_eq!(seating.table_of(1), Some(0));
    }

    #[test]
    fn test_avoid_pair_separated() {
        let (problem, objective) = build(
            2,
            vec![Table::new(1, "A", 2), Table::new(2, "B", 2)],
            vec![Relationship::new(1, 2, RelationshipKind::Avoid, 1.0)],
            &SeatingConfig::default(),
        );
        let seating = construct(&problem, &objective);
        assert_ne!(seating.table_of(0), seating.table_of(1));
    }

    #[test]
    fn test_ties_go_to_lowest_table_id() {
        let (problem, objective) = build(
            2,
            vec![Table::new(7, "Late", 2), Table::new(3, "Early", 2)],
            vec![Relationship::new(1, 2, RelationshipKind::Friend, 0.5)],
            &SeatingConfig::default(),
        );
        let seating = construct(&problem, &objective);
        // dense index 0 is the table with id 3
        assert_eq!(seating.table_of(0), Some(0));
        assert_eq!(seating.table_of(1), Some(0));
    }

    #[test]
    fn test_ties_prefer_free_seats() {
        // The first partner must not take a single-seat table.
        let (problem, objective) = build(
            2,
            vec![
                Table::new(1, "Solo 1", 1),
                Table::new(2, "Solo 2", 1),
                Table::new(3, "Big", 4),
            ],
            vec![Relationship::new(1, 2, RelationshipKind::Family, 1.0)],
            &SeatingConfig::default(),
        );
        let seating = construct(&problem, &objective);
        assert_eq!(seating.table_of(0), Some(2));
        assert_eq!(seating.table_of(1), Some(2));
    }

    #[test]
    fn test_higher_gain_beats_free_seats() {
        let (problem, objective) = build(
            3,
            vec![Table::new(1, "A", 3), Table::new(2, "B", 3)],
            vec![
                Relationship::new(1, 2, RelationshipKind::Family, 1.0),
                Relationship::new(2, 3, RelationshipKind::Friend, 0.5),
            ],
            &SeatingConfig::default(),
        );
        let seating = construct(&problem, &objective);
        // guest 2 opens table A; B keeps more free seats but no affinity
        for g in 0..3 {
            assert_eq!(seating.table_of(g), Some(0));
        }
    }

    #[test]
    fn test_unrelated_guests_fill_least_full() {
        let (problem, objective) = build(
            4,
            vec![Table::new(1, "A", 4), Table::new(2, "B", 4)],
            vec![],
            &SeatingConfig::default(),
        );
        let seating = construct(&problem, &objective);
        assert_eq!(seating.occupancy(0), 2);
        assert_eq!(seating.occupancy(1), 2);
    }

    #[test]
    fn test_full_tables_excluded() {
        // Three friends, but the first table only seats two.
        let (problem, objective) = build(
            3,
            vec![Table::new(1, "Small", 2), Table::new(2, "Big", 5)],
            vec![
                Relationship::new(1, 2, RelationshipKind::Friend, 1.0),
                Relationship::new(2, 3, RelationshipKind::Friend, 1.0),
                Relationship::new(1, 3, RelationshipKind::Friend, 1.0),
            ],
            &SeatingConfig::default(),
        );
        let seating = construct(&problem, &objective);
        assert!(seating.is_complete());
        assert!(seating.occupancy(0) <= 2);
        assert_eq!(seating.occupancy(0) + seating.occupancy(1), 3);
    }

    #[test]
    fn test_exact_capacity_fully_seated() {
        let rels = vec![
            Relationship::new(1, 2, RelationshipKind::Avoid, 1.0),
            Relationship::new(3, 4, RelationshipKind::Avoid, 1.0),
            Relationship::new(1, 3, RelationshipKind::Avoid, 1.0),
        ];
        let (problem, objective) = build(
            5,
            vec![Table::new(1, "A", 2), Table::new(2, "B", 2), Table::new(3, "C", 1)],
            rels,
            &SeatingConfig::default(),
        );
        let seating = construct(&problem, &objective);
        assert!(seating.is_complete());
        for t in 0..3 {
            assert!(seating.occupancy(t) <= problem.capacity(t));
        }
    }

    #[test]
    fn test_balance_spreads_related_guests() {
        let rels = vec![
            Relationship::new(1, 2, RelationshipKind::Colleague, 0.1),
            Relationship::new(3, 4, RelationshipKind::Colleague, 0.1),
        ];
        let config = SeatingConfig::default().with_balance_weight(1.0);
        let (problem, objective) = build(
            4,
            vec![Table::new(1, "A", 4), Table::new(2, "B", 4)],
            rels,
            &config,
        );
        let seating = construct(&problem, &objective);
        assert_eq!(seating.occupancy(0), 2);
        assert_eq!(seating.occupancy(1), 2);
    }

    #[test]
    fn test_placement_order_strongest_first() {
        let (_, objective) = build(
            3,
            vec![Table::new(1, "A", 3)],
            vec![
                Relationship::new(2, 3, RelationshipKind::Family, 1.0),
                Relationship::new(1, 3, RelationshipKind::Friend, 0.5),
            ],
            &SeatingConfig::default(),
        );
        assert_eq!(placement_order(&objective), vec![2, 1, 0]);
    }
}
