//! First-improvement hill climbing over swap and relocate moves.
//!
//! # Algorithm
//!
//! 1. For every guest pair `(g1, g2)` at different tables, swap them if
//!    that strictly increases the objective
//! 2. If relocation is enabled, move any guest into a table with a free
//!    seat if that strictly increases the objective
//! 3. If relocation is enabled, move a positively related pair together
//!    into another table with two free seats, if that strictly increases
//!    the objective
//! 4. Repeat passes until a pass changes nothing, `max_passes` is reached,
//!    or the deadline passes
//!
//! Pair moves reunite a couple split across two full tables, and carry a
//! couple over to a partner they share, where no single swap or
//! relocation improves the objective.
//!
//! Every accepted move raises the objective by more than `EPSILON`, so the
//! search cannot cycle.

use std::time::Instant;

use tracing::{debug, trace};

use super::objective::{Objective, EPSILON};
use super::problem::SeatingProblem;
use super::state::Seating;

/// Counters from one local-search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SearchStats {
    pub passes: usize,
    pub swaps: usize,
    pub relocations: usize,
    pub converged: bool,
    pub timed_out: bool,
}

impl SearchStats {
    pub(crate) fn absorb(&mut self, other: SearchStats) {
        self.passes += other.passes;
        self.swaps += other.swaps;
        self.relocations += other.relocations;
        self.timed_out |= other.timed_out;
    }
}

/// Local-search termination settings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchLimits {
    pub max_passes: usize,
    pub allow_relocation: bool,
    pub deadline: Option<Instant>,
}

impl SearchLimits {
    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Improves `seating` in place. Appends the objective after each pass to
/// `history`.
pub(crate) fn improve(
    problem: &SeatingProblem,
    objective: &Objective,
    seating: &mut Seating,
    limits: SearchLimits,
    history: &mut Vec<f64>,
) -> SearchStats {
    let mut stats = SearchStats::default();
    let n = problem.guest_count();

    while stats.passes < limits.max_passes {
        if limits.expired() {
            stats.timed_out = true;
            break;
        }

        let mut improved = false;

        for g1 in 0..n {
            if limits.expired() {
                stats.timed_out = true;
                break;
            }
            for g2 in (g1 + 1)..n {
                let delta = seating.swap_delta(objective, g1, g2);
                if delta > EPSILON {
                    trace!(
                        event = "swap",
                        a = problem.guests()[g1].id,
                        b = problem.guests()[g2].id,
                        delta = delta,
                    );
                    seating.swap(objective, g1, g2);
                    stats.swaps += 1;
                    improved = true;
                }
            }
        }

        if limits.allow_relocation && !stats.timed_out {
            for g in 0..n {
                if let Some(to) = best_relocation(problem, objective, seating, g) {
                    trace!(
                        event = "relocate",
                        guest = problem.guests()[g].id,
                        to = problem.tables()[to].id,
                    );
                    seating.relocate(objective, g, to);
                    stats.relocations += 1;
                    improved = true;
                }
            }
            for g in 0..n {
                if let Some((h, to)) = best_pair_move(problem, objective, seating, g) {
                    trace!(
                        event = "pair_move",
                        a = problem.guests()[g].id,
                        b = problem.guests()[h].id,
                        to = problem.tables()[to].id,
                    );
                    seating.pair_move(objective, g, h, to);
                    stats.relocations += 2;
                    improved = true;
                }
            }
        }

        stats.passes += 1;
        let score = seating.objective(objective);
        history.push(score);
        debug!(
            event = "progress",
            pass = stats.passes,
            swaps = stats.swaps,
            relocations = stats.relocations,
            score = score,
        );

        if !improved {
            stats.converged = true;
            break;
        }
        if stats.timed_out {
            break;
        }
    }

    stats
}

/// The free-seat table that most improves the objective for `g`, if any.
fn best_relocation(
    problem: &SeatingProblem,
    objective: &Objective,
    seating: &Seating,
    g: usize,
) -> Option<usize> {
    let from = seating.table_of(g)?;
    let mut best: Option<(usize, f64)> = None;
    for to in 0..problem.table_count() {
        if to == from || seating.occupancy(to) >= problem.capacity(to) {
            continue;
        }
        let delta = seating.relocate_delta(objective, g, to);
        if delta <= EPSILON {
            continue;
        }
        match best {
            Some((_, best_delta)) if delta <= best_delta + EPSILON => {}
            _ => best = Some((to, delta)),
        }
    }
    best.map(|(t, _)| t)
}

/// The best joint move of `g` and a positively related partner into a
/// table, holding neither of them, with room for both.
fn best_pair_move(
    problem: &SeatingProblem,
    objective: &Objective,
    seating: &Seating,
    g: usize,
) -> Option<(usize, usize)> {
    let tg = seating.table_of(g)?;
    let mut best: Option<(usize, usize, f64)> = None;
    for (h, &w) in objective.affinity().row(g).iter().enumerate() {
        if w <= EPSILON {
            continue;
        }
        let Some(th) = seating.table_of(h) else {
            continue;
        };
        for to in 0..problem.table_count() {
            if to == tg || to == th || seating.occupancy(to) + 2 > problem.capacity(to) {
                continue;
            }
            let delta = seating.pair_move_delta(objective, g, h, to);
            if delta <= EPSILON {
                continue;
            }
            match best {
                Some((_, _, best_delta)) if delta <= best_delta + EPSILON => {}
                _ => best = Some((h, to, delta)),
            }
        }
    }
    best.map(|(h, to, _)| (h, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SeatingConfig;
    use crate::models::{Guest, Relationship, RelationshipKind, Table};

    fn limits(max_passes: usize, allow_relocation: bool) -> SearchLimits {
        SearchLimits {
            max_passes,
            allow_relocation,
            deadline: None,
        }
    }

    fn couples_problem() -> (SeatingProblem, Objective) {
        // Two couples deliberately split across two tables of two.
        let guests: Vec<Guest> = (1..=4).map(|id| Guest::new(id, format!("G{id}"))).collect();
        let tables = vec![Table::new(1, "A", 2), Table::new(2, "B", 2)];
        let rels = vec![
            Relationship::new(1, 2, RelationshipKind::PlusOne, 1.0),
            Relationship::new(3, 4, RelationshipKind::PlusOne, 1.0),
        ];
        let problem = SeatingProblem::new(&guests, &tables, &rels).unwrap();
        let objective = Objective::new(&problem, &SeatingConfig::default());
        (problem, objective)
    }

    fn split(objective: &Objective) -> Seating {
        let mut seating = Seating::empty(4, 2);
        seating.seat(objective, 0, 0);
        seating.seat(objective, 2, 0);
        seating.seat(objective, 1, 1);
        seating.seat(objective, 3, 1);
        seating
    }

    #[test]
    fn test_swap_reunites_couples() {
        let (problem, objective) = couples_problem();
        let mut seating = split(&objective);
        let mut history = Vec::new();

        let stats = improve(
            &problem,
            &objective,
            &mut seating,
            limits(10, false),
            &mut history,
        );

        assert!(stats.converged);
        assert_eq!(stats.swaps, 1);
        assert_eq!(seating.table_of(0), seating.table_of(1));
        assert_eq!(seating.table_of(2), seating.table_of(3));
        assert!((seating.objective(&objective) - 2.0).abs() < 1e-12);
        assert_eq!(history.len(), stats.passes);
    }

    #[test]
    fn test_history_non_decreasing() {
        let (problem, objective) = couples_problem();
        let mut seating = split(&objective);
        let start = seating.objective(&objective);
        let mut history = Vec::new();
        improve(
            &problem,
            &objective,
            &mut seating,
            limits(10, true),
            &mut history,
        );

        let mut previous = start;
        for &score in &history {
            assert!(score >= previous - 1e-12);
            previous = score;
        }
    }

    #[test]
    fn test_max_passes_respected() {
        let (problem, objective) = couples_problem();
        let mut seating = split(&objective);
        let mut history = Vec::new();
        let stats = improve(
            &problem,
            &objective,
            &mut seating,
            limits(0, true),
            &mut history,
        );
        assert_eq!(stats.passes, 0);
        assert!(history.is_empty());
        assert_ne!(seating.table_of(0), seating.table_of(1));
    }

    #[test]
    fn test_expired_deadline_stops_immediately() {
        let (problem, objective) = couples_problem();
        let mut seating = split(&objective);
        let mut history = Vec::new();
        let stats = improve(
            &problem,
            &objective,
            &mut seating,
            SearchLimits {
                max_passes: 10,
                allow_relocation: true,
                deadline: Some(Instant::now()),
            },
            &mut history,
        );
        assert!(stats.timed_out);
        assert_eq!(stats.swaps, 0);
    }

    #[test]
    fn test_relocation_escapes_avoid() {
        // Both guests crammed at a big table; an empty table is available.
        let guests = vec![Guest::new(1, "A"), Guest::new(2, "B")];
        let tables = vec![Table::new(1, "Big", 4), Table::new(2, "Spare", 4)];
        let rels = vec![Relationship::new(1, 2, RelationshipKind::Avoid, 1.0)];
        let problem = SeatingProblem::new(&guests, &tables, &rels).unwrap();
        let objective = Objective::new(&problem, &SeatingConfig::default());

        let mut seating = Seating::empty(2, 2);
        seating.seat(&objective, 0, 0);
        seating.seat(&objective, 1, 0);

        let mut history = Vec::new();
        let stats = improve(
            &problem,
            &objective,
            &mut seating,
            limits(10, true),
            &mut history,
        );
        assert_eq!(stats.relocations, 1);
        assert_ne!(seating.table_of(0), seating.table_of(1));

        let mut stuck = Seating::empty(2, 2);
        stuck.seat(&objective, 0, 0);
        stuck.seat(&objective, 1, 0);
        let stats = improve(
            &problem,
            &objective,
            &mut stuck,
            limits(10, false),
            &mut history,
        );
        assert_eq!(stats.swaps + stats.relocations, 0);
        assert_eq!(stuck.table_of(0), stuck.table_of(1));
    }

    #[test]
    fn test_pair_move_reunites_split_family() {
        // Each partner fills a single-seat table; the big table is empty.
        let guests = vec![Guest::new(1, "A"), Guest::new(2, "B")];
        let tables = vec![
            Table::new(1, "Solo 1", 1),
            Table::new(2, "Solo 2", 1),
            Table::new(3, "Big", 4),
        ];
        let rels = vec![Relationship::new(1, 2, RelationshipKind::Family, 1.0)];
        let problem = SeatingProblem::new(&guests, &tables, &rels).unwrap();
        let objective = Objective::new(&problem, &SeatingConfig::default());

        let mut seating = Seating::empty(2, 3);
        seating.seat(&objective, 0, 0);
        seating.seat(&objective, 1, 1);

        let mut history = Vec::new();
        let stats = improve(
            &problem,
            &objective,
            &mut seating,
            limits(10, true),
            &mut history,
        );
        assert!(stats.converged);
        assert_eq!(stats.relocations, 2);
        assert_eq!(seating.table_of(0), Some(2));
        assert_eq!(seating.table_of(1), Some(2));
        assert!((seating.objective(&objective) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pair_move_needs_two_free_seats() {
        let guests = vec![Guest::new(1, "A"), Guest::new(2, "B"), Guest::new(3, "C")];
        let tables = vec![
            Table::new(1, "Solo 1", 1),
            Table::new(2, "Solo 2", 1),
            Table::new(3, "Pair", 2),
        ];
        let rels = vec![Relationship::new(1, 2, RelationshipKind::Family, 1.0)];
        let problem = SeatingProblem::new(&guests, &tables, &rels).unwrap();
        let objective = Objective::new(&problem, &SeatingConfig::default());

        let mut seating = Seating::empty(3, 3);
        seating.seat(&objective, 0, 0);
        seating.seat(&objective, 1, 1);
        seating.seat(&objective, 2, 2);

        let mut history = Vec::new();
        improve(
            &problem,
            &objective,
            &mut seating,
            limits(10, true),
            &mut history,
        );
        for t in 0..3 {
            assert!(seating.occupancy(t) <= problem.capacity(t));
        }
    }

    #[test]
    fn test_relocation_respects_capacity() {
        let guests: Vec<Guest> = (1..=3).map(|id| Guest::new(id, format!("G{id}"))).collect();
        let tables = vec![Table::new(1, "A", 2), Table::new(2, "B", 1)];
        let rels = vec![
            Relationship::new(1, 2, RelationshipKind::Avoid, 1.0),
            Relationship::new(1, 3, RelationshipKind::Avoid, 1.0),
        ];
        let problem = SeatingProblem::new(&guests, &tables, &rels).unwrap();
        let objective = Objective::new(&problem, &SeatingConfig::default());

        let mut seating = Seating::empty(3, 2);
        seating.seat(&objective, 0, 0);
        seating.seat(&objective, 1, 0);
        seating.seat(&objective, 2, 1);

        let mut history = Vec::new();
        improve(
            &problem,
            &objective,
            &mut seating,
            limits(10, true),
            &mut history,
        );
        assert!(seating.occupancy(0) <= 2);
        assert!(seating.occupancy(1) <= 1);
        // guest 1 ends alone at the single seat
        assert_eq!(seating.table_of(0), Some(1));
    }
}
