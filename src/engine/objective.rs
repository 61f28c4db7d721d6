//! Objective function: affinity of co-seated pairs minus balance penalty.

use crate::affinity::AffinityMatrix;

use super::config::SeatingConfig;
use super::problem::SeatingProblem;

/// Tolerance for treating an objective change as an improvement.
pub(crate) const EPSILON: f64 = 1e-9;

/// Everything needed to score a seating, derived from a problem and a
/// configuration.
#[derive(Debug, Clone)]
pub struct Objective {
    affinity: AffinityMatrix,
    targets: Vec<usize>,
    balance_weight: f64,
    target_slack: usize,
}

impl Objective {
    pub fn new(problem: &SeatingProblem, config: &SeatingConfig) -> Self {
        let affinity = AffinityMatrix::from_relationships(
            problem.guest_count(),
            problem.guest_index_map(),
            problem.relationships(),
            config.avoid_penalty,
        );
        Self {
            affinity,
            targets: problem.targets().to_vec(),
            balance_weight: config.balance_weight,
            target_slack: config.target_slack,
        }
    }

    /// The affinity ledger, indexed by dense guest index.
    pub fn affinity(&self) -> &AffinityMatrix {
        &self.affinity
    }

    /// Returns `true` if the balance term contributes to the objective.
    pub fn balancing(&self) -> bool {
        self.balance_weight > 0.0
    }

    /// Penalty for table `t` holding `size` guests.
    ///
    /// Quadratic in the deviation from the target beyond `target_slack`.
    pub fn size_penalty(&self, t: usize, size: usize) -> f64 {
        if !self.balancing() {
            return 0.0;
        }
        let deviation = size.abs_diff(self.targets[t]);
        if deviation <= self.target_slack {
            return 0.0;
        }
        let excess = (deviation - self.target_slack) as f64;
        self.balance_weight * excess * excess
    }

    /// Objective change from growing table `t` by one guest.
    pub fn grow_delta(&self, t: usize, size: usize) -> f64 {
        self.size_penalty(t, size) - self.size_penalty(t, size + 1)
    }

    /// Objective change from shrinking table `t` by one guest.
    pub fn shrink_delta(&self, t: usize, size: usize) -> f64 {
        debug_assert!(size > 0);
        self.size_penalty(t, size) - self.size_penalty(t, size - 1)
    }

    /// Total balance penalty for the given per-table occupancy.
    pub fn balance_penalty(&self, occupancy: &[usize]) -> f64 {
        occupancy
            .iter()
            .enumerate()
            .map(|(t, &size)| self.size_penalty(t, size))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Guest, Relationship, RelationshipKind, Table};

    fn problem() -> SeatingProblem {
        let guests: Vec<Guest> = (1..=6).map(|id| Guest::new(id, format!("G{id}"))).collect();
        let tables = vec![Table::new(1, "A", 4), Table::new(2, "B", 4)];
        let rels = vec![Relationship::new(1, 2, RelationshipKind::Avoid, 0.5)];
        SeatingProblem::new(&guests, &tables, &rels).unwrap()
    }

    #[test]
    fn test_avoid_penalty_applied() {
        let config = SeatingConfig::default().with_avoid_penalty(4.0);
        let objective = Objective::new(&problem(), &config);
        assert_eq!(objective.affinity().get(0, 1), -2.0);
    }

    #[test]
    fn test_no_penalty_when_disabled() {
        let objective = Objective::new(&problem(), &SeatingConfig::default());
        assert!(!objective.balancing());
        assert_eq!(objective.size_penalty(0, 0), 0.0);
        assert_eq!(objective.balance_penalty(&[6, 0]), 0.0);
    }

    #[test]
    fn test_quadratic_penalty_with_slack() {
        let config = SeatingConfig::default()
            .with_balance_weight(2.0)
            .with_target_slack(1);
        let objective = Objective::new(&problem(), &config);
        // targets are [3, 3]
        assert_eq!(objective.size_penalty(0, 3), 0.0);
        assert_eq!(objective.size_penalty(0, 4), 0.0);
        assert_eq!(objective.size_penalty(0, 1), 2.0);
        assert_eq!(objective.size_penalty(0, 0), 8.0);
        assert_eq!(objective.balance_penalty(&[0, 6]), 16.0);
    }

    #[test]
    fn test_grow_and_shrink_deltas() {
        let config = SeatingConfig::default().with_balance_weight(1.0);
        let objective = Objective::new(&problem(), &config);
        // growing an empty table towards its target of 3 is rewarded
        assert_eq!(objective.grow_delta(0, 0), 9.0 - 4.0);
        // shrinking a table that is already at target is penalised
        assert_eq!(objective.shrink_delta(1, 3), -1.0);
    }
}
