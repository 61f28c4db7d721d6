//! Seating engine execution.
//!
//! # Algorithm
//!
//! 1. Build the objective (affinity ledger, balance targets)
//! 2. Greedy construction seats every guest
//! 3. Swap/relocate hill climbing until no improving move remains
//! 4. Optional perturb-and-improve rounds
//! 5. Convert to an [`Assignment`] and score it

use std::time::{Duration, Instant};

use tracing::info;

use super::config::SeatingConfig;
use super::construction;
use super::local_search::{self, SearchLimits};
use super::objective::Objective;
use super::perturbation::{self, Perturbation};
use super::problem::SeatingProblem;
use crate::models::Assignment;
use crate::report::ScoreReport;

/// Result of a seating run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatingResult {
    /// Final guest → table mapping.
    pub assignment: Assignment,
    /// Score breakdown of `assignment`.
    pub report: ScoreReport,
    /// Objective right after construction.
    pub initial_objective: f64,
    /// Local-search passes, including those inside perturbation rounds.
    pub passes: usize,
    /// Accepted swap moves.
    pub swaps: usize,
    /// Accepted relocation moves.
    pub relocations: usize,
    /// Perturbation rounds that improved the best seating.
    pub restarts_improved: usize,
    /// Whether the first local search ended because no improving move was left.
    pub converged: bool,
    /// Whether the time limit cut the run short.
    pub timed_out: bool,
    /// Best objective after each pass and each perturbation round.
    pub objective_history: Vec<f64>,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl SeatingResult {
    /// Final objective value.
    pub fn objective(&self) -> f64 {
        self.report.objective
    }
}

/// Seating engine runner.
pub struct SeatingRunner;

impl SeatingRunner {
    /// Seats every guest of `problem`.
    ///
    /// Deterministic: identical problems and configurations produce
    /// identical results unless a time limit interrupts the search.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`SeatingConfig::validate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use u_seating::engine::{SeatingConfig, SeatingProblem, SeatingRunner};
    /// use u_seating::models::{Guest, Relationship, RelationshipKind, Table};
    ///
    /// let guests = vec![Guest::new(1, "Alice"), Guest::new(2, "Bob")];
    /// let tables = vec![Table::new(1, "Head", 2)];
    /// let rels = vec![Relationship::new(1, 2, RelationshipKind::Family, 1.0)];
    ///
    /// let problem = SeatingProblem::new(&guests, &tables, &rels).unwrap();
    /// let result = SeatingRunner::run(&problem, &SeatingConfig::default());
    /// assert_eq!(result.assignment.guests_at(1), vec![1, 2]);
    /// ```
    pub fn run(problem: &SeatingProblem, config: &SeatingConfig) -> SeatingResult {
        config.validate().expect("invalid SeatingConfig");

        let start = Instant::now();
        // a limit too far out to represent means no deadline
        let deadline = config.time_limit().and_then(|limit| start.checked_add(limit));

        info!(
            event = "solve_start",
            guests = problem.guest_count(),
            tables = problem.table_count(),
            relationships = problem.relationships().len(),
            capacity = problem.total_capacity(),
        );

        let objective = Objective::new(problem, config);
        let mut seating = construction::construct(problem, &objective);
        debug_assert!(seating.is_complete());

        let initial_objective = seating.objective(&objective);
        let mut history = vec![initial_objective];

        let limits = SearchLimits {
            max_passes: config.max_passes,
            allow_relocation: config.allow_relocation,
            deadline,
        };

        info!(event = "phase_start", phase = "Local Search");
        let mut search =
            local_search::improve(problem, &objective, &mut seating, limits, &mut history);
        let converged = search.converged;
        info!(
            event = "phase_end",
            phase = "Local Search",
            passes = search.passes,
            swaps = search.swaps,
            relocations = search.relocations,
            score = seating.objective(&objective),
        );

        let mut restarts_improved = 0;
        if config.restarts > 0 && !search.timed_out {
            info!(event = "phase_start", phase = "Perturbation", rounds = config.restarts);
            let settings = Perturbation {
                restarts: config.restarts,
                strength: config.perturbation_strength,
                seed: config.seed,
            };
            let stats = perturbation::iterate(
                problem,
                &objective,
                &mut seating,
                settings,
                limits,
                &mut history,
            );
            search.absorb(stats.search);
            restarts_improved = stats.improvements;
            info!(
                event = "phase_end",
                phase = "Perturbation",
                rounds = stats.rounds,
                improvements = stats.improvements,
                score = seating.objective(&objective),
            );
        }

        let assignment = seating.to_assignment(problem);
        let report = ScoreReport::with_objective(problem, &objective, &assignment);
        let elapsed = start.elapsed();

        info!(
            event = "solve_end",
            score = report.objective,
            satisfied = report.satisfied_count,
            violated = report.violated_count,
            duration_ms = elapsed.as_millis() as u64,
        );

        SeatingResult {
            assignment,
            report,
            initial_objective,
            passes: search.passes,
            swaps: search.swaps,
            relocations: search.relocations,
            restarts_improved,
            converged,
            timed_out: search.timed_out,
            objective_history: history,
            elapsed,
        }
    }
}
