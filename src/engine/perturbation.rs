//! Iterated local search: shake the best seating, re-improve, keep if better.
//!
//! # Algorithm
//!
//! 1. Copy the best seating
//! 2. **Shaking**: apply `strength` random moves, each a swap between
//!    guests at different tables or a relocation into a free seat
//! 3. **Local search**: hill-climb the shaken copy
//! 4. **Move or not**: replace the best seating only on strict improvement
//!
//! The RNG is seeded from the configuration, so runs are reproducible.
//!
//! # Reference
//!
//! Lourenço, H. R., Martin, O. C. & Stützle, T. (2003). "Iterated Local
//! Search", *Handbook of Metaheuristics*, 320-353.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::local_search::{self, SearchLimits, SearchStats};
use super::objective::{Objective, EPSILON};
use super::problem::SeatingProblem;
use super::state::Seating;

/// Outcome of the perturbation rounds.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PerturbationStats {
    pub rounds: usize,
    pub improvements: usize,
    pub search: SearchStats,
}

/// Perturbation settings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Perturbation {
    pub restarts: usize,
    pub strength: usize,
    pub seed: u64,
}

/// Runs `restarts` perturb-and-improve rounds starting from `best`.
pub(crate) fn iterate(
    problem: &SeatingProblem,
    objective: &Objective,
    best: &mut Seating,
    settings: Perturbation,
    limits: SearchLimits,
    history: &mut Vec<f64>,
) -> PerturbationStats {
    let mut stats = PerturbationStats::default();
    if problem.table_count() < 2 || problem.guest_count() < 2 {
        return stats;
    }

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut best_score = best.objective(objective);

    for round in 0..settings.restarts {
        if stats.search.timed_out {
            break;
        }

        let mut candidate = best.clone();
        let strength = settings.strength;
        shake(problem, objective, &mut candidate, strength, &mut rng);

        let mut scratch = Vec::new();
        let search =
            local_search::improve(problem, objective, &mut candidate, limits, &mut scratch);
        stats.search.absorb(search);
        stats.rounds += 1;

        let score = candidate.objective(objective);
        if score > best_score + EPSILON {
            debug!(event = "restart_improved", round = round, score = score);
            *best = candidate;
            best_score = score;
            stats.improvements += 1;
        }
        history.push(best_score);
    }

    stats
}

/// Applies up to `strength` random moves.
///
/// Each move is a relocation into a free seat or a cross-table swap, with
/// equal odds; relocations change table sizes, swaps keep them. Draws a
/// bounded number of attempts, so a seating with no legal move is left
/// untouched.
fn shake<R: Rng>(
    problem: &SeatingProblem,
    objective: &Objective,
    seating: &mut Seating,
    strength: usize,
    rng: &mut R,
) {
    let n = problem.guest_count();
    let mut applied = 0;
    let mut attempts = 0;
    while applied < strength && attempts < strength * 8 {
        attempts += 1;
        let g1 = rng.random_range(0..n);

        if rng.random_bool(0.5) {
            let Some(from) = seating.table_of(g1) else {
                continue;
            };
            let open: Vec<usize> = (0..problem.table_count())
                .filter(|&t| t != from && seating.occupancy(t) < problem.capacity(t))
                .collect();
            if !open.is_empty() {
                let to = open[rng.random_range(0..open.len())];
                seating.relocate(objective, g1, to);
                applied += 1;
            }
            continue;
        }

        let g2 = rng.random_range(0..n);
        if seating.table_of(g1) != seating.table_of(g2) {
            seating.swap(objective, g1, g2);
            applied += 1;
        }
    }
}
