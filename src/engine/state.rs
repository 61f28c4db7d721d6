//! Working seating state with cached guest-to-table affinity sums.
//!
//! `link[g][t]` holds the summed affinity between guest `g` and everyone
//! currently seated at table `t` (excluding `g` itself). With it, the
//! objective change of a swap or relocation is O(1) and applying a move
//! is O(n).

use crate::models::Assignment;

use super::objective::Objective;
use super::problem::SeatingProblem;

#[derive(Debug, Clone)]
pub(crate) struct Seating {
    n_tables: usize,
    table_of: Vec<Option<usize>>,
    occupancy: Vec<usize>,
    link: Vec<f64>,
}

impl Seating {
    /// An empty seating: nobody placed yet.
    pub(crate) fn empty(n_guests: usize, n_tables: usize) -> Self {
        Self {
            n_tables,
            table_of: vec![None; n_guests],
            occupancy: vec![0; n_tables],
            link: vec![0.0; n_guests * n_tables],
        }
    }

    #[inline]
    pub(crate) fn table_of(&self, g: usize) -> Option<usize> {
        self.table_of[g]
    }

    #[inline]
    pub(crate) fn occupancy(&self, t: usize) -> usize {
        self.occupancy[t]
    }

    /// Summed affinity between `g` and the guests seated at `t`.
    #[inline]
    pub(crate) fn link(&self, g: usize, t: usize) -> f64 {
        self.link[g * self.n_tables + t]
    }

    /// Returns `true` once every guest has a table.
    pub(crate) fn is_complete(&self) -> bool {
        self.table_of.iter().all(Option::is_some)
    }

    /// Seats an unplaced guest.
    pub(crate) fn seat(&mut self, objective: &Objective, g: usize, t: usize) {
        debug_assert!(self.table_of[g].is_none());
        self.table_of[g] = Some(t);
        self.occupancy[t] += 1;
        self.shift_links(objective, g, t, 1.0);
    }

    /// Moves a seated guest to another table.
    pub(crate) fn relocate(&mut self, objective: &Objective, g: usize, to: usize) {
        let Some(from) = self.table_of[g] else {
            return;
        };
        self.shift_links(objective, g, from, -1.0);
        self.occupancy[from] -= 1;
        self.table_of[g] = Some(to);
        self.occupancy[to] += 1;
        self.shift_links(objective, g, to, 1.0);
    }

    /// Exchanges the tables of two seated guests.
    pub(crate) fn swap(&mut self, objective: &Objective, g1: usize, g2: usize) {
        let (Some(t1), Some(t2)) = (self.table_of[g1], self.table_of[g2]) else {
            return;
        };
        if t1 == t2 {
            return;
        }
        self.relocate(objective, g1, t2);
        self.relocate(objective, g2, t1);
    }

    /// Objective change if `g1` and `g2` exchanged tables.
    ///
    /// Table sizes do not change, so the balance term cancels out.
    pub(crate) fn swap_delta(&self, objective: &Objective, g1: usize, g2: usize) -> f64 {
        let (Some(t1), Some(t2)) = (self.table_of[g1], self.table_of[g2]) else {
            return 0.0;
        };
        if t1 == t2 {
            return 0.0;
        }
        let pair = objective.affinity().get(g1, g2);
        (self.link(g1, t2) - pair - self.link(g1, t1))
            + (self.link(g2, t1) - pair - self.link(g2, t2))
    }

    /// Objective change if `g` moved to table `to`.
    pub(crate) fn relocate_delta(&self, objective: &Objective, g: usize, to: usize) -> f64 {
        let Some(from) = self.table_of[g] else {
            return 0.0;
        };
        if from == to {
            return 0.0;
        }
        self.link(g, to) - self.link(g, from)
            + objective.shrink_delta(from, self.occupancy[from])
            + objective.grow_delta(to, self.occupancy[to])
    }

    /// Moves `g` and `h` together to table `to`.
    pub(crate) fn pair_move(&mut self, objective: &Objective, g: usize, h: usize, to: usize) {
        self.relocate(objective, g, to);
        self.relocate(objective, h, to);
    }

    /// Objective change if `g` and `h`, both seated away from `to`, moved
    /// there together.
    pub(crate) fn pair_move_delta(
        &self,
        objective: &Objective,
        g: usize,
        h: usize,
        to: usize,
    ) -> f64 {
        let (Some(tg), Some(th)) = (self.table_of[g], self.table_of[h]) else {
            return 0.0;
        };
        if g == h || tg == to || th == to {
            return 0.0;
        }
        // `h` moves second and sees `g` already seated at `to`
        let pair = objective.affinity().get(g, h);
        let (left_behind, th_size) = if tg == th {
            (pair, self.occupancy[th] - 1)
        } else {
            (0.0, self.occupancy[th])
        };
        self.relocate_delta(objective, g, to)
            + (self.link(h, to) + pair)
            - (self.link(h, th) - left_behind)
            + objective.shrink_delta(th, th_size)
            + objective.grow_delta(to, self.occupancy[to] + 1)
    }

    /// Objective change if the unplaced guest `g` were seated at `t`.
    pub(crate) fn seat_delta(&self, objective: &Objective, g: usize, t: usize) -> f64 {
        self.link(g, t) + objective.grow_delta(t, self.occupancy[t])
    }

    /// Sum of affinities over all co-seated pairs.
    pub(crate) fn affinity_total(&self) -> f64 {
        let doubled: f64 = self
            .table_of
            .iter()
            .enumerate()
            .filter_map(|(g, t)| t.map(|t| self.link(g, t)))
            .sum();
        doubled / 2.0
    }

    /// Affinity total minus balance penalty.
    pub(crate) fn objective(&self, objective: &Objective) -> f64 {
        self.affinity_total() - objective.balance_penalty(&self.occupancy)
    }

    /// Converts dense indices back to ids. Unplaced guests are omitted.
    pub(crate) fn to_assignment(&self, problem: &SeatingProblem) -> Assignment {
        let guests = problem.guests();
        let tables = problem.tables();
        self.table_of
            .iter()
            .enumerate()
            .filter_map(|(g, t)| t.map(|t| (guests[g].id, tables[t].id)))
            .collect()
    }

    fn shift_links(&mut self, objective: &Objective, g: usize, t: usize, sign: f64) {
        let row = objective.affinity().row(g);
        for (x, &w) in row.iter().enumerate() {
            if w != 0.0 {
                self.link[x * self.n_tables + t] += sign * w;
            }
        }
    }
}
