//! Signed pairwise affinity ledger.
//!
//! Guests are addressed by dense index (`0..n`) rather than id so that
//! the engine's inner loops are plain slice lookups. Positive relationship
//! kinds add `+strength` to a pair, `Avoid` adds `-strength * avoid_penalty`.
//! Repeated pairs accumulate.

use std::collections::HashMap;

use crate::models::{GuestId, Relationship};

/// Symmetric `n x n` matrix of pair affinities with a zero diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct AffinityMatrix {
    n: usize,
    weights: Vec<f64>,
    degree: Vec<usize>,
}

impl AffinityMatrix {
    /// Creates an all-zero matrix for `n` guests.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            weights: vec![0.0; n * n],
            degree: vec![0; n],
        }
    }

    /// Builds the ledger from relationships keyed by guest id.
    ///
    /// Relationships whose endpoints are missing from `index_of`, or that
    /// pair a guest with itself, are skipped; input validation rejects
    /// both before this is reached.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use u_seating::affinity::AffinityMatrix;
    /// use u_seating::models::{Relationship, RelationshipKind};
    ///
    /// let index_of: HashMap<u32, usize> = [(10, 0), (20, 1)].into_iter().collect();
    /// let rels = [Relationship::new(10, 20, RelationshipKind::Avoid, 0.5)];
    /// let matrix = AffinityMatrix::from_relationships(2, &index_of, &rels, 4.0);
    /// assert_eq!(matrix.get(0, 1), -2.0);
    /// ```
    pub fn from_relationships(
        n: usize,
        index_of: &HashMap<GuestId, usize>,
        relationships: &[Relationship],
        avoid_penalty: f64,
    ) -> Self {
        let mut matrix = Self::new(n);
        for rel in relationships {
            let (Some(&i), Some(&j)) = (index_of.get(&rel.a), index_of.get(&rel.b)) else {
                continue;
            };
            let weight = if rel.kind.is_positive() {
                rel.strength
            } else {
                -rel.strength * avoid_penalty
            };
            matrix.add(i, j, weight);
        }
        matrix
    }

    /// Adds `weight` to the pair `(i, j)` symmetrically. Ignores `i == j`.
    pub fn add(&mut self, i: usize, j: usize, weight: f64) {
        if i == j {
            return;
        }
        self.weights[i * self.n + j] += weight;
        self.weights[j * self.n + i] += weight;
        self.degree[i] += 1;
        self.degree[j] += 1;
    }

    /// Affinity between guests `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.n + j]
    }

    /// Number of guests.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Row of affinities for guest `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.weights[i * self.n..(i + 1) * self.n]
    }

    /// Sum of the positive entries in row `i`.
    pub fn positive_total(&self, i: usize) -> f64 {
        self.row(i).iter().filter(|&&w| w > 0.0).sum()
    }

    /// Returns `true` if any relationship touches guest `i`.
    pub fn has_relationships(&self, i: usize) -> bool {
        self.degree[i] > 0
    }

    /// Sum of affinities over all unordered pairs in `members`.
    pub fn group_total(&self, members: &[usize]) -> f64 {
        let mut total = 0.0;
        for (k, &i) in members.iter().enumerate() {
            for &j in &members[k + 1..] {
                total += self.get(i, j);
            }
        }
        total
    }
}
