//! Pairwise relationships between guests.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::guest::GuestId;

/// The closed set of relationship kinds.
///
/// Every kind except [`Avoid`](RelationshipKind::Avoid) pulls the pair
/// towards the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RelationshipKind {
    Family,
    Friend,
    Colleague,
    PlusOne,
    Avoid,
}

impl RelationshipKind {
    /// All kinds, in declaration order.
    pub const ALL: [RelationshipKind; 5] = [
        RelationshipKind::Family,
        RelationshipKind::Friend,
        RelationshipKind::Colleague,
        RelationshipKind::PlusOne,
        RelationshipKind::Avoid,
    ];

    /// Returns `true` for kinds that want the pair seated together.
    pub fn is_positive(self) -> bool {
        !matches!(self, RelationshipKind::Avoid)
    }

    /// `+1.0` for positive kinds, `-1.0` for `Avoid`.
    pub fn sign(self) -> f64 {
        if self.is_positive() {
            1.0
        } else {
            -1.0
        }
    }

    /// The snake_case tag used in tabular input.
    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipKind::Family => "family",
            RelationshipKind::Friend => "friend",
            RelationshipKind::Colleague => "colleague",
            RelationshipKind::PlusOne => "plus_one",
            RelationshipKind::Avoid => "avoid",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a relationship tag is not one of the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown relationship kind: {0:?}")]
pub struct ParseKindError(pub String);

impl FromStr for RelationshipKind {
    type Err = ParseKindError;

    /// Case-insensitive; accepts `plus-one` and `plus one` as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        RelationshipKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// A weighted relationship between two guests.
///
/// The pair is unordered: `(a, b)` and `(b, a)` describe the same
/// relationship.
///
/// # Examples
///
/// ```
/// use u_seating::models::{Relationship, RelationshipKind};
///
/// let rel = Relationship::new(1, 4, RelationshipKind::Avoid, 0.5);
/// assert_eq!(rel.signed_weight(), -0.5);
/// assert!(rel.involves(4));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relationship {
    /// First guest.
    pub a: GuestId,
    /// Second guest.
    pub b: GuestId,
    /// Kind tag.
    pub kind: RelationshipKind,
    /// Strength in `[0, 1]`.
    pub strength: f64,
}

impl Relationship {
    pub fn new(a: GuestId, b: GuestId, kind: RelationshipKind, strength: f64) -> Self {
        Self {
            a,
            b,
            kind,
            strength,
        }
    }

    /// Strength with the kind's sign applied.
    pub fn signed_weight(&self) -> f64 {
        self.kind.sign() * self.strength
    }

    /// Returns `true` if `guest` is one of the two endpoints.
    pub fn involves(&self, guest: GuestId) -> bool {
        self.a == guest || self.b == guest
    }

    /// The endpoints ordered low to high.
    pub fn key(&self) -> (GuestId, GuestId) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Relationship({} <-> {}: {})", self.a, self.b, self.kind)
    }
}
