//! Guest model.

use std::fmt;

/// Unique guest identifier.
pub type GuestId = u32;

/// A wedding guest.
///
/// `age` and `dietary_restrictions` are carried through to reports but
/// never influence scoring.
///
/// # Examples
///
/// ```
/// use u_seating::models::Guest;
///
/// let guest = Guest::new(1, "Alice Smith")
///     .with_age(25)
///     .with_dietary_restrictions("vegetarian");
/// assert_eq!(guest.age, Some(25));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Guest {
    /// Unique identifier.
    pub id: GuestId,
    /// Display name.
    pub name: String,
    /// Age in years, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub age: Option<u32>,
    /// Free-form dietary note (e.g. "vegetarian").
    #[cfg_attr(feature = "serde", serde(default))]
    pub dietary_restrictions: Option<String>,
}

impl Guest {
    /// Creates a guest without optional attributes.
    pub fn new(id: GuestId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age: None,
            dietary_restrictions: None,
        }
    }

    /// Sets the age.
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the dietary restriction note.
    pub fn with_dietary_restrictions(mut self, note: impl Into<String>) -> Self {
        self.dietary_restrictions = Some(note.into());
        self
    }
}

impl fmt::Display for Guest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guest({}: {})", self.id, self.name)
    }
}
