//! Profile Types
//!
//! The animals of the wilderness: identity, species, and mutable simulation state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Unique identifier for a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub u64);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "profile_{:06}", self.0)
    }
}

/// Gender of a profile. The discriminants are also the parity used when
/// picking from the popular-names corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female = 0,
    Male = 1,
}

impl Gender {
    pub fn from_value(value: usize) -> Self {
        if value % 2 == 0 {
            Gender::Female
        } else {
            Gender::Male
        }
    }
}

/// Species category of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// Dormant profile backfilled from a recovered blog
    Abandoned,
    Predator,
    Forager,
    Visitor,
}

impl Species {
    /// Human-readable label, also used as the image catalog key
    pub fn label(&self) -> &'static str {
        match self {
            Species::Abandoned => "abandoned",
            Species::Predator => "predator",
            Species::Forager => "forager",
            Species::Visitor => "visitor",
        }
    }

    /// Whether this species is archival (dormant) rather than active
    pub fn is_archival(&self) -> bool {
        matches!(self, Species::Abandoned)
    }

    /// Returns all species variants.
    pub fn all() -> &'static [Species] {
        &[
            Species::Abandoned,
            Species::Predator,
            Species::Forager,
            Species::Visitor,
        ]
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A profile in the wilderness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub age: u32,
    pub location: String,
    pub species: Species,
    /// Energy is expected to stay non-negative but nothing enforces it
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub meals: u32,
    /// Rotation position; `None` until the profile is threaded into the rotation
    #[serde(default)]
    pub position: Option<ProfileId>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub alive: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub img_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_url: Option<String>,
    #[serde(default)]
    pub friends: BTreeSet<ProfileId>,
}

fn default_true() -> bool {
    true
}

impl Profile {
    pub fn new(
        id: ProfileId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
        species: Species,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender,
            age: 0,
            location: String::new(),
            species,
            energy: 0.0,
            meals: 0,
            position: None,
            visible: true,
            alive: true,
            last_login: None,
            img_number: None,
            blog_id: None,
            blog_url: None,
            friends: BTreeSet::new(),
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Satiety check: a profile at or above the threshold will not eat
    pub fn is_full(&self, sated_energy: f64) -> bool {
        self.energy >= sated_energy
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Terminal transition; dead profiles take part in no further interactions
    pub fn die(&mut self) {
        self.alive = false;
        self.visible = false;
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }

    pub fn is_friend(&self, other: ProfileId) -> bool {
        self.friends.contains(&other)
    }
}
