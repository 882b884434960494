//! Snapshot Types
//!
//! Serialization structs for habitat snapshots.
//!
//! A snapshot captures the population and content of the wilderness after a
//! round, used for analysis and debugging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Profile, ProfileId, Species};

/// Generates a snapshot ID with the given round number.
pub fn generate_snapshot_id(round: u64) -> String {
    format!("snap_{:06}", round)
}

/// Per-species population summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesSnapshot {
    pub species: Species,
    pub total: usize,
    pub living: usize,
    pub mean_energy: f64,
    pub total_meals: u32,
}

/// Condensed profile view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub id: ProfileId,
    pub name: String,
    pub species: Species,
    pub age: u32,
    pub location: String,
    pub energy: f64,
    pub meals: u32,
    pub alive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ProfileId>,
    #[serde(default)]
    pub friend_count: usize,
    #[serde(default)]
    pub post_count: usize,
}

impl ProfileSnapshot {
    pub fn from_profile(profile: &Profile, post_count: usize) -> Self {
        Self {
            id: profile.id,
            name: profile.full_name(),
            species: profile.species,
            age: profile.age,
            location: profile.location.clone(),
            energy: profile.energy,
            meals: profile.meals,
            alive: profile.alive,
            position: profile.position,
            friend_count: profile.friend_count(),
            post_count,
        }
    }
}

/// Complete habitat snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitatSnapshot {
    pub snapshot_id: String,
    pub round: u64,
    pub captured_at: DateTime<Utc>,
    pub profile_count: usize,
    pub post_count: usize,
    #[serde(default)]
    pub species: Vec<SpeciesSnapshot>,
    /// Post count per tag name
    #[serde(default)]
    pub posts_by_tag: BTreeMap<String, usize>,
    #[serde(default)]
    pub profiles: Vec<ProfileSnapshot>,
}

impl HabitatSnapshot {
    pub fn new(round: u64, captured_at: DateTime<Utc>) -> Self {
        Self {
            snapshot_id: generate_snapshot_id(round),
            round,
            captured_at,
            profile_count: 0,
            post_count: 0,
            species: Vec::new(),
            posts_by_tag: BTreeMap::new(),
            profiles: Vec::new(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn find_profile(&self, id: ProfileId) -> Option<&ProfileSnapshot> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn species_summary(&self, species: Species) -> Option<&SpeciesSnapshot> {
        self.species.iter().find(|s| s.species == species)
    }

    pub fn living(&self) -> usize {
        self.species.iter().map(|s| s.living).sum()
    }

    /// Living profiles that can still act; archival ones never die
    pub fn living_active(&self) -> usize {
        self.species
            .iter()
            .filter(|s| !s.species.is_archival())
            .map(|s| s.living)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gender;

    #[test]
    fn test_generate_snapshot_id() {
        assert_eq!(generate_snapshot_id(0), "snap_000000");
        assert_eq!(generate_snapshot_id(42), "snap_000042");
    }

    #[test]
    fn test_profile_snapshot_from_profile() {
        let mut profile = Profile::new(ProfileId(4), "Eli", "Stone", Gender::Male, Species::Predator)
            .with_age(33)
            .with_location("Provo, UT")
            .with_energy(12.5);
        profile.friends.insert(ProfileId(1));

        let snap = ProfileSnapshot::from_profile(&profile, 3);
        assert_eq!(snap.name, "Eli Stone");
        assert_eq!(snap.friend_count, 1);
        assert_eq!(snap.post_count, 3);
        assert_eq!(snap.energy, 12.5);
    }

    #[test]
    fn test_living_active_ignores_archival() {
        let mut snapshot = HabitatSnapshot::new(1, Utc::now());
        for (species, living) in [(Species::Abandoned, 3), (Species::Forager, 0), (Species::Visitor, 0)] {
            snapshot.species.push(SpeciesSnapshot {
                species,
                total: 3,
                living,
                mean_energy: 0.0,
                total_meals: 0,
            });
        }

        assert_eq!(snapshot.living(), 3);
        assert_eq!(snapshot.living_active(), 0);
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut snapshot = HabitatSnapshot::new(3, Utc::now());
        snapshot.species.push(SpeciesSnapshot {
            species: Species::Forager,
            total: 4,
            living: 3,
            mean_energy: 20.0,
            total_meals: 7,
        });
        snapshot.posts_by_tag.insert("grazing".into(), 7);

        let json = snapshot.to_json_pretty().unwrap();
        assert!(json.contains("\"forager\""));

        let parsed = HabitatSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed.snapshot_id, "snap_000003");
        assert_eq!(parsed.living(), 3);
        assert_eq!(parsed.posts_by_tag.get("grazing"), Some(&7));
        assert!(parsed.species_summary(Species::Predator).is_none());
    }
}
