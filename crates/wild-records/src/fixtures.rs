//! Sample data fixtures for testing.
//!
//! This module provides ready-made profiles for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // wild-records = { path = "../wild-records", features = ["test-fixtures"] }
//!
//! use wild_records::fixtures;
//!
//! let profiles = fixtures::sample_profiles();
//! ```

use crate::{Profile, ProfileId, Species};

/// Returns sample profiles from the fixtures file.
///
/// Contains 5 profiles:
/// - 2 abandoned (archival) profiles anchored to themselves
/// - 1 forager
/// - 1 predator
/// - 1 anonymous visitor
pub fn sample_profiles() -> Vec<Profile> {
    let json = include_str!("../tests/fixtures/sample_profiles.json");
    serde_json::from_str(json).expect("Failed to parse sample_profiles.json")
}

/// Returns a specific profile by ID from the sample profiles.
pub fn get_profile(id: u64) -> Option<Profile> {
    sample_profiles().into_iter().find(|p| p.id == ProfileId(id))
}

/// Returns the sample profiles of one species.
pub fn profiles_of(species: Species) -> Vec<Profile> {
    sample_profiles()
        .into_iter()
        .filter(|p| p.species == species)
        .collect()
}

/// Returns the sample predator.
pub fn predator() -> Profile {
    get_profile(4).expect("Predator should exist in fixtures")
}

/// Returns the sample forager.
pub fn forager() -> Profile {
    get_profile(3).expect("Forager should exist in fixtures")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_profiles_load() {
        let profiles = sample_profiles();
        assert_eq!(profiles.len(), 5, "Should have 5 sample profiles");
        assert_eq!(profiles_of(Species::Abandoned).len(), 2);
    }

    #[test]
    fn test_archival_profiles_anchor_to_themselves() {
        for profile in profiles_of(Species::Abandoned) {
            assert_eq!(profile.position, Some(profile.id));
            assert!(profile.blog_id.is_some());
        }
    }

    #[test]
    fn test_helpers() {
        assert_eq!(predator().species, Species::Predator);
        assert_eq!(forager().energy, 18.0);
        assert!(get_profile(99).is_none());
    }
}
