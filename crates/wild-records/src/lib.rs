//! Shared record types for the openwild simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod post;
pub mod profile;
pub mod snapshot;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export profile types
pub use profile::{Gender, Profile, ProfileId, Species};

// Re-export post types
pub use post::{tag_names, Post, PostId, Tag, TagId};

// Re-export snapshot types
pub use snapshot::{generate_snapshot_id, HabitatSnapshot, ProfileSnapshot, SpeciesSnapshot};
