//! Snapshot Output
//!
//! Builds habitat snapshots from a store and writes them as JSON.

use chrono::Utc;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use wild_records::{HabitatSnapshot, ProfileSnapshot, Species, SpeciesSnapshot};

use crate::store::Store;

/// Capture the current population and content of a store
pub fn generate_snapshot<S: Store>(store: &S, round: u64) -> HabitatSnapshot {
    let mut snapshot = HabitatSnapshot::new(round, Utc::now());
    let profiles = store.all_profiles();
    let posts = store.all_posts();

    let mut post_counts: BTreeMap<_, usize> = BTreeMap::new();
    for post in &posts {
        *post_counts.entry(post.profile_id).or_insert(0) += 1;
    }

    for species in Species::all() {
        let members: Vec<_> = profiles.iter().filter(|p| p.species == *species).collect();
        if members.is_empty() {
            continue;
        }
        let living: Vec<_> = members.iter().filter(|p| p.is_alive()).collect();
        let mean_energy = if living.is_empty() {
            0.0
        } else {
            living.iter().map(|p| p.energy).sum::<f64>() / living.len() as f64
        };
        snapshot.species.push(SpeciesSnapshot {
            species: *species,
            total: members.len(),
            living: living.len(),
            mean_energy,
            total_meals: members.iter().map(|p| p.meals).sum(),
        });
    }

    for tag in store.all_tags() {
        let count = posts.iter().filter(|p| p.has_tag(tag.id)).count();
        snapshot.posts_by_tag.insert(tag.name, count);
    }

    snapshot.profiles = profiles
        .iter()
        .map(|p| ProfileSnapshot::from_profile(p, post_counts.get(&p.id).copied().unwrap_or(0)))
        .collect();
    snapshot.profile_count = profiles.len();
    snapshot.post_count = posts.len();
    snapshot
}

/// Write snapshot to file
pub fn write_snapshot(snapshot: &HabitatSnapshot, path: impl AsRef<Path>) -> std::io::Result<()> {
    let json = snapshot.to_json_pretty()?;
    fs::write(path, json)?;
    Ok(())
}

/// Write snapshot into a directory as `<snapshot_id>.json`
pub fn write_snapshot_to_dir(
    snapshot: &HabitatSnapshot,
    dir: impl AsRef<Path>,
) -> std::io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", snapshot.snapshot_id));
    write_snapshot(snapshot, &path)?;
    Ok(path)
}
