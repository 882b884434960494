//! Habitat
//!
//! Owns everything a running wilderness needs and drives it round by round:
//! predators hunt, foragers graze, everyone active burns energy, and the
//! starving die.

use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use tracing::info;
use wild_records::{HabitatSnapshot, ProfileId, Species};

use crate::archive::ContentSource;
use crate::config::WildConfig;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::factory::ProfileFactory;
use crate::images::ImageCatalog;
use crate::interaction::InteractionEngine;
use crate::output::generate_snapshot;
use crate::store::{MemoryStore, Store};
use crate::SimRng;

/// How many active profiles to spawn on top of the archive
#[derive(Debug, Clone, Copy, Default)]
pub struct PopulationPlan {
    pub predators: usize,
    pub foragers: usize,
    pub visitors: usize,
}

/// Tally of one round
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundReport {
    pub round: u64,
    pub hunts: usize,
    pub kills: usize,
    pub grazes: usize,
    pub bites: usize,
    pub starved: usize,
}

pub struct Habitat<S: Store = MemoryStore> {
    pub config: WildConfig,
    pub corpus: Corpus,
    pub images: Box<dyn ImageCatalog>,
    pub source: Box<dyn ContentSource>,
    pub store: S,
    pub rng: SimRng,
    pub round: u64,
}

impl Habitat<MemoryStore> {
    /// A habitat over a fresh in-memory store with the default tags
    pub fn new(
        config: WildConfig,
        corpus: Corpus,
        images: Box<dyn ImageCatalog>,
        source: Box<dyn ContentSource>,
        seed: u64,
    ) -> Self {
        Self::with_store(config, corpus, images, source, MemoryStore::with_default_tags(), seed)
    }
}

impl<S: Store> Habitat<S> {
    pub fn with_store(
        config: WildConfig,
        corpus: Corpus,
        images: Box<dyn ImageCatalog>,
        source: Box<dyn ContentSource>,
        store: S,
        seed: u64,
    ) -> Self {
        Self {
            config,
            corpus,
            images,
            source,
            store,
            rng: SimRng(SmallRng::seed_from_u64(seed)),
            round: 0,
        }
    }

    /// Import every recovered blog, spawn the active population, make friends.
    ///
    /// Returns the number of profiles created.
    pub fn populate(&mut self, plan: PopulationPlan) -> Result<usize> {
        let factory = ProfileFactory::new(&self.config, &self.corpus, self.images.as_ref());
        let engine = InteractionEngine::new(&self.config);
        let rng = &mut self.rng.0;
        let mut created = Vec::new();

        for source_id in self.source.source_ids() {
            if let Some(profile) =
                factory.bulk_import_archival(&mut self.store, self.source.as_mut(), &source_id, rng)?
            {
                created.push(profile.id);
            }
        }
        let archival = created.len();

        let spawns = [
            (Species::Predator, plan.predators),
            (Species::Forager, plan.foragers),
        ];
        for (species, count) in spawns {
            for _ in 0..count {
                let profile =
                    factory.create_profile(&mut self.store, self.source.as_mut(), species, rng)?;
                created.push(profile.id);
            }
        }
        for _ in 0..plan.visitors {
            let profile = factory.create_anonymous_profile(&mut self.store, rng)?;
            created.push(profile.id);
        }

        for id in &created[archival..] {
            if let Some(mut profile) = self.store.get_profile(*id) {
                engine.assign_friends(&mut self.store, &mut profile, rng);
            }
        }

        info!(
            "Populated habitat: {} archival, {} active",
            archival,
            created.len() - archival
        );
        Ok(created.len())
    }

    /// Run one round of hunting, grazing, metabolism and starvation
    pub fn run_round(&mut self) -> Result<RoundReport> {
        self.round += 1;
        let engine = InteractionEngine::new(&self.config);
        let rng = &mut self.rng.0;
        let mut report = RoundReport {
            round: self.round,
            ..Default::default()
        };

        for id in living_ids(&self.store, |s| s == Species::Predator) {
            let Some(mut predator) = self.store.get_profile(id).filter(|p| p.is_alive()) else {
                continue;
            };
            let prey = self
                .store
                .all_profiles()
                .into_iter()
                .filter(|p| p.is_alive() && matches!(p.species, Species::Forager | Species::Visitor))
                .choose(rng);
            let Some(mut prey) = prey else {
                break;
            };
            report.hunts += 1;
            if engine
                .resolve_predation(&mut self.store, &mut predator, &mut prey)?
                .succeeded()
            {
                report.kills += 1;
            }
        }

        for id in living_ids(&self.store, |s| s == Species::Forager) {
            let Some(mut forager) = self.store.get_profile(id).filter(|p| p.is_alive()) else {
                continue;
            };
            let post = self
                .store
                .all_posts()
                .into_iter()
                .filter(|p| p.profile_id != id)
                .choose(rng);
            let Some(mut post) = post else {
                break;
            };
            report.grazes += 1;
            if engine
                .resolve_foraging(&mut self.store, &mut forager, &mut post, rng)?
                .succeeded()
            {
                report.bites += 1;
            }
        }

        for id in living_ids(&self.store, |s| !s.is_archival()) {
            if let Some(mut profile) = self.store.get_profile(id) {
                engine.metabolize(&mut self.store, &mut profile);
                if engine.resolve_starvation(&mut self.store, &mut profile)? {
                    report.starved += 1;
                }
            }
        }

        info!(
            "Round {}: {} kills in {} hunts, {} bites in {} grazes, {} starved",
            report.round, report.kills, report.hunts, report.bites, report.grazes, report.starved
        );
        Ok(report)
    }

    pub fn snapshot(&self) -> HabitatSnapshot {
        generate_snapshot(&self.store, self.round)
    }
}

fn living_ids<S: Store>(store: &S, keep: impl Fn(Species) -> bool) -> Vec<ProfileId> {
    store
        .all_profiles()
        .into_iter()
        .filter(|p| p.is_alive() && keep(p.species))
        .map(|p| p.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::JsonArchive;
    use crate::images::FixedImageCatalog;
    use crate::store::ProfileRepository;

    fn habitat(seed: u64) -> Habitat {
        let config = WildConfig::default();
        let images = Box::new(FixedImageCatalog::from_config(&config.images));
        Habitat::new(
            config,
            Corpus::bundled().unwrap(),
            images,
            Box::new(JsonArchive::bundled().unwrap()),
            seed,
        )
    }

    #[test]
    fn test_populate() {
        let mut habitat = habitat(42);
        let plan = PopulationPlan {
            predators: 2,
            foragers: 5,
            visitors: 1,
        };

        let created = habitat.populate(plan).unwrap();

        assert_eq!(created, 3 + 2 + 5 + 1);
        assert_eq!(habitat.store.count_species(Species::Abandoned), 3);
        assert_eq!(habitat.store.count_species(Species::Forager), 5);
        let snapshot = habitat.snapshot();
        // One birth announcement per active profile
        assert_eq!(snapshot.posts_by_tag.get("birth"), Some(&8));
    }

    #[test]
    fn test_rounds_advance() {
        let mut habitat = habitat(7);
        habitat
            .populate(PopulationPlan {
                predators: 1,
                foragers: 3,
                visitors: 0,
            })
            .unwrap();

        let first = habitat.run_round().unwrap();
        let second = habitat.run_round().unwrap();
        assert_eq!(first.round, 1);
        assert_eq!(second.round, 2);
        assert_eq!(habitat.snapshot().round, 2);
    }

    #[test]
    fn test_starving_world_dies_out() {
        let mut habitat = habitat(3);
        habitat.config.energy.starting_energy = 1.0;
        habitat
            .populate(PopulationPlan {
                predators: 0,
                foragers: 0,
                visitors: 4,
            })
            .unwrap();

        let report = habitat.run_round().unwrap();
        assert_eq!(report.starved, 4);
        let snapshot = habitat.snapshot();
        assert_eq!(snapshot.species_summary(Species::Visitor).unwrap().living, 0);
        assert_eq!(snapshot.living_active(), 0);
        assert_eq!(snapshot.living(), 3);
        assert_eq!(snapshot.posts_by_tag.get("death"), Some(&4));
    }
}
