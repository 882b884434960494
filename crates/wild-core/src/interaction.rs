//! Interaction Engine
//!
//! Predation, grazing, starvation and friend assignment. Each resolution
//! mutates the profiles and posts it is handed, persists them, and posts the
//! matching announcements.

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::{debug, info};
use wild_records::{tag_names, Post, Profile, Species};

use crate::config::WildConfig;
use crate::content::{announce_death, create_announcement};
use crate::error::Result;
use crate::store::Store;

/// Result of a predation attempt
#[derive(Debug, Clone, PartialEq)]
pub enum PredationOutcome {
    /// Prey eaten; its whole energy went to the predator
    Consumed { energy_gained: f64 },
    /// Predator was full and only took the consolation energy
    Sated,
    /// One of the two is dead, or they are the same profile
    Unavailable,
}

impl PredationOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, PredationOutcome::Consumed { .. })
    }
}

/// Result of a grazing attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ForagingOutcome {
    /// A bite was taken and posted
    Grazed { bite: String, nutrients: f64 },
    /// Forager was full and only took the consolation energy
    Sated,
    /// Post content shorter than two characters
    TooShort,
    /// The random span was empty, or held nothing but filler
    Missed,
    /// Forager is dead
    Unavailable,
}

impl ForagingOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, ForagingOutcome::Grazed { .. })
    }
}

pub struct InteractionEngine<'a> {
    pub config: &'a WildConfig,
}

impl<'a> InteractionEngine<'a> {
    pub fn new(config: &'a WildConfig) -> Self {
        Self { config }
    }

    /// Predator tries to eat prey
    pub fn resolve_predation<S: Store>(
        &self,
        store: &mut S,
        predator: &mut Profile,
        prey: &mut Profile,
    ) -> Result<PredationOutcome> {
        if !predator.is_alive() || !prey.is_alive() || predator.id == prey.id {
            return Ok(PredationOutcome::Unavailable);
        }
        if predator.is_full(self.config.energy.sated_energy) {
            self.console(store, predator);
            return Ok(PredationOutcome::Sated);
        }

        let gained = prey.energy;
        predator.energy += gained;
        predator.meals += 1;
        store.save_profile(predator);

        prey.energy = 0.0;
        prey.die();
        store.save_profile(prey);

        create_announcement(
            store,
            prey,
            format!("eaten by {}", predator.full_name()),
            tag_names::PREDATION,
        )?;
        create_announcement(
            store,
            predator,
            format!("gained {} from eating {}", gained, prey.full_name()),
            tag_names::PREDATION,
        )?;

        info!("{} ate {} for {} energy", predator.full_name(), prey.full_name(), gained);
        Ok(PredationOutcome::Consumed {
            energy_gained: gained,
        })
    }

    /// Forager takes a bite out of a post.
    ///
    /// The bite is a random character span with filler removed. Its energy is
    /// the bite length minus a crowding discount of
    /// `foragers / bite_len * 100` whenever there are fewer foragers than
    /// characters in the bite. The eaten span is overwritten with one filler
    /// per consumed character.
    pub fn resolve_foraging<S: Store>(
        &self,
        store: &mut S,
        forager: &mut Profile,
        post: &mut Post,
        rng: &mut SmallRng,
    ) -> Result<ForagingOutcome> {
        if !forager.is_alive() {
            return Ok(ForagingOutcome::Unavailable);
        }
        if forager.is_full(self.config.energy.sated_energy) {
            self.console(store, forager);
            return Ok(ForagingOutcome::Sated);
        }

        let len = post.char_len();
        if len < 2 {
            return Ok(ForagingOutcome::TooShort);
        }
        let chars: Vec<char> = post.content.chars().collect();

        let grazing = &self.config.grazing;
        let start = rng.gen_range(1..len);
        let bite_size = rng.gen_range(
            grazing.min_bite.min(grazing.max_bite)..=grazing.max_bite.max(grazing.min_bite),
        );
        let end = rng.gen_range(start..=start + bite_size).min(len);
        if end <= start {
            return Ok(ForagingOutcome::Missed);
        }

        let eaten: String = chars[start..end].iter().collect();
        let bite = strip_filler(eaten, &grazing.filler);
        if bite.is_empty() {
            debug!("{} bit into nothing but filler", forager.full_name());
            return Ok(ForagingOutcome::Missed);
        }

        create_announcement(store, forager, bite.clone(), tag_names::GRAZING)?;

        let bite_len = bite.chars().count();
        let foragers = store.count_species(Species::Forager);
        let modifier = if foragers < bite_len {
            foragers as f64 / bite_len as f64 * 100.0
        } else {
            0.0
        };
        let nutrients = bite_len as f64 - modifier;
        forager.energy += nutrients;
        forager.meals += 1;
        store.save_profile(forager);

        let mut grazed: String = chars[..start].iter().collect();
        grazed.push_str(&grazing.filler.repeat(end - start));
        grazed.extend(&chars[end..]);
        post.content = grazed;
        store.save_post(post);

        debug!("{} grazed {:?} for {} energy", forager.full_name(), bite, nutrients);
        Ok(ForagingOutcome::Grazed { bite, nutrients })
    }

    /// Burn one round of metabolism for a living active profile
    pub fn metabolize<S: Store>(&self, store: &mut S, profile: &mut Profile) {
        if !profile.is_alive() || profile.species.is_archival() {
            return;
        }
        profile.energy -= self.config.energy.metabolism_per_round;
        store.save_profile(profile);
    }

    /// Kill a living active profile whose energy has run out.
    ///
    /// Returns whether the profile died.
    pub fn resolve_starvation<S: Store>(&self, store: &mut S, profile: &mut Profile) -> Result<bool> {
        if !profile.is_alive() || profile.species.is_archival() || profile.energy > 0.0 {
            return Ok(false);
        }
        profile.die();
        store.save_profile(profile);
        announce_death(store, profile)?;

        info!("{} starved", profile.full_name());
        Ok(true)
    }

    /// Give a profile friends from the abandoned population.
    ///
    /// A target is drawn from the configured range. Candidates are linked
    /// symmetrically while they are below the target themselves, and linking
    /// stops as soon as the profile reaches it. Returns the number added.
    pub fn assign_friends<S: Store>(
        &self,
        store: &mut S,
        profile: &mut Profile,
        rng: &mut SmallRng,
    ) -> usize {
        let friends = &self.config.friends;
        let target = rng.gen_range(
            friends.min_friends.min(friends.max_friends)..=friends.max_friends.max(friends.min_friends),
        );
        if profile.friend_count() >= target {
            return 0;
        }

        let candidates = store
            .random_profiles_of(
                Species::Abandoned,
                Some(profile.id),
                target + profile.friend_count(),
                rng,
            )
            .into_iter()
            .filter(|c| !profile.is_friend(c.id))
            .take(target)
            .collect::<Vec<_>>();
        let mut added = 0;
        for mut friend in candidates {
            if profile.friend_count() >= target {
                break;
            }
            if friend.friend_count() >= target {
                continue;
            }
            profile.friends.insert(friend.id);
            friend.friends.insert(profile.id);
            store.save_profile(&friend);
            added += 1;
        }
        store.save_profile(profile);

        debug!("{} gained {} friends (target {})", profile.full_name(), added, target);
        added
    }

    fn console<S: Store>(&self, store: &mut S, profile: &mut Profile) {
        profile.energy += self.config.energy.consolation_energy;
        store.save_profile(profile);
    }
}

/// Remove filler until none is left; one pass can splice a new filler
/// together from the characters around a removed one.
fn strip_filler(mut text: String, filler: &str) -> String {
    if filler.is_empty() {
        return text;
    }
    while text.contains(filler) {
        text = text.replace(filler, "");
    }
    text
}
