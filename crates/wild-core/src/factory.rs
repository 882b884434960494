//! Profile Factory
//!
//! Creates profiles with sampled identities. Abandoned profiles are backfilled
//! from a recovered blog and anchored to themselves; every other species is
//! spliced into the rotation next to a random existing profile and announced.

use chrono::Utc;
use rand::rngs::SmallRng;
use rand::Rng;
use tracing::{debug, info, warn};
use wild_records::{Gender, Post, Profile, Species};

use crate::archive::{strip_markup, ArchivedBlog, ContentSource};
use crate::config::WildConfig;
use crate::content::announce_birth;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::images::ImageCatalog;
use crate::samplers::{sample_age, sample_identity, sample_location};
use crate::store::{ProfileRepository, Store};

pub const ANONYMOUS_FIRST_NAME: &str = "Anonymous";
pub const ANONYMOUS_LAST_NAME: &str = "Visitor";

/// Borrowed dependencies needed to bring profiles into the world
pub struct ProfileFactory<'a> {
    pub config: &'a WildConfig,
    pub corpus: &'a Corpus,
    pub images: &'a dyn ImageCatalog,
}

impl<'a> ProfileFactory<'a> {
    pub fn new(config: &'a WildConfig, corpus: &'a Corpus, images: &'a dyn ImageCatalog) -> Self {
        Self {
            config,
            corpus,
            images,
        }
    }

    /// Create a fully populated profile of the given species
    pub fn create_profile<S: Store>(
        &self,
        store: &mut S,
        source: &mut dyn ContentSource,
        species: Species,
        rng: &mut SmallRng,
    ) -> Result<Profile> {
        let mut profile = self.sampled_profile(store, species, rng)?;
        assign_image_index(store, self.images, &mut profile, rng);

        match species {
            Species::Abandoned => {
                match source.pull(None) {
                    Some(blog) => {
                        let count = backfill_posts(store, &mut profile, &blog);
                        debug!("{} backfilled with {} posts from {}", profile.id, count, blog.source_id);
                    }
                    None => warn!("Content source is empty; {} has no history", profile.id),
                }
                profile.position = Some(profile.id);
                store.save_profile(&profile);
                Ok(profile)
            }
            Species::Predator | Species::Forager | Species::Visitor => {
                self.enter_rotation(store, profile, rng)
            }
        }
    }

    /// Create an anonymous visitor with a fixed placeholder name
    pub fn create_anonymous_profile<S: Store>(
        &self,
        store: &mut S,
        rng: &mut SmallRng,
    ) -> Result<Profile> {
        let gender = Gender::from_value(rng.gen_range(0..=1));
        let mut profile = Profile::new(
            store.next_profile_id(),
            ANONYMOUS_FIRST_NAME,
            ANONYMOUS_LAST_NAME,
            gender,
            Species::Visitor,
        )
        .with_age(sample_age(rng))
        .with_location(sample_location(self.corpus, rng)?);
        assign_image_index(store, self.images, &mut profile, rng);
        self.enter_rotation(store, profile, rng)
    }

    /// Import one specific recovered blog as an abandoned profile.
    ///
    /// Returns `Ok(None)` when the source has no blog with that id.
    pub fn bulk_import_archival<S: Store>(
        &self,
        store: &mut S,
        source: &mut dyn ContentSource,
        source_id: &str,
        rng: &mut SmallRng,
    ) -> Result<Option<Profile>> {
        let Some(blog) = source.pull(Some(source_id)) else {
            debug!("No recovered blog with id {:?}", source_id);
            return Ok(None);
        };

        let mut profile = self.sampled_profile(store, Species::Abandoned, rng)?;
        profile.position = Some(profile.id);
        assign_image_index(store, self.images, &mut profile, rng);
        let count = backfill_posts(store, &mut profile, &blog);
        store.save_profile(&profile);

        info!("Imported {} as {} with {} posts", blog.source_id, profile.full_name(), count);
        Ok(Some(profile))
    }

    fn sampled_profile<S: Store>(
        &self,
        store: &mut S,
        species: Species,
        rng: &mut SmallRng,
    ) -> Result<Profile> {
        let identity = sample_identity(self.corpus, rng)?;
        let profile = Profile::new(
            store.next_profile_id(),
            identity.first_name,
            identity.last_name,
            identity.gender,
            species,
        )
        .with_age(sample_age(rng))
        .with_location(sample_location(self.corpus, rng)?);
        Ok(profile)
    }

    /// Active path: swap into the rotation, start hidden with fresh energy, announce
    fn enter_rotation<S: Store>(
        &self,
        store: &mut S,
        mut profile: Profile,
        rng: &mut SmallRng,
    ) -> Result<Profile> {
        match store.random_profile(Some(profile.id), rng) {
            Some(mut other) => swap_position(store, &mut profile, &mut other),
            // First profile in an empty world anchors to itself
            None => profile.position = Some(profile.id),
        }
        profile.last_login = Some(Utc::now());
        profile.visible = false;
        profile.energy = self.config.energy.starting_energy;
        store.save_profile(&profile);
        announce_birth(store, &profile)?;

        info!("{} ({}) entered the wilderness", profile.full_name(), profile.species);
        Ok(profile)
    }
}

/// Thread `a` into the rotation in place of `b`; `b` then points at `a`.
pub fn swap_position<P: ProfileRepository + ?Sized>(store: &mut P, a: &mut Profile, b: &mut Profile) {
    a.position = b.position;
    b.position = Some(a.id);
    store.save_profile(a);
    store.save_profile(b);
}

/// Pick a portrait index in `[1, count / 2]` for the profile's species.
///
/// Only the first half of each species' images is ever handed out. When that
/// half is empty the profile keeps no image.
pub fn assign_image_index<P: ProfileRepository + ?Sized>(
    store: &mut P,
    images: &dyn ImageCatalog,
    profile: &mut Profile,
    rng: &mut SmallRng,
) {
    let upper = images.image_count(profile.species.label()) / 2;
    profile.img_number = if upper >= 1 {
        Some(rng.gen_range(1..=upper))
    } else {
        warn!("No images available for {}; {} left without one", profile.species, profile.id);
        None
    };
    store.save_profile(profile);
}

/// Attach the blog's identity to the profile and store one stripped post per item
fn backfill_posts<S: Store>(store: &mut S, profile: &mut Profile, blog: &ArchivedBlog) -> usize {
    profile.blog_id = Some(blog.source_id.clone());
    profile.blog_url = Some(blog.origin_url.clone());
    profile.last_login = Some(blog.last_update);

    for item in &blog.items {
        let post = Post::new(
            store.next_post_id(),
            profile.id,
            strip_markup(&item.raw_html),
            item.published,
        );
        store.save_post(&post);
    }
    blog.items.len()
}
