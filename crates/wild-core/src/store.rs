//! Repositories
//!
//! Persistence sits behind these traits. `MemoryStore` backs the simulation
//! driver and the tests; a database-backed store would implement the same
//! traits.
//!
//! Saves are plain upserts with no transaction around a read-modify-write,
//! so concurrent callers racing on the same record can lose updates.

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use wild_records::{tag_names, Post, PostId, Profile, ProfileId, Species, Tag, TagId};

pub trait ProfileRepository {
    /// Reserve the identity for a profile about to be created
    fn next_profile_id(&mut self) -> ProfileId;
    fn get_profile(&self, id: ProfileId) -> Option<Profile>;
    /// Insert or overwrite
    fn save_profile(&mut self, profile: &Profile);
    /// A uniformly random profile, optionally excluding one
    fn random_profile(&self, exclude: Option<ProfileId>, rng: &mut SmallRng) -> Option<Profile>;
    /// Up to `limit` distinct random profiles of one species, in random order
    fn random_profiles_of(
        &self,
        species: Species,
        exclude: Option<ProfileId>,
        limit: usize,
        rng: &mut SmallRng,
    ) -> Vec<Profile>;
    fn count_profiles(&self) -> usize;
    fn count_species(&self, species: Species) -> usize;
    fn all_profiles(&self) -> Vec<Profile>;
}

pub trait PostRepository {
    fn next_post_id(&mut self) -> PostId;
    fn get_post(&self, id: PostId) -> Option<Post>;
    fn save_post(&mut self, post: &Post);
    fn posts_by(&self, profile: ProfileId) -> Vec<Post>;
    fn count_posts(&self) -> usize;
    fn all_posts(&self) -> Vec<Post>;
}

pub trait TagRepository {
    fn find_tag(&self, name: &str) -> Option<Tag>;
    /// Create the tag if missing and return it
    fn ensure_tag(&mut self, name: &str) -> Tag;
    fn all_tags(&self) -> Vec<Tag>;
}

/// Everything the factories and the interaction engine need
pub trait Store: ProfileRepository + PostRepository + TagRepository {}

impl<T: ProfileRepository + PostRepository + TagRepository> Store for T {}

/// In-memory store; ordered maps keep iteration deterministic for seeded runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: BTreeMap<ProfileId, Profile>,
    posts: BTreeMap<PostId, Post>,
    tags: BTreeMap<TagId, Tag>,
    next_profile: u64,
    next_post: u64,
}

impl MemoryStore {
    /// An empty store with no tags
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the tags the simulation attaches
    pub fn with_default_tags() -> Self {
        let mut store = Self::new();
        for name in tag_names::ALL {
            store.ensure_tag(name);
        }
        store
    }
}

impl ProfileRepository for MemoryStore {
    fn next_profile_id(&mut self) -> ProfileId {
        self.next_profile += 1;
        ProfileId(self.next_profile)
    }

    fn get_profile(&self, id: ProfileId) -> Option<Profile> {
        self.profiles.get(&id).cloned()
    }

    fn save_profile(&mut self, profile: &Profile) {
        self.next_profile = self.next_profile.max(profile.id.0);
        self.profiles.insert(profile.id, profile.clone());
    }

    fn random_profile(&self, exclude: Option<ProfileId>, rng: &mut SmallRng) -> Option<Profile> {
        self.profiles
            .values()
            .filter(|p| Some(p.id) != exclude)
            .choose(rng)
            .cloned()
    }

    fn random_profiles_of(
        &self,
        species: Species,
        exclude: Option<ProfileId>,
        limit: usize,
        rng: &mut SmallRng,
    ) -> Vec<Profile> {
        use rand::seq::SliceRandom;

        let mut picked: Vec<Profile> = self
            .profiles
            .values()
            .filter(|p| p.species == species && Some(p.id) != exclude)
            .choose_multiple(rng, limit)
            .into_iter()
            .cloned()
            .collect();
        // choose_multiple does not randomize order
        picked.shuffle(rng);
        picked
    }

    fn count_profiles(&self) -> usize {
        self.profiles.len()
    }

    fn count_species(&self, species: Species) -> usize {
        self.profiles.values().filter(|p| p.species == species).count()
    }

    fn all_profiles(&self) -> Vec<Profile> {
        self.profiles.values().cloned().collect()
    }
}

impl PostRepository for MemoryStore {
    fn next_post_id(&mut self) -> PostId {
        self.next_post += 1;
        PostId(self.next_post)
    }

    fn get_post(&self, id: PostId) -> Option<Post> {
        self.posts.get(&id).cloned()
    }

    fn save_post(&mut self, post: &Post) {
        self.next_post = self.next_post.max(post.id.0);
        self.posts.insert(post.id, post.clone());
    }

    fn posts_by(&self, profile: ProfileId) -> Vec<Post> {
        self.posts
            .values()
            .filter(|p| p.profile_id == profile)
            .cloned()
            .collect()
    }

    fn count_posts(&self) -> usize {
        self.posts.len()
    }

    fn all_posts(&self) -> Vec<Post> {
        self.posts.values().cloned().collect()
    }
}

impl TagRepository for MemoryStore {
    fn find_tag(&self, name: &str) -> Option<Tag> {
        self.tags.values().find(|t| t.name == name).cloned()
    }

    fn ensure_tag(&mut self, name: &str) -> Tag {
        if let Some(tag) = self.find_tag(name) {
            return tag;
        }
        let id = TagId(self.tags.len() as u32 + 1);
        let tag = Tag::new(id, name);
        self.tags.insert(id, tag.clone());
        tag
    }

    fn all_tags(&self) -> Vec<Tag> {
        self.tags.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::SeedableRng;
    use wild_records::Gender;

    fn spawn(store: &mut MemoryStore, species: Species) -> Profile {
        let id = store.next_profile_id();
        let profile = Profile::new(id, "Test", "Animal", Gender::Female, species);
        store.save_profile(&profile);
        profile
    }

    #[test]
    fn test_profile_ids_are_sequential() {
        let mut store = MemoryStore::new();
        assert_eq!(store.next_profile_id(), ProfileId(1));
        assert_eq!(store.next_profile_id(), ProfileId(2));
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = MemoryStore::new();
        let mut profile = spawn(&mut store, Species::Forager);
        profile.energy = 9.0;
        store.save_profile(&profile);

        assert_eq!(store.count_profiles(), 1);
        assert_eq!(store.get_profile(profile.id).unwrap().energy, 9.0);
    }

    #[test]
    fn test_random_profile_honors_exclusion() {
        let mut store = MemoryStore::new();
        let only = spawn(&mut store, Species::Predator);
        let mut rng = SmallRng::seed_from_u64(1);

        assert!(store.random_profile(Some(only.id), &mut rng).is_none());
        assert_eq!(store.random_profile(None, &mut rng).unwrap().id, only.id);
    }

    #[test]
    fn test_random_profiles_of_species() {
        let mut store = MemoryStore::new();
        let me = spawn(&mut store, Species::Abandoned);
        for _ in 0..6 {
            spawn(&mut store, Species::Abandoned);
        }
        spawn(&mut store, Species::Forager);
        let mut rng = SmallRng::seed_from_u64(2);

        let picked = store.random_profiles_of(Species::Abandoned, Some(me.id), 4, &mut rng);
        assert_eq!(picked.len(), 4);
        assert!(picked.iter().all(|p| p.species == Species::Abandoned && p.id != me.id));

        let all = store.random_profiles_of(Species::Abandoned, Some(me.id), 100, &mut rng);
        assert_eq!(all.len(), 6);
        assert_eq!(store.count_species(Species::Forager), 1);
    }

    #[test]
    fn test_posts_by_profile() {
        let mut store = MemoryStore::new();
        let a = spawn(&mut store, Species::Forager);
        let b = spawn(&mut store, Species::Forager);
        for owner in [a.id, a.id, b.id] {
            let id = store.next_post_id();
            store.save_post(&Post::new(id, owner, "text", Utc::now()));
        }

        assert_eq!(store.posts_by(a.id).len(), 2);
        assert_eq!(store.posts_by(b.id).len(), 1);
        assert_eq!(store.count_posts(), 3);
    }

    #[test]
    fn test_default_tags() {
        let mut store = MemoryStore::with_default_tags();
        assert_eq!(store.all_tags().len(), tag_names::ALL.len());
        let birth = store.find_tag(tag_names::BIRTH).unwrap();
        assert_eq!(store.ensure_tag(tag_names::BIRTH), birth);
        assert!(store.find_tag("nonsense").is_none());
    }
}
