//! Content Factory
//!
//! Tagged posts: announcements the simulation makes on a profile's behalf,
//! and posts written by whoever holds a session.

use chrono::Utc;
use uuid::Uuid;
use wild_records::{tag_names, Post, Profile};

use crate::error::{Result, WildError};
use crate::session::SessionStore;
use crate::store::Store;

/// Create a post owned by `profile`, published now, tagged with `tag_name`.
///
/// The tag must already exist. A miss means the store was never seeded and
/// is returned as `WildError::TagNotFound` for the caller to treat as fatal.
pub fn create_announcement<S: Store>(
    store: &mut S,
    profile: &Profile,
    text: impl Into<String>,
    tag_name: &str,
) -> Result<Post> {
    let tag = store
        .find_tag(tag_name)
        .ok_or_else(|| WildError::TagNotFound(tag_name.to_string()))?;
    let post = Post::new(store.next_post_id(), profile.id, text, Utc::now()).with_tag(tag.id);
    store.save_post(&post);
    Ok(post)
}

/// Create a post for the profile bound to `session_key`, flagged as just posted
pub fn create_user_post<S: Store>(
    store: &mut S,
    sessions: &dyn SessionStore,
    session_key: Uuid,
    content: impl Into<String>,
    tag_name: &str,
) -> Result<Post> {
    let profile_id = sessions
        .profile_for(session_key)
        .ok_or(WildError::SessionNotFound(session_key))?;
    let profile = store
        .get_profile(profile_id)
        .ok_or(WildError::ProfileNotFound(profile_id))?;

    let mut post = create_announcement(store, &profile, content, tag_name)?;
    post.just_posted = true;
    store.save_post(&post);
    Ok(post)
}

pub fn birth_text(profile: &Profile) -> String {
    format!("{} entered the openspace wilderness.", profile.full_name())
}

pub fn death_text(profile: &Profile) -> String {
    format!("{} died of starvation", profile.full_name())
}

/// Announce a profile's arrival
pub fn announce_birth<S: Store>(store: &mut S, profile: &Profile) -> Result<Post> {
    create_announcement(store, profile, birth_text(profile), tag_names::BIRTH)
}

/// Announce a profile's death by starvation
pub fn announce_death<S: Store>(store: &mut S, profile: &Profile) -> Result<Post> {
    create_announcement(store, profile, death_text(profile), tag_names::DEATH)
}
