//! Post and Tag Types
//!
//! Posts are the only content in the wilderness. Announcements, user posts,
//! recovered blog entries and grazing bites are all posts with tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::ProfileId;

/// Unique identifier for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "post_{:08}", self.0)
    }
}

/// Unique identifier for a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(pub u32);

/// A named category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Names of the tags the simulation itself attaches
pub mod tag_names {
    pub const BIRTH: &str = "birth";
    pub const DEATH: &str = "death";
    pub const PREDATION: &str = "predation";
    pub const GRAZING: &str = "grazing";
    pub const USER: &str = "user";

    /// Every tag a fresh store is seeded with
    pub const ALL: &[&str] = &[BIRTH, DEATH, PREDATION, GRAZING, USER];
}

/// A post owned by exactly one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub profile_id: ProfileId,
    pub content: String,
    pub published: DateTime<Utc>,
    #[serde(default)]
    pub tags: BTreeSet<TagId>,
    /// Display hint for the author's next page view; never persisted
    #[serde(skip)]
    pub just_posted: bool,
}

impl Post {
    pub fn new(
        id: PostId,
        profile_id: ProfileId,
        content: impl Into<String>,
        published: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            profile_id,
            content: content.into(),
            published,
            tags: BTreeSet::new(),
            just_posted: false,
        }
    }

    pub fn with_tag(mut self, tag: TagId) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn has_tag(&self, tag: TagId) -> bool {
        self.tags.contains(&tag)
    }

    /// Content length in characters
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
