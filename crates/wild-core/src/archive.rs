//! Recovered Blog Archive
//!
//! External source of historical content used to backfill abandoned profiles.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<]+?>").expect("valid markup regex"));

/// Remove anything that looks like an HTML tag
pub fn strip_markup(raw_html: &str) -> String {
    MARKUP.replace_all(raw_html, "").into_owned()
}

/// One historical entry of a recovered blog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedItem {
    pub id: String,
    pub published: DateTime<Utc>,
    pub raw_html: String,
}

/// A recovered blog with its full history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedBlog {
    pub source_id: String,
    pub origin_url: String,
    pub last_update: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<ArchivedItem>,
}

pub trait ContentSource {
    /// Pull a blog. `None` asks for whichever blog is next; `Some(id)` asks
    /// for that one. Returns `None` when nothing is available.
    fn pull(&mut self, selector: Option<&str>) -> Option<ArchivedBlog>;

    /// Ids of every blog this source can serve
    fn source_ids(&self) -> Vec<String>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to read archive {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed archive: {0}")]
    Json(#[from] serde_json::Error),
}

/// Blogs loaded from a JSON array, handed out round-robin
#[derive(Debug, Clone, Default)]
pub struct JsonArchive {
    blogs: Vec<ArchivedBlog>,
    cursor: usize,
}

impl JsonArchive {
    pub fn new(blogs: Vec<ArchivedBlog>) -> Self {
        Self { blogs, cursor: 0 }
    }

    pub fn from_json(json: &str) -> Result<Self, ArchiveError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The sample archive compiled into the binary
    pub fn bundled() -> Result<Self, ArchiveError> {
        Self::from_json(include_str!("../data/archive.json"))
    }

    pub fn len(&self) -> usize {
        self.blogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blogs.is_empty()
    }
}

impl ContentSource for JsonArchive {
    fn pull(&mut self, selector: Option<&str>) -> Option<ArchivedBlog> {
        match selector {
            Some(id) => self.blogs.iter().find(|b| b.source_id == id).cloned(),
            None => {
                if self.blogs.is_empty() {
                    return None;
                }
                let blog = self.blogs[self.cursor % self.blogs.len()].clone();
                self.cursor += 1;
                Some(blog)
            }
        }
    }

    fn source_ids(&self) -> Vec<String> {
        self.blogs.iter().map(|b| b.source_id.clone()).collect()
    }
}
