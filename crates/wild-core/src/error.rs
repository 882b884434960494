//! Error Types
//!
//! Failures that escape an operation. Ordinary "it didn't work out" results
//! (a sated predator, a missed bite) are outcomes, not errors.

use std::path::PathBuf;

use uuid::Uuid;
use wild_records::{PostId, ProfileId};

use crate::archive::ArchiveError;
use crate::config::ConfigError;

pub type Result<T, E = WildError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum WildError {
    /// Tags are seeded up front; a miss means the store was never set up
    #[error("tag not found: {0:?}")]
    TagNotFound(String),
    #[error("profile not found: {0}")]
    ProfileNotFound(ProfileId),
    #[error("post not found: {0}")]
    PostNotFound(PostId),
    #[error("no profile bound to session {0}")]
    SessionNotFound(Uuid),
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corpus {0} has no usable entries")]
    EmptyCorpus(&'static str),
    #[error("city corpus needs a header line and at least one city")]
    MissingHeader,
}
