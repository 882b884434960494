//! Core wilderness logic: sampling, profile creation, content, interactions.

use rand::rngs::SmallRng;

pub mod archive;
pub mod config;
pub mod content;
pub mod corpus;
pub mod error;
pub mod factory;
pub mod habitat;
pub mod images;
pub mod interaction;
pub mod output;
pub mod samplers;
pub mod session;
pub mod store;

pub use config::WildConfig;
pub use corpus::Corpus;
pub use error::{CorpusError, Result, WildError};
pub use factory::ProfileFactory;
pub use habitat::{Habitat, PopulationPlan, RoundReport};
pub use interaction::{ForagingOutcome, InteractionEngine, PredationOutcome};
pub use store::{MemoryStore, PostRepository, ProfileRepository, Store, TagRepository};

/// Seeded random number generator
pub struct SimRng(pub SmallRng);
