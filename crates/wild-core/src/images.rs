//! Image Catalog
//!
//! How many portrait images exist for each species label.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::config::ImageConfig;

pub trait ImageCatalog {
    /// Number of images available for a species label
    fn image_count(&self, species_label: &str) -> u32;
}

/// Counts taken from configuration
#[derive(Debug, Clone, Default)]
pub struct FixedImageCatalog {
    counts: BTreeMap<String, u32>,
}

impl FixedImageCatalog {
    pub fn new(counts: BTreeMap<String, u32>) -> Self {
        Self { counts }
    }

    pub fn from_config(config: &ImageConfig) -> Self {
        Self::new(config.counts.clone())
    }
}

impl ImageCatalog for FixedImageCatalog {
    fn image_count(&self, species_label: &str) -> u32 {
        self.counts.get(species_label).copied().unwrap_or(0)
    }
}

/// Counts the files in `<root>/<label>/`
#[derive(Debug, Clone)]
pub struct DirectoryImageCatalog {
    root: PathBuf,
}

impl DirectoryImageCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageCatalog for DirectoryImageCatalog {
    fn image_count(&self, species_label: &str) -> u32 {
        let dir = self.root.join(species_label);
        match fs::read_dir(&dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
                .count() as u32,
            Err(e) => {
                tracing::debug!("No image directory {:?}: {}", dir, e);
                0
            }
        }
    }
}
