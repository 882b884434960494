//! Name and Location Corpora
//!
//! Plain-text corpora, one record per line, loaded once and shared read-only
//! by the samplers. Interior blank lines are kept because the popular-names
//! corpus encodes gender by line parity.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CorpusError;

pub const FEMALE_NAMES_FILE: &str = "femaleNames.txt";
pub const MALE_NAMES_FILE: &str = "maleNames.txt";
pub const LAST_NAMES_FILE: &str = "lastNames.txt";
pub const POPULAR_NAMES_FILE: &str = "popularNames.txt";
pub const CITIES_FILE: &str = "cities.txt";

/// All corpora the samplers draw from
#[derive(Debug, Clone)]
pub struct Corpus {
    pub female_names: Vec<String>,
    pub male_names: Vec<String>,
    pub last_names: Vec<String>,
    /// Alternating lines: even index male, odd index female
    pub popular_names: Vec<String>,
    /// First line is a header and never sampled
    pub cities: Vec<String>,
}

impl Corpus {
    /// Build a corpus from in-memory lines, validating every list
    pub fn from_lines(
        female_names: Vec<String>,
        male_names: Vec<String>,
        last_names: Vec<String>,
        popular_names: Vec<String>,
        cities: Vec<String>,
    ) -> Result<Self, CorpusError> {
        let corpus = Self {
            female_names,
            male_names,
            last_names,
            popular_names,
            cities,
        };
        corpus.validate()?;
        Ok(corpus)
    }

    /// Load the five corpus files from a directory
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let dir = dir.as_ref();
        Self::from_lines(
            read_lines(dir.join(FEMALE_NAMES_FILE))?,
            read_lines(dir.join(MALE_NAMES_FILE))?,
            read_lines(dir.join(LAST_NAMES_FILE))?,
            read_lines(dir.join(POPULAR_NAMES_FILE))?,
            read_lines(dir.join(CITIES_FILE))?,
        )
    }

    /// The corpora compiled into the binary
    pub fn bundled() -> Result<Self, CorpusError> {
        Self::from_lines(
            split_lines(include_str!("../data/femaleNames.txt")),
            split_lines(include_str!("../data/maleNames.txt")),
            split_lines(include_str!("../data/lastNames.txt")),
            split_lines(include_str!("../data/popularNames.txt")),
            split_lines(include_str!("../data/cities.txt")),
        )
    }

    /// Rejects corpora the samplers could spin on forever
    fn validate(&self) -> Result<(), CorpusError> {
        let lists: [(&'static str, &[String]); 4] = [
            (FEMALE_NAMES_FILE, &self.female_names),
            (MALE_NAMES_FILE, &self.male_names),
            (LAST_NAMES_FILE, &self.last_names),
            (POPULAR_NAMES_FILE, &self.popular_names),
        ];
        for (name, lines) in lists {
            if !has_entry(lines) {
                return Err(CorpusError::EmptyCorpus(name));
            }
        }
        // Both parities of the popular list must be reachable
        if self.popular_names.len() < 2 {
            return Err(CorpusError::EmptyCorpus(POPULAR_NAMES_FILE));
        }
        if self.cities.len() < 2 || !has_entry(&self.cities[1..]) {
            return Err(CorpusError::MissingHeader);
        }
        Ok(())
    }
}

fn has_entry(lines: &[String]) -> bool {
    lines.iter().any(|l| !l.trim().is_empty())
}

fn read_lines(path: PathBuf) -> Result<Vec<String>, CorpusError> {
    let content = fs::read_to_string(&path).map_err(|source| CorpusError::Io { path, source })?;
    Ok(split_lines(&content))
}

fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(|l| l.trim_end().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bundled_corpus_loads() {
        let corpus = Corpus::bundled().unwrap();
        assert!(!corpus.female_names.is_empty());
        assert!(!corpus.male_names.is_empty());
        assert_eq!(corpus.cities[0], "City, State");
        assert_eq!(corpus.popular_names[0], "James");
        assert_eq!(corpus.popular_names[1], "Mary");
    }

    #[test]
    fn test_blank_only_corpus_rejected() {
        let result = Corpus::from_lines(
            strings(&["", "  "]),
            strings(&["Otis"]),
            strings(&["Hill"]),
            strings(&["James", "Mary"]),
            strings(&["City, State", "Reno, NV"]),
        );
        assert!(matches!(result, Err(CorpusError::EmptyCorpus(FEMALE_NAMES_FILE))));
    }

    #[test]
    fn test_cities_need_more_than_header() {
        let result = Corpus::from_lines(
            strings(&["Opal"]),
            strings(&["Otis"]),
            strings(&["Hill"]),
            strings(&["James", "Mary"]),
            strings(&["City, State"]),
        );
        assert!(matches!(result, Err(CorpusError::MissingHeader)));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FEMALE_NAMES_FILE), "Opal\n\nPearl\n").unwrap();
        fs::write(dir.path().join(MALE_NAMES_FILE), "Otis\n").unwrap();
        fs::write(dir.path().join(LAST_NAMES_FILE), "Hill\r\nKing\r\n").unwrap();
        fs::write(dir.path().join(POPULAR_NAMES_FILE), "James\nMary\n").unwrap();
        fs::write(dir.path().join(CITIES_FILE), "City, State\nReno, NV\n").unwrap();

        let corpus = Corpus::load(dir.path()).unwrap();
        assert_eq!(corpus.female_names, strings(&["Opal", "", "Pearl"]));
        assert_eq!(corpus.last_names, strings(&["Hill", "King"]));
        assert_eq!(corpus.cities.len(), 2);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        match Corpus::load(dir.path()) {
            Err(CorpusError::Io { path, .. }) => {
                assert!(path.ends_with(FEMALE_NAMES_FILE));
            }
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
