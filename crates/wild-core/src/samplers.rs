//! Random Samplers
//!
//! Weighted age sampling, gendered name sampling and location sampling.

use rand::rngs::SmallRng;
use rand::Rng;
use wild_records::Gender;

use crate::corpus::{Corpus, CITIES_FILE, FEMALE_NAMES_FILE, LAST_NAMES_FILE, MALE_NAMES_FILE};
use crate::error::CorpusError;

/// Constants for sampling
pub mod sampling_constants {
    /// Age bracket boundaries; bracket `i` spans `AGE_BRACKETS[i]..=AGE_BRACKETS[i + 1]`
    pub const AGE_BRACKETS: [u32; 8] = [11, 18, 25, 35, 45, 55, 65, 90];
    /// Relative weight of each age bracket
    pub const AGE_BIAS: [f64; 7] = [0.05, 0.25, 0.26, 0.16, 0.19, 0.06, 0.02];
    /// Out of four draws, this many come from the popular-names corpus
    pub const POPULAR_NAME_CHANCE: u32 = 3;
    /// Blank lines are retried at most this many times before falling back
    pub const MAX_SAMPLE_ATTEMPTS: usize = 32;
}

use sampling_constants::*;

/// A sampled identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
}

/// Pick an index with probability proportional to its weight.
///
/// Draws a uniform value scaled by the weight sum and subtracts weights in
/// order until the value goes negative. Returns `None` when the weights are
/// exhausted first, which only happens for a non-positive sum.
pub fn weighted_index(rng: &mut SmallRng, weights: &[f64]) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return None;
    }
    let mut remaining = rng.gen::<f64>() * total;
    for (i, w) in weights.iter().enumerate() {
        remaining -= w;
        if remaining < 0.0 {
            return Some(i);
        }
    }
    None
}

/// Sample an age: pick a bracket by bias, then uniformly within it
pub fn sample_age(rng: &mut SmallRng) -> u32 {
    let bracket = weighted_index(rng, &AGE_BIAS).unwrap_or(AGE_BIAS.len() - 1);
    rng.gen_range(AGE_BRACKETS[bracket]..=AGE_BRACKETS[bracket + 1])
}

/// Sample a first name for the given gender.
///
/// Three times in four the name comes from the popular-names corpus at an
/// index whose parity matches the gender; otherwise it is drawn from the
/// gender's own corpus.
pub fn sample_first_name(
    corpus: &Corpus,
    gender: Gender,
    rng: &mut SmallRng,
) -> Result<String, CorpusError> {
    let (names, label) = match gender {
        Gender::Female => (&corpus.female_names, FEMALE_NAMES_FILE),
        Gender::Male => (&corpus.male_names, MALE_NAMES_FILE),
    };

    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let candidate = if rng.gen_range(0..4) < POPULAR_NAME_CHANCE {
            popular_name(&corpus.popular_names, gender, rng)
        } else {
            uniform_line(names, rng)
        };
        if let Some(name) = candidate.filter(|n| !n.trim().is_empty()) {
            return Ok(name.to_string());
        }
    }

    tracing::warn!(corpus = label, "name sampling kept hitting blank lines, using fallback");
    first_entry(names).ok_or(CorpusError::EmptyCorpus(label))
}

/// Sample a last name
pub fn sample_last_name(corpus: &Corpus, rng: &mut SmallRng) -> Result<String, CorpusError> {
    sample_non_blank(&corpus.last_names, 0, LAST_NAMES_FILE, rng)
}

/// Sample a "City, ST" location, never the header line
pub fn sample_location(corpus: &Corpus, rng: &mut SmallRng) -> Result<String, CorpusError> {
    sample_non_blank(&corpus.cities, 1, CITIES_FILE, rng)
}

/// Sample a full identity with a uniformly chosen gender
pub fn sample_identity(corpus: &Corpus, rng: &mut SmallRng) -> Result<Identity, CorpusError> {
    let gender = Gender::from_value(rng.gen_range(0..=1));
    let first_name = sample_first_name(corpus, gender, rng)?;
    let last_name = sample_last_name(corpus, rng)?;
    Ok(Identity {
        first_name,
        last_name,
        gender,
    })
}

/// Female names sit on odd lines, male names on even lines
fn popular_name<'a>(names: &'a [String], gender: Gender, rng: &mut SmallRng) -> Option<&'a str> {
    let offset = match gender {
        Gender::Female => 1,
        Gender::Male => 0,
    };
    let slots = (names.len() + 1 - offset) / 2;
    if slots == 0 {
        return None;
    }
    let index = rng.gen_range(0..slots) * 2 + offset;
    names.get(index).map(String::as_str)
}

fn uniform_line<'a>(names: &'a [String], rng: &mut SmallRng) -> Option<&'a str> {
    if names.is_empty() {
        return None;
    }
    Some(names[rng.gen_range(0..names.len())].as_str())
}

fn sample_non_blank(
    lines: &[String],
    skip: usize,
    label: &'static str,
    rng: &mut SmallRng,
) -> Result<String, CorpusError> {
    let lines = lines.get(skip..).unwrap_or_default();
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        if let Some(line) = uniform_line(lines, rng).filter(|l| !l.trim().is_empty()) {
            return Ok(line.to_string());
        }
    }
    first_entry(lines).ok_or(CorpusError::EmptyCorpus(label))
}

fn first_entry(lines: &[String]) -> Option<String> {
    lines.iter().find(|l| !l.trim().is_empty()).cloned()
}
