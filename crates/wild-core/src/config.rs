//! Configuration loading for the wilderness.
//!
//! All tunables are loaded from a TOML configuration file. Every section is
//! optional and falls back to its defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Complete wilderness configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WildConfig {
    /// Energy economy settings
    #[serde(default)]
    pub energy: EnergyConfig,
    /// Friend assignment settings
    #[serde(default)]
    pub friends: FriendConfig,
    /// Grazing bite settings
    #[serde(default)]
    pub grazing: GrazingConfig,
    /// Image counts per species label
    #[serde(default)]
    pub images: ImageConfig,
}

impl WildConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Energy economy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Energy given to every newly born active profile
    pub starting_energy: f64,
    /// At or above this energy a profile is full and will not eat
    pub sated_energy: f64,
    /// Flat energy awarded to a full profile that tries to eat anyway
    pub consolation_energy: f64,
    /// Energy burned by each living active profile per round
    pub metabolism_per_round: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            starting_energy: 50.0,
            sated_energy: 150.0,
            consolation_energy: 2.0,
            metabolism_per_round: 1.0,
        }
    }
}

/// Friend assignment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FriendConfig {
    pub min_friends: usize,
    pub max_friends: usize,
}

impl Default for FriendConfig {
    fn default() -> Self {
        Self {
            min_friends: 3,
            max_friends: 12,
        }
    }
}

/// Grazing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrazingConfig {
    /// Smallest bite, in characters
    pub min_bite: usize,
    /// Largest bite, in characters
    pub max_bite: usize,
    /// Marker left behind in grazed content
    pub filler: String,
}

impl Default for GrazingConfig {
    fn default() -> Self {
        Self {
            min_bite: 4,
            max_bite: 24,
            filler: " / ".to_string(),
        }
    }
}

/// Image catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Available image files per species label
    pub counts: BTreeMap<String, u32>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        let counts = [
            ("abandoned", 24),
            ("predator", 8),
            ("forager", 10),
            ("visitor", 4),
        ]
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
        Self { counts }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
    /// Error writing TOML config
    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# openwild configuration

[energy]
starting_energy = 50.0
sated_energy = 150.0
consolation_energy = 2.0
metabolism_per_round = 1.0

[friends]
min_friends = 3
max_friends = 12

[grazing]
min_bite = 4
max_bite = 24
filler = " / "

[images.counts]
abandoned = 24
predator = 8
forager = 10
visitor = 4
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WildConfig::default();

        assert_eq!(config.energy.starting_energy, 50.0);
        assert_eq!(config.energy.consolation_energy, 2.0);
        assert_eq!(config.friends.min_friends, 3);
        assert_eq!(config.grazing.filler, " / ");
        assert_eq!(config.images.counts.get("predator"), Some(&8));
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            [energy]
            starting_energy = 10.0
            sated_energy = 30.0

            [friends]
            min_friends = 1
            max_friends = 2
        "#;

        let config = WildConfig::from_str(toml).unwrap();

        assert_eq!(config.energy.starting_energy, 10.0);
        assert_eq!(config.energy.sated_energy, 30.0);
        assert_eq!(config.friends.max_friends, 2);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [grazing]
            max_bite = 40
        "#;

        let config = WildConfig::from_str(toml).unwrap();

        // Specified value
        assert_eq!(config.grazing.max_bite, 40);
        // Default values
        assert_eq!(config.grazing.min_bite, 4);
        assert_eq!(config.energy.consolation_energy, 2.0);
        assert_eq!(config.friends.max_friends, 12);
    }

    #[test]
    fn test_image_counts_override() {
        let toml = r#"
            [images.counts]
            predator = 2
        "#;

        let config = WildConfig::from_str(toml).unwrap();
        assert_eq!(config.images.counts.get("predator"), Some(&2));
        assert_eq!(config.images.counts.get("forager"), None);
    }

    #[test]
    fn test_default_config_toml_parses() {
        let toml = default_config_toml();
        let config = WildConfig::from_str(&toml).unwrap();

        assert_eq!(config.energy.starting_energy, 50.0);
        assert_eq!(config.grazing.filler, " / ");
        assert_eq!(config.images.counts.get("abandoned"), Some(&24));
    }

    #[test]
    fn test_config_to_toml() {
        let config = WildConfig::default();
        let toml = config.to_toml().unwrap();

        assert!(toml.contains("[energy]"));
        assert!(toml.contains("[grazing]"));
        let reparsed = WildConfig::from_str(&toml).unwrap();
        assert_eq!(reparsed.friends.min_friends, config.friends.min_friends);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = WildConfig::from_str("[energy\nstarting_energy = ");
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }
}
