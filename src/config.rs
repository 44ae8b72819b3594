//! Mount Configuration - Per-behavior switches and tuning.
//!
//! Defaults match the stock marketing page. Hosts can disable individual
//! behaviors or tune the counter and particle settings, either in code or
//! from a TOML snippet:
//!
//! ```toml
//! tilt = false
//!
//! [counter]
//! duration_ms = 1500
//!
//! [particle]
//! count = 12
//! seed = 7
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::behaviors::{CounterConfig, ParticleConfig};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid mount config: {0}")]
    Parse(#[from] toml::de::Error),
}

// =============================================================================
// Config
// =============================================================================

/// Which behaviors to wire at mount, and their tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MountConfig {
    pub navbar: bool,
    pub reveal: bool,
    pub counters: bool,
    pub accordions: bool,
    pub menu: bool,
    pub particles: bool,
    pub smooth_scroll: bool,
    pub tilt: bool,
    pub calculator: bool,

    /// Counter tuning.
    pub counter: CounterConfig,
    /// Particle tuning.
    pub particle: ParticleConfig,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            navbar: true,
            reveal: true,
            counters: true,
            accordions: true,
            menu: true,
            particles: true,
            smooth_scroll: true,
            tilt: true,
            calculator: true,
            counter: CounterConfig::default(),
            particle: ParticleConfig::default(),
        }
    }
}

impl MountConfig {
    /// Parse a config from TOML. Missing fields keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let config = MountConfig::default();
        assert!(config.navbar && config.reveal && config.counters);
        assert!(config.calculator && config.tilt);
        assert_eq!(config.counter.duration_ms, 2000);
        assert_eq!(config.particle.count, 20);
        assert_eq!(config.particle.seed, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = MountConfig::from_toml(
            r#"
            tilt = false

            [counter]
            duration_ms = 1500

            [particle]
            count = 12
            seed = 7
            "#,
        )
        .unwrap();

        assert!(!config.tilt);
        assert!(config.navbar);
        assert_eq!(config.counter.duration_ms, 1500);
        assert_eq!(config.particle.count, 12);
        assert_eq!(config.particle.seed, Some(7));
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(MountConfig::from_toml("").unwrap(), MountConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let error = MountConfig::from_toml("confetti = true").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }
}
