//! # Exit Verification Configuration
//!
//! Deployment parameters for one protocol instance. Read once at
//! validator construction; never mutated afterwards.

use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;

/// Base dispute window in blocks.
pub const BASE_CHALLENGE_PERIOD: u64 = 100;

/// Maximum cycles a block may consume, by consensus.
pub const BLOCK_MAX_CYCLES: u64 = 100_000_000;

/// Percentage of `BLOCK_MAX_CYCLES` at which a block counts as full.
pub const CONGESTION_THRESHOLD_PERCENT: u64 = 95;

/// Uncongested block dependencies a withdrawal must cite.
pub const REQUIRED_EVIDENCE_BLOCKS: usize = 50;

/// Exit verification configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlasmaExitConfig {
    /// Dispute window length in blocks.
    pub base_challenge_period: u64,
    /// Per-block cycle ceiling.
    pub block_max_cycles: u64,
    /// Fullness percentage treated as congestion.
    pub congestion_threshold_percent: u64,
    /// Minimum qualifying block dependencies for a withdrawal.
    pub required_evidence_blocks: usize,
    /// Extend the window while the chain is congested. `false` selects
    /// the fixed policy.
    pub congestion_extension: bool,
}

impl Default for PlasmaExitConfig {
    fn default() -> Self {
        Self {
            base_challenge_period: BASE_CHALLENGE_PERIOD,
            block_max_cycles: BLOCK_MAX_CYCLES,
            congestion_threshold_percent: CONGESTION_THRESHOLD_PERCENT,
            required_evidence_blocks: REQUIRED_EVIDENCE_BLOCKS,
            congestion_extension: true,
        }
    }
}

impl PlasmaExitConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_PLASMA_BASE_CHALLENGE_PERIOD` (default: 100)
    /// - `QC_PLASMA_BLOCK_MAX_CYCLES` (default: 100000000)
    /// - `QC_PLASMA_CONGESTION_THRESHOLD_PERCENT` (default: 95)
    /// - `QC_PLASMA_REQUIRED_EVIDENCE_BLOCKS` (default: 50)
    /// - `QC_PLASMA_CONGESTION_EXTENSION` (default: true)
    ///
    /// Unparseable values fall back to the default. The assembled
    /// configuration is validated before it is returned.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            base_challenge_period: env::var("QC_PLASMA_BASE_CHALLENGE_PERIOD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.base_challenge_period),

            block_max_cycles: env::var("QC_PLASMA_BLOCK_MAX_CYCLES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.block_max_cycles),

            congestion_threshold_percent: env::var("QC_PLASMA_CONGESTION_THRESHOLD_PERCENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.congestion_threshold_percent),

            required_evidence_blocks: env::var("QC_PLASMA_REQUIRED_EVIDENCE_BLOCKS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.required_evidence_blocks),

            congestion_extension: env::var("QC_PLASMA_CONGESTION_EXTENSION")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.congestion_extension),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(document).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Fixed-window configuration (no congestion extension).
    pub fn fixed() -> Self {
        Self {
            congestion_extension: false,
            ..Self::default()
        }
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_challenge_period == 0 {
            return Err(ConfigError::Zero("base_challenge_period"));
        }
        if self.block_max_cycles == 0 {
            return Err(ConfigError::Zero("block_max_cycles"));
        }
        if !(1..=100).contains(&self.congestion_threshold_percent) {
            return Err(ConfigError::ThresholdOutOfRange(
                self.congestion_threshold_percent,
            ));
        }
        if self.required_evidence_blocks == 0 {
            return Err(ConfigError::Zero("required_evidence_blocks"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlasmaExitConfig::default();
        assert_eq!(config.base_challenge_period, 100);
        assert_eq!(config.block_max_cycles, 100_000_000);
        assert_eq!(config.congestion_threshold_percent, 95);
        assert_eq!(config.required_evidence_blocks, 50);
        assert!(config.congestion_extension);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fixed_config() {
        assert!(!PlasmaExitConfig::fixed().congestion_extension);
    }

    const ENV_VARS: [&str; 5] = [
        "QC_PLASMA_BASE_CHALLENGE_PERIOD",
        "QC_PLASMA_BLOCK_MAX_CYCLES",
        "QC_PLASMA_CONGESTION_THRESHOLD_PERCENT",
        "QC_PLASMA_REQUIRED_EVIDENCE_BLOCKS",
        "QC_PLASMA_CONGESTION_EXTENSION",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    // Single test for all environment cases; the process environment is
    // shared between test threads.
    #[test]
    fn test_from_env() {
        clear_env();
        assert_eq!(PlasmaExitConfig::from_env(), Ok(PlasmaExitConfig::default()));

        env::set_var("QC_PLASMA_BASE_CHALLENGE_PERIOD", "20");
        env::set_var("QC_PLASMA_BLOCK_MAX_CYCLES", "not-a-number");
        env::set_var("QC_PLASMA_REQUIRED_EVIDENCE_BLOCKS", "7");
        env::set_var("QC_PLASMA_CONGESTION_EXTENSION", "FALSE");
        let config = PlasmaExitConfig::from_env().unwrap();
        assert_eq!(config.base_challenge_period, 20);
        assert_eq!(config.block_max_cycles, BLOCK_MAX_CYCLES);
        assert_eq!(config.required_evidence_blocks, 7);
        assert!(!config.congestion_extension);

        env::set_var("QC_PLASMA_BASE_CHALLENGE_PERIOD", "0");
        assert_eq!(
            PlasmaExitConfig::from_env(),
            Err(ConfigError::Zero("base_challenge_period"))
        );

        env::set_var("QC_PLASMA_BASE_CHALLENGE_PERIOD", "100");
        env::set_var("QC_PLASMA_CONGESTION_THRESHOLD_PERCENT", "150");
        assert_eq!(
            PlasmaExitConfig::from_env(),
            Err(ConfigError::ThresholdOutOfRange(150))
        );

        clear_env();
    }

    #[test]
    fn test_validate_rejects_zero_period() {
        let config = PlasmaExitConfig {
            base_challenge_period: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Zero("base_challenge_period"))
        );
    }

    #[test]
    fn test_validate_rejects_threshold() {
        let config = PlasmaExitConfig {
            congestion_threshold_percent: 101,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOutOfRange(101)));
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            PlasmaExitConfig::from_json(r#"{"base_challenge_period": 20, "congestion_extension": false}"#)
                .unwrap();
        assert_eq!(config.base_challenge_period, 20);
        assert!(!config.congestion_extension);
        assert_eq!(config.required_evidence_blocks, 50);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            PlasmaExitConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            PlasmaExitConfig::from_json(r#"{"block_max_cycles": 0}"#),
            Err(ConfigError::Zero("block_max_cycles"))
        ));
    }
}
