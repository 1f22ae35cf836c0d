//! Engine configuration.
//!
//! Amounts are configured in milli-tokens (1/1000 of a token) so the
//! values stay within TOML's integer range; accessors convert to base
//! units. The defaults reproduce the original deployment: minimum deposit
//! 0.1 token, round size 10 tokens, pool capacity 1000 tokens (exactly
//! 100 default-sized rounds).

use serde::{Deserialize, Serialize};

use croft_types::{Amount, MILLI_TOKEN};

use crate::{EngineError, Result};

/// Farm engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmConfig {
    /// Minimum accepted deposit, in milli-tokens.
    #[serde(default = "default_min_deposit")]
    pub min_deposit_millitokens: u64,
    /// Reward distributed per round, in milli-tokens.
    #[serde(default = "default_round_size")]
    pub round_size_millitokens: u64,
    /// Total reward budget across all rounds, in milli-tokens.
    #[serde(default = "default_pool_capacity")]
    pub pool_capacity_millitokens: u64,
}

// Default value functions

fn default_min_deposit() -> u64 {
    100
}

fn default_round_size() -> u64 {
    10_000
}

fn default_pool_capacity() -> u64 {
    1_000_000
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            min_deposit_millitokens: default_min_deposit(),
            round_size_millitokens: default_round_size(),
            pool_capacity_millitokens: default_pool_capacity(),
        }
    }
}

impl FarmConfig {
    /// Parse a TOML configuration. Missing fields fall back to defaults.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfig`] if the TOML is malformed or the
    ///   parsed configuration fails [`validate`](FarmConfig::validate)
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: FarmConfig =
            toml::from_str(content).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot operate under.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfig`] if any amount is zero
    pub fn validate(&self) -> Result<()> {
        if self.min_deposit_millitokens == 0 {
            return Err(EngineError::InvalidConfig(
                "minimum deposit must be positive".to_string(),
            ));
        }
        if self.round_size_millitokens == 0 {
            return Err(EngineError::InvalidConfig(
                "round size must be positive".to_string(),
            ));
        }
        if self.pool_capacity_millitokens == 0 {
            return Err(EngineError::InvalidConfig(
                "pool capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Minimum accepted deposit in base units.
    pub fn min_deposit(&self) -> Amount {
        Amount::from(self.min_deposit_millitokens) * MILLI_TOKEN
    }

    /// Reward distributed per round in base units.
    pub fn round_size(&self) -> Amount {
        Amount::from(self.round_size_millitokens) * MILLI_TOKEN
    }

    /// Total reward budget in base units.
    pub fn pool_capacity(&self) -> Amount {
        Amount::from(self.pool_capacity_millitokens) * MILLI_TOKEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croft_types::ONE_TOKEN;

    #[test]
    fn test_default_config() {
        let config = FarmConfig::default();
        assert_eq!(config.min_deposit(), ONE_TOKEN / 10);
        assert_eq!(config.round_size(), 10 * ONE_TOKEN);
        assert_eq!(config.pool_capacity(), 1000 * ONE_TOKEN);
        config.validate().expect("defaults must validate");
    }

    #[test]
    fn test_defaults_give_exactly_one_hundred_rounds() {
        let config = FarmConfig::default();
        assert_eq!(config.pool_capacity() / config.round_size(), 100);
        assert_eq!(config.pool_capacity() % config.round_size(), 0);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = FarmConfig::default();
        let toml_str = toml::to_string(&config).expect("serialize");
        let parsed = FarmConfig::from_toml(&toml_str).expect("parse");
        assert_eq!(parsed.min_deposit_millitokens, config.min_deposit_millitokens);
        assert_eq!(parsed.round_size_millitokens, config.round_size_millitokens);
        assert_eq!(
            parsed.pool_capacity_millitokens,
            config.pool_capacity_millitokens
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = FarmConfig::from_toml("round_size_millitokens = 5000").expect("parse");
        assert_eq!(parsed.round_size_millitokens, 5_000);
        assert_eq!(parsed.min_deposit_millitokens, 100);
        assert_eq!(parsed.pool_capacity_millitokens, 1_000_000);
    }

    #[test]
    fn test_zero_round_size_rejected() {
        let result = FarmConfig::from_toml("round_size_millitokens = 0");
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_min_deposit_rejected() {
        let config = FarmConfig {
            min_deposit_millitokens: 0,
            ..FarmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(FarmConfig::from_toml("round_size_millitokens = \"ten\"").is_err());
    }
}
