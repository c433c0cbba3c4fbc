//! Table setup configuration, loaded from TOML.
//!
//! ```
//! use botc_rules::{Role, SetupConfig};
//!
//! let config = SetupConfig::from_toml_str(r#"
//!     players = ["Alice", "Bob", "Charlie", "Diana", "Eve"]
//! "#).unwrap();
//!
//! assert_eq!(config.players.len(), 5);
//! assert_eq!(config.good_roles(), vec![Role::Washerwoman, Role::Investigator, Role::Empath]);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::entities::{default_good_roles, Role};

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Seating and role pool for one table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct SetupConfig {
    /// Player names in seating order.
    pub players: Vec<String>,

    /// Good roles to distribute over the non-evil seats. Defaults to the
    /// information roles padded with generic Townsfolk.
    #[serde(default)]
    pub good_roles: Option<Vec<Role>>,

    /// Enumerate worlds on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

impl SetupConfig {
    pub fn new(players: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            players: players.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Loads and validates configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Good-role list the generator should use for this table.
    pub fn good_roles(&self) -> Vec<Role> {
        self.good_roles
            .clone()
            .unwrap_or_else(|| default_good_roles(self.players.len()))
    }

    /// Check the table can seat a demon, a minion, and an empath's neighbors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() < 3 {
            return Err(ConfigError::Invalid(format!(
                "need at least 3 players, found {}",
                self.players.len()
            )));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.players.iter().find(|p| !seen.insert(p.as_str())) {
            return Err(ConfigError::Invalid(format!("duplicate player '{dup}'")));
        }

        if let Some(roles) = &self.good_roles {
            let good_seats = self.players.len() - 2;
            if roles.len() != good_seats {
                return Err(ConfigError::Invalid(format!(
                    "{} good roles for {} good seats",
                    roles.len(),
                    good_seats
                )));
            }
            if let Some(evil) = roles.iter().find(|r| r.is_evil()) {
                return Err(ConfigError::Invalid(format!("{evil} is not a good role")));
            }
        }
        Ok(())
    }
}
