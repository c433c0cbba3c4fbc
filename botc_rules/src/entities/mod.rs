//! Entity definitions: teams, role categories, and the role catalog.

mod role;

pub use role::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Anything that can identify a seated player: a name, a seat index, etc.
///
/// Blanket-implemented for every type with the right shape, so `usize`,
/// `String`, and `&'static str` all work as player keys.
pub trait PlayerKey: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync {}

impl<T> PlayerKey for T where T: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync {}

/// Team alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Good,
    Evil,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Good => write!(f, "good"),
            Team::Evil => write!(f, "evil"),
        }
    }
}

/// Character type of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    Townsfolk,
    /// Not present in the default catalog.
    Outsider,
    Minion,
    Demon,
}

impl RoleCategory {
    /// The team every role of this category belongs to.
    pub fn team(&self) -> Team {
        match self {
            RoleCategory::Townsfolk | RoleCategory::Outsider => Team::Good,
            RoleCategory::Minion | RoleCategory::Demon => Team::Evil,
        }
    }
}

/// Expected number of minions for a table of the given size.
///
/// Only the single-minion regime is modelled by the reasoning engine; larger
/// tables are reported but not supported.
pub fn expected_minion_count(player_count: usize) -> usize {
    if player_count <= 9 {
        1
    } else {
        2
    }
}
