//! Error types for the botc_rules crate.
//!
//! Structural failures at world construction, lookups of absent players, and
//! caller contract violations all surface as [`RulesError`]. An empty belief
//! state is not an error and has no variant here.

use crate::entities::Role;

/// Why a candidate assignment was rejected as a world.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidWorldReason {
    /// No players were assigned.
    #[error("world must have at least one player")]
    Empty,

    /// Demon count other than exactly one.
    #[error("world must have exactly 1 demon, found {0}")]
    DemonCount(usize),

    /// The same player appeared twice in the assignment.
    #[error("player '{0}' is assigned more than once")]
    DuplicatePlayer(String),

    /// Role list length differs from the number of seats.
    #[error("{roles} roles supplied for {seats} seats")]
    SeatCount { seats: usize, roles: usize },
}

/// Errors raised by world construction, lookups, and ability generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// Structural validation failed at world construction.
    #[error("invalid world: {0}")]
    InvalidWorld(InvalidWorldReason),

    /// Lookup of a player absent from the world.
    #[error("player '{0}' not in world")]
    PlayerNotFound(String),

    /// Neighbor lookup on a table too small to have two distinct neighbors.
    #[error("need at least 3 players to determine neighbors, found {player_count}")]
    NeighborUndefined {
        /// Number of seated players.
        player_count: usize,
    },

    /// Good-role list length does not match the good seats left after the
    /// demon and minion are placed.
    #[error("configuration mismatch: {good_seats} good seats but {supplied} good roles supplied")]
    ConfigurationMismatch {
        /// Seats left for good roles.
        good_seats: usize,
        /// Length of the supplied good-role list.
        supplied: usize,
    },

    /// An ability was generated for a player who does not hold that role.
    #[error("player '{player}' is {actual}, not {expected}")]
    RoleMismatch {
        player: String,
        expected: Role,
        actual: Role,
    },

    /// No legal player exists for an ability's choice.
    #[error("{ability} has no legal choice: {reason}")]
    NoCandidate { ability: Role, reason: String },
}

impl From<InvalidWorldReason> for RulesError {
    fn from(reason: InvalidWorldReason) -> Self {
        RulesError::InvalidWorld(reason)
    }
}

/// Result alias used throughout the rules crate.
pub type RulesResult<T> = Result<T, RulesError>;
