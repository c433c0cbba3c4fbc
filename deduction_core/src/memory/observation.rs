//! Observations - raw information records an agent receives.

use botc_rules::{AbilityInfo, PlayerKey, Role};
use serde::Serialize;
use std::fmt;

use crate::constraints::Constraint;

/// A piece of information, before it is turned into a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation<P> {
    /// A player knows their own role.
    SelfRole { player: P, role: Role },

    Washerwoman { players: (P, P), role: Role },

    Investigator { players: (P, P), role: Role },

    Empath { player: P, evil_count: usize },

    /// The Scarlet Woman learns who the demon is.
    ScarletWoman { minion: P, demon: P },
}

/// Category of an observation, for filtering a history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    SelfRole,
    Washerwoman,
    Investigator,
    Empath,
    ScarletWoman,
}

impl ObservationKind {
    /// Whether observations of this kind come from a role's ability.
    pub fn is_ability(self) -> bool {
        !matches!(self, ObservationKind::SelfRole)
    }
}

/// Who provided an observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationSource<P> {
    /// The memory's owner, through their own role or ability.
    Own,
    /// Another player.
    Player(P),
}

/// An observation with the context it was received in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationRecord<P> {
    pub observation: Observation<P>,
    pub source: ObservationSource<P>,
    /// Night the information arrived on; 0 is setup.
    pub night: u32,
}

impl<P: PlayerKey> ObservationRecord<P> {
    pub fn kind(&self) -> ObservationKind {
        self.observation.kind()
    }
}

impl<P: PlayerKey> Observation<P> {
    pub fn kind(&self) -> ObservationKind {
        match self {
            Observation::SelfRole { .. } => ObservationKind::SelfRole,
            Observation::Washerwoman { .. } => ObservationKind::Washerwoman,
            Observation::Investigator { .. } => ObservationKind::Investigator,
            Observation::Empath { .. } => ObservationKind::Empath,
            Observation::ScarletWoman { .. } => ObservationKind::ScarletWoman,
        }
    }

    /// Translate ability information received by `holder`.
    ///
    /// Imp information names minions without their roles and has no
    /// corresponding constraint.
    pub fn from_ability(holder: &P, info: &AbilityInfo<P>) -> Option<Self> {
        match info {
            AbilityInfo::Washerwoman { players, role } => Some(Observation::Washerwoman {
                players: players.clone(),
                role: *role,
            }),
            AbilityInfo::Investigator { players, role } => Some(Observation::Investigator {
                players: players.clone(),
                role: *role,
            }),
            AbilityInfo::Empath { evil_count, .. } => Some(Observation::Empath {
                player: holder.clone(),
                evil_count: *evil_count,
            }),
            AbilityInfo::ScarletWoman { demon, .. } => Some(Observation::ScarletWoman {
                minion: holder.clone(),
                demon: demon.clone(),
            }),
            AbilityInfo::Imp { .. } => None,
        }
    }

    /// The constraint this observation imposes on the belief state.
    pub fn to_constraint(&self) -> Constraint<P> {
        match self {
            Observation::SelfRole { player, role } => Constraint::exact_role(player.clone(), *role),
            Observation::Washerwoman {
                players: (first, second),
                role,
            } => Constraint::washerwoman(first.clone(), second.clone(), *role),
            Observation::Investigator {
                players: (first, second),
                role,
            } => Constraint::investigator(first.clone(), second.clone(), *role),
            Observation::Empath { player, evil_count } => {
                Constraint::empath(player.clone(), *evil_count)
            }
            Observation::ScarletWoman { minion, demon } => {
                Constraint::scarlet_woman(minion.clone(), demon.clone())
            }
        }
    }
}

impl<P: PlayerKey> fmt::Display for Observation<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observation::SelfRole { player, role } => write!(f, "Self ({player}): I am {role}"),
            Observation::Washerwoman {
                players: (a, b),
                role,
            } => write!(f, "Washerwoman: one of {a}, {b} is {role}"),
            Observation::Investigator {
                players: (a, b),
                role,
            } => write!(f, "Investigator: one of {a}, {b} is {role}"),
            Observation::Empath { player, evil_count } => {
                write!(f, "Empath ({player}): {evil_count} evil neighbor(s)")
            }
            Observation::ScarletWoman { minion, demon } => {
                write!(f, "Scarlet Woman ({minion}): the demon is {demon}")
            }
        }
    }
}
