//! Belief-state summaries for reporting layers.

use botc_rules::{PlayerKey, Role, RulesResult, World};
use serde::Serialize;

use super::{calculate_alignment_probabilities, calculate_role_probabilities, find_proven_facts};

/// How much a belief state pins down the hidden assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BeliefStatus {
    /// No world survives: the applied evidence is inconsistent.
    Contradiction,
    /// Exactly one world survives.
    Determined,
    /// Several worlds survive.
    Uncertain { worlds: usize },
}

impl BeliefStatus {
    pub fn from_count(worlds: usize) -> Self {
        match worlds {
            0 => BeliefStatus::Contradiction,
            1 => BeliefStatus::Determined,
            n => BeliefStatus::Uncertain { worlds: n },
        }
    }

    pub fn is_contradiction(&self) -> bool {
        matches!(self, BeliefStatus::Contradiction)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleOdds {
    pub role: Role,
    pub probability: f64,
}

/// Everything known about one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerBelief<P> {
    pub player: P,
    pub proven_role: Option<Role>,
    /// Most likely first; ties in catalog order.
    pub roles: Vec<RoleOdds>,
    pub good: f64,
    pub evil: f64,
}

/// Snapshot of a belief state, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeliefSummary<P> {
    pub world_count: usize,
    pub status: BeliefStatus,
    pub proven: Vec<(P, Role)>,
    /// Per player, in seating order. Empty on contradiction.
    pub players: Vec<PlayerBelief<P>>,
}

impl<P: PlayerKey> BeliefSummary<P> {
    pub fn from_worlds(worlds: &[World<P>]) -> RulesResult<Self> {
        let proven = find_proven_facts(worlds)?;
        let seating = worlds.first().map(|w| w.players()).unwrap_or_default();

        let mut players = Vec::with_capacity(seating.len());
        for player in seating {
            let mut roles: Vec<RoleOdds> = calculate_role_probabilities(worlds, player)?
                .into_iter()
                .map(|(role, probability)| RoleOdds { role, probability })
                .collect();
            roles.sort_by(|a, b| {
                b.probability
                    .total_cmp(&a.probability)
                    .then_with(|| a.role.cmp(&b.role))
            });
            let (good, evil) = calculate_alignment_probabilities(worlds, player)?;
            let proven_role = proven.iter().find(|(p, _)| p == player).map(|(_, r)| *r);

            players.push(PlayerBelief {
                player: player.clone(),
                proven_role,
                roles,
                good,
                evil,
            });
        }

        Ok(Self {
            world_count: worlds.len(),
            status: BeliefStatus::from_count(worlds.len()),
            proven,
            players,
        })
    }

    pub fn player(&self, player: &P) -> Option<&PlayerBelief<P>> {
        self.players.iter().find(|b| &b.player == player)
    }
}

impl<P: PlayerKey + Serialize> BeliefSummary<P> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
