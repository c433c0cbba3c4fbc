//! First-night ability information computed from a ground-truth world.
//!
//! These produce what a truthful storyteller would hand each role. They never
//! feed into reasoning directly; a scenario driver turns them into
//! observations.

use serde::Serialize;
use tracing::{info, warn};

use crate::entities::{PlayerKey, Role, RoleCategory};
use crate::error::{RulesError, RulesResult};
use crate::world_state::World;

/// Structured information a role learns on the first night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "ability", rename_all = "snake_case")]
pub enum AbilityInfo<P> {
    /// One of the two players is the named townsfolk.
    Washerwoman { players: (P, P), role: Role },

    /// One of the two players is the named minion.
    Investigator { players: (P, P), role: Role },

    /// How many of the two neighbors are evil.
    Empath { neighbors: (P, P), evil_count: usize },

    /// Who the demon is, and the rest of the evil team.
    ScarletWoman { demon: P, evil_team: Vec<P> },

    /// The minions on the evil team.
    Imp { minions: Vec<P> },
}

impl<P> AbilityInfo<P> {
    /// Role that receives this information.
    pub fn role(&self) -> Role {
        match self {
            AbilityInfo::Washerwoman { .. } => Role::Washerwoman,
            AbilityInfo::Investigator { .. } => Role::Investigator,
            AbilityInfo::Empath { .. } => Role::Empath,
            AbilityInfo::ScarletWoman { .. } => Role::ScarletWoman,
            AbilityInfo::Imp { .. } => Role::Imp,
        }
    }
}

fn require_role<P: PlayerKey>(world: &World<P>, player: &P, expected: Role) -> RulesResult<()> {
    let actual = world.get_role(player)?;
    if actual != expected {
        return Err(RulesError::RoleMismatch {
            player: player.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate a two-player sighting: `target` must fit `category`, and neither
/// pick may be the acting player or each other.
fn sighting<P: PlayerKey>(
    world: &World<P>,
    ability: Role,
    player: &P,
    target: &P,
    other: &P,
    category: RoleCategory,
) -> RulesResult<((P, P), Role)> {
    require_role(world, player, ability)?;

    let target_role = world.get_role(target)?;
    world.get_role(other)?;

    if target == player || target_role.category() != category {
        return Err(RulesError::NoCandidate {
            ability,
            reason: format!("{target} cannot be shown as a {category:?}"),
        });
    }
    if other == player || other == target {
        return Err(RulesError::NoCandidate {
            ability,
            reason: format!("{other} cannot be the second player shown"),
        });
    }

    info!(%player, %target, %other, role = %target_role, "{ability} sighting");
    Ok(((target.clone(), other.clone()), target_role))
}

/// Washerwoman: one of `target` and `other` is a particular townsfolk.
pub fn washerwoman_info<P: PlayerKey>(
    world: &World<P>,
    player: &P,
    target: &P,
    other: &P,
) -> RulesResult<AbilityInfo<P>> {
    let (players, role) = sighting(
        world,
        Role::Washerwoman,
        player,
        target,
        other,
        RoleCategory::Townsfolk,
    )?;
    Ok(AbilityInfo::Washerwoman { players, role })
}

/// Investigator: one of `target` and `other` is a particular minion.
pub fn investigator_info<P: PlayerKey>(
    world: &World<P>,
    player: &P,
    target: &P,
    other: &P,
) -> RulesResult<AbilityInfo<P>> {
    let (players, role) = sighting(
        world,
        Role::Investigator,
        player,
        target,
        other,
        RoleCategory::Minion,
    )?;
    Ok(AbilityInfo::Investigator { players, role })
}

/// Empath: count of evil neighbors.
pub fn empath_info<P: PlayerKey>(world: &World<P>, player: &P) -> RulesResult<AbilityInfo<P>> {
    require_role(world, player, Role::Empath)?;

    let (left, right) = world.get_neighbors(player)?;
    let evil_count = world.evil_neighbor_count(player)?;
    info!(%player, evil_count, "empath reading");

    Ok(AbilityInfo::Empath {
        neighbors: (left.clone(), right.clone()),
        evil_count,
    })
}

/// Scarlet Woman: learns the demon and the other evil players.
pub fn scarlet_woman_info<P: PlayerKey>(
    world: &World<P>,
    player: &P,
) -> RulesResult<AbilityInfo<P>> {
    require_role(world, player, Role::ScarletWoman)?;

    let demon = world.demon().cloned().ok_or_else(|| RulesError::NoCandidate {
        ability: Role::ScarletWoman,
        reason: "world has no demon".into(),
    })?;
    let evil_team: Vec<P> = world
        .evil_players()
        .into_iter()
        .filter(|p| *p != player)
        .cloned()
        .collect();
    info!(%player, %demon, "scarlet woman learns the demon");

    Ok(AbilityInfo::ScarletWoman { demon, evil_team })
}

/// Imp: learns its minions.
pub fn imp_info<P: PlayerKey>(world: &World<P>, player: &P) -> RulesResult<AbilityInfo<P>> {
    require_role(world, player, Role::Imp)?;

    let minions: Vec<P> = world
        .evil_players()
        .into_iter()
        .filter(|p| *p != player)
        .cloned()
        .collect();
    if minions.is_empty() {
        warn!(%player, "imp has no minions");
    }

    Ok(AbilityInfo::Imp { minions })
}
