//! Deduction engine - certainties and frequencies over a belief state.
//!
//! All functions are read-only over the worlds they are given. An empty
//! belief state is a contradiction, which every function answers with an
//! empty or negative result rather than an error. Lookup failures for absent
//! players are propagated.

mod summary;

pub use summary::*;

use botc_rules::{PlayerKey, Role, RulesResult, Team, World};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// The role every world assigns to `player`, if they all agree.
pub fn prove_role<P: PlayerKey>(worlds: &[World<P>], player: &P) -> RulesResult<Option<Role>> {
    let Some((first, rest)) = worlds.split_first() else {
        debug!(%player, "cannot prove role: no worlds");
        return Ok(None);
    };

    let role = first.get_role(player)?;
    for world in rest {
        let other = world.get_role(player)?;
        if other != role {
            debug!(%player, "role uncertain");
            return Ok(None);
        }
    }

    debug!(%player, %role, "role proven");
    Ok(Some(role))
}

fn is_proven_team<P: PlayerKey>(worlds: &[World<P>], player: &P, team: Team) -> RulesResult<bool> {
    if worlds.is_empty() {
        return Ok(false);
    }
    for world in worlds {
        if world.get_role(player)?.team() != team {
            return Ok(false);
        }
    }
    debug!(%player, %team, "team proven");
    Ok(true)
}

/// Whether `player` is evil in every world. False for an empty belief state.
pub fn is_proven_evil<P: PlayerKey>(worlds: &[World<P>], player: &P) -> RulesResult<bool> {
    is_proven_team(worlds, player, Team::Evil)
}

/// Whether `player` is good in every world, whatever their exact role.
/// False for an empty belief state.
pub fn is_proven_good<P: PlayerKey>(worlds: &[World<P>], player: &P) -> RulesResult<bool> {
    is_proven_team(worlds, player, Team::Good)
}

/// Fraction of worlds in which `player` holds each role they are seen with.
///
/// Sums to 1.0 for a non-empty belief state; empty for an empty one.
pub fn calculate_role_probabilities<P: PlayerKey>(
    worlds: &[World<P>],
    player: &P,
) -> RulesResult<HashMap<Role, f64>> {
    if worlds.is_empty() {
        return Ok(HashMap::new());
    }

    let mut counts: HashMap<Role, usize> = HashMap::new();
    for world in worlds {
        *counts.entry(world.get_role(player)?).or_default() += 1;
    }

    let total = worlds.len() as f64;
    Ok(counts
        .into_iter()
        .map(|(role, count)| (role, count as f64 / total))
        .collect())
}

/// `(good, evil)` probabilities for `player`; `(0.0, 0.0)` when empty.
pub fn calculate_alignment_probabilities<P: PlayerKey>(
    worlds: &[World<P>],
    player: &P,
) -> RulesResult<(f64, f64)> {
    if worlds.is_empty() {
        return Ok((0.0, 0.0));
    }

    let mut evil = 0usize;
    for world in worlds {
        if world.is_evil(player)? {
            evil += 1;
        }
    }

    let total = worlds.len() as f64;
    let good = worlds.len() - evil;
    Ok((good as f64 / total, evil as f64 / total))
}

/// Every player whose role is proven, in seating order of the first world.
pub fn find_proven_facts<P: PlayerKey>(worlds: &[World<P>]) -> RulesResult<Vec<(P, Role)>> {
    let Some(first) = worlds.first() else {
        return Ok(Vec::new());
    };

    let mut proven = Vec::new();
    for player in first.players() {
        if let Some(role) = prove_role(worlds, player)? {
            proven.push((player.clone(), role));
        }
    }

    info!(
        proven = proven.len(),
        players = first.player_count(),
        "found proven facts"
    );
    Ok(proven)
}

/// Distinct roles `player` holds across the belief state.
pub fn get_possible_roles<P: PlayerKey>(
    worlds: &[World<P>],
    player: &P,
) -> RulesResult<HashSet<Role>> {
    worlds.iter().map(|world| world.get_role(player)).collect()
}

/// Number of worlds satisfying an arbitrary predicate.
pub fn count_worlds_where<P, F>(worlds: &[World<P>], predicate: F) -> usize
where
    P: PlayerKey,
    F: Fn(&World<P>) -> bool,
{
    let count = worlds.iter().filter(|world| predicate(*world)).count();
    debug!(matched = count, worlds = worlds.len(), "counted worlds");
    count
}
