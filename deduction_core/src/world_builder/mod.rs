//! World generation - enumerate every structurally legal assignment.
//!
//! A table of N players yields one world per (demon seat, minion seat,
//! good-role ordering) triple: `N × (N−1) × (N−2)!` worlds when every good
//! seat gets one entry of the good-role list.

mod permutations;

pub use permutations::*;

use botc_rules::{
    default_good_roles, PlayerKey, Role, RulesError, RulesResult, Seating, SetupConfig, World,
};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Enumerates all possible worlds for a fixed seating.
#[derive(Debug, Clone)]
pub struct WorldGenerator<P> {
    seating: Arc<Seating<P>>,
    good_roles: Option<Vec<Role>>,
    parallel: bool,
}

impl<P: PlayerKey> WorldGenerator<P> {
    /// Create a generator over players in seating order.
    ///
    /// Fails if a player appears twice.
    pub fn new(players: impl IntoIterator<Item = P>) -> RulesResult<Self> {
        let seating = Arc::new(Seating::new(players.into_iter().collect())?);
        info!(players = seating.len(), "initialized world generator");
        Ok(Self {
            seating,
            good_roles: None,
            parallel: false,
        })
    }

    /// Good-role list used when `generate_all_worlds` is given none.
    pub fn with_good_roles(mut self, roles: Vec<Role>) -> Self {
        self.good_roles = Some(roles);
        self
    }

    /// Spread enumeration over the rayon pool. Output order is unchanged.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn players(&self) -> &[P] {
        self.seating.players()
    }

    pub fn player_count(&self) -> usize {
        self.seating.len()
    }

    /// Seats left once the demon and the minion are placed.
    pub fn good_seats(&self) -> usize {
        self.player_count().saturating_sub(2)
    }

    /// Generate every world, using `good_roles` for the good seats. Without
    /// one, the generator's configured list is used, then the default list.
    ///
    /// The good-role list is positional: repeated roles are permuted as
    /// distinct entries, so identical assignments may appear more than once.
    /// Candidates that fail world validation are skipped.
    pub fn generate_all_worlds(&self, good_roles: Option<&[Role]>) -> RulesResult<Vec<World<P>>> {
        let n = self.player_count();
        let good_roles = match good_roles.or(self.good_roles.as_deref()) {
            Some(roles) => roles.to_vec(),
            None => default_good_roles(n),
        };
        if good_roles.len() != self.good_seats() {
            return Err(RulesError::ConfigurationMismatch {
                good_seats: self.good_seats(),
                supplied: good_roles.len(),
            });
        }
        if n < 5 {
            warn!(players = n, "generating worlds for fewer than 5 players");
        }

        info!(
            players = n,
            expected = ?self.count_worlds(),
            parallel = self.parallel,
            "starting world generation"
        );

        let orderings = permutations(&good_roles);
        let worlds: Vec<World<P>> = if self.parallel {
            (0..n)
                .into_par_iter()
                .flat_map_iter(|demon| self.worlds_with_demon(demon, &orderings))
                .collect()
        } else {
            (0..n)
                .flat_map(|demon| self.worlds_with_demon(demon, &orderings))
                .collect()
        };

        info!(worlds = worlds.len(), "generated worlds");
        Ok(worlds)
    }

    fn worlds_with_demon(&self, demon: usize, orderings: &[Vec<Role>]) -> Vec<World<P>> {
        let n = self.player_count();
        let mut worlds = Vec::with_capacity(n.saturating_sub(1) * orderings.len());

        for minion in (0..n).filter(|&seat| seat != demon) {
            let (low, high) = if demon < minion {
                ((demon, Role::Imp), (minion, Role::ScarletWoman))
            } else {
                ((minion, Role::ScarletWoman), (demon, Role::Imp))
            };

            for ordering in orderings {
                let mut roles = Vec::with_capacity(n);
                roles.extend_from_slice(ordering);
                roles.insert(low.0, low.1);
                roles.insert(high.0, high.1);

                match World::from_seating(Arc::clone(&self.seating), roles) {
                    Ok(world) => worlds.push(world),
                    Err(e) => {
                        debug!(demon, minion, error = %e, "skipping invalid candidate");
                        continue;
                    }
                }
            }
        }
        worlds
    }

    /// Number of worlds `generate_all_worlds` produces, without enumerating.
    pub fn count_worlds(&self) -> Option<u128> {
        count_worlds(self.player_count())
    }
}

impl WorldGenerator<String> {
    /// Create a generator for a configured table, carrying its good-role
    /// override and parallel flag.
    ///
    /// The config is not validated here; load it with [`SetupConfig::load`]
    /// for that.
    pub fn from_config(config: &SetupConfig) -> RulesResult<Self> {
        let generator = Self::new(config.players.iter().cloned())?.parallel(config.parallel);
        Ok(match &config.good_roles {
            Some(roles) => generator.with_good_roles(roles.clone()),
            None => generator,
        })
    }
}

/// `n × (n−1) × (n−2)!`, or zero when there is no room for both evil roles.
///
/// `None` when the count does not fit in a `u128` (35 players or more).
pub fn count_worlds(player_count: usize) -> Option<u128> {
    if player_count < 2 {
        return Some(0);
    }
    let n = player_count as u128;
    let total = (1..=n - 2)
        .try_fold(1u128, |acc, k| acc.checked_mul(k))
        .and_then(|good_orderings| good_orderings.checked_mul(n * (n - 1)));
    match total {
        Some(total) => debug!(players = player_count, total = %total, "world count"),
        None => warn!(players = player_count, "world count overflows u128"),
    }
    total
}

/// Generate all worlds for a player list.
pub fn generate_worlds<P: PlayerKey>(
    players: impl IntoIterator<Item = P>,
    good_roles: Option<&[Role]>,
) -> RulesResult<Vec<World<P>>> {
    WorldGenerator::new(players)?.generate_all_worlds(good_roles)
}

/// Keep the worlds matching `predicate`, as a new collection.
pub fn filter_worlds<P, F>(worlds: &[World<P>], predicate: F) -> Vec<World<P>>
where
    P: PlayerKey,
    F: Fn(&World<P>) -> bool,
{
    let filtered: Vec<World<P>> = worlds.iter().filter(|w| predicate(*w)).cloned().collect();
    debug!(
        before = worlds.len(),
        after = filtered.len(),
        removed = worlds.len() - filtered.len(),
        "filtered worlds"
    );
    filtered
}
