//! Worlds - complete, immutable hypotheses about who holds which role.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::entities::{expected_minion_count, PlayerKey, Role, Team};
use crate::error::{InvalidWorldReason, RulesError, RulesResult};

/// The fixed circular seating order shared by every world over the same table.
///
/// Worlds produced by the generator share one `Seating` through an `Arc`, so a
/// belief state of thousands of worlds stores each player key once.
#[derive(Debug)]
pub struct Seating<P> {
    players: Vec<P>,
    index: HashMap<P, usize>,
}

impl<P: PlayerKey> Seating<P> {
    /// Create a seating from an ordered player list. Rejects duplicates.
    pub fn new(players: Vec<P>) -> RulesResult<Self> {
        let mut index = HashMap::with_capacity(players.len());
        for (seat, player) in players.iter().enumerate() {
            if index.insert(player.clone(), seat).is_some() {
                return Err(InvalidWorldReason::DuplicatePlayer(player.to_string()).into());
            }
        }
        Ok(Self { players, index })
    }

    pub fn players(&self) -> &[P] {
        &self.players
    }

    /// Seat index of a player.
    pub fn position(&self, player: &P) -> Option<usize> {
        self.index.get(player).copied()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Whether structural validation runs when a world is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    #[default]
    Enforce,
    /// Build deliberately invalid fixtures (e.g. no demon). Empty and
    /// duplicate-player assignments are still rejected.
    Skip,
}

/// One complete assignment of roles to players.
///
/// Immutable once built: there are no mutable accessors, and cloning only
/// bumps the shared seating's reference count.
#[derive(Debug, Clone)]
pub struct World<P> {
    seating: Arc<Seating<P>>,
    roles: Box<[Role]>,
}

impl<P: PlayerKey> World<P> {
    /// Build and validate a world from `(player, role)` pairs. The pair order
    /// becomes the seating order.
    pub fn new(assignments: impl IntoIterator<Item = (P, Role)>) -> RulesResult<Self> {
        Self::with_validation(assignments, Validation::Enforce)
    }

    /// Build a world without game-rule validation.
    pub fn new_unchecked(assignments: impl IntoIterator<Item = (P, Role)>) -> RulesResult<Self> {
        Self::with_validation(assignments, Validation::Skip)
    }

    pub fn with_validation(
        assignments: impl IntoIterator<Item = (P, Role)>,
        validation: Validation,
    ) -> RulesResult<Self> {
        let (players, roles): (Vec<P>, Vec<Role>) = assignments.into_iter().unzip();
        let seating = Arc::new(Seating::new(players)?);
        Self::build(seating, roles, validation)
    }

    /// Build a validated world over an existing seating.
    pub fn from_seating(seating: Arc<Seating<P>>, roles: Vec<Role>) -> RulesResult<Self> {
        Self::build(seating, roles, Validation::Enforce)
    }

    fn build(
        seating: Arc<Seating<P>>,
        roles: Vec<Role>,
        validation: Validation,
    ) -> RulesResult<Self> {
        if seating.is_empty() {
            return Err(InvalidWorldReason::Empty.into());
        }
        if roles.len() != seating.len() {
            return Err(InvalidWorldReason::SeatCount {
                seats: seating.len(),
                roles: roles.len(),
            }
            .into());
        }

        let world = Self {
            seating,
            roles: roles.into_boxed_slice(),
        };
        if validation == Validation::Enforce {
            world.validate()?;
        }
        Ok(world)
    }

    fn validate(&self) -> RulesResult<()> {
        let demons = self.roles.iter().filter(|r| r.is_demon()).count();
        if demons != 1 {
            return Err(InvalidWorldReason::DemonCount(demons).into());
        }

        // Minion deviation is tolerated: reported, never rejected.
        let minions = self.roles.iter().filter(|r| r.is_minion()).count();
        let expected = expected_minion_count(self.player_count());
        if minions != expected {
            warn!(
                minions,
                expected,
                players = self.player_count(),
                "unusual minion count"
            );
        }
        Ok(())
    }

    pub fn seating(&self) -> &Arc<Seating<P>> {
        &self.seating
    }

    /// Players in seating order.
    pub fn players(&self) -> &[P] {
        self.seating.players()
    }

    /// Roles in seating order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn player_count(&self) -> usize {
        self.roles.len()
    }

    /// Whether both worlds seat the same players in the same order, so
    /// neighbor queries agree between them.
    pub fn same_seating(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.seating, &other.seating) || self.players() == other.players()
    }

    pub fn contains(&self, player: &P) -> bool {
        self.seating.position(player).is_some()
    }

    /// Iterate `(player, role)` pairs in seating order.
    pub fn iter(&self) -> impl Iterator<Item = (&P, Role)> + '_ {
        self.players().iter().zip(self.roles.iter().copied())
    }

    /// Role held by a player.
    pub fn get_role(&self, player: &P) -> RulesResult<Role> {
        self.seating
            .position(player)
            .map(|seat| self.roles[seat])
            .ok_or_else(|| RulesError::PlayerNotFound(player.to_string()))
    }

    pub fn is_evil(&self, player: &P) -> RulesResult<bool> {
        Ok(self.get_role(player)?.is_evil())
    }

    pub fn is_good(&self, player: &P) -> RulesResult<bool> {
        Ok(self.get_role(player)?.is_good())
    }

    /// All players holding a role, in seating order.
    pub fn players_with_role(&self, role: Role) -> Vec<&P> {
        self.iter().filter(|(_, r)| *r == role).map(|(p, _)| p).collect()
    }

    /// All players on a team, in seating order.
    pub fn players_on_team(&self, team: Team) -> Vec<&P> {
        self.iter()
            .filter(|(_, r)| r.team() == team)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn evil_players(&self) -> Vec<&P> {
        self.players_on_team(Team::Evil)
    }

    pub fn good_players(&self) -> Vec<&P> {
        self.players_on_team(Team::Good)
    }

    /// The demon, if the world has one (unchecked fixtures may not).
    pub fn demon(&self) -> Option<&P> {
        self.iter().find(|(_, r)| r.is_demon()).map(|(p, _)| p)
    }

    /// Left and right neighbors under circular seating.
    pub fn get_neighbors(&self, player: &P) -> RulesResult<(&P, &P)> {
        let seat = self
            .seating
            .position(player)
            .ok_or_else(|| RulesError::PlayerNotFound(player.to_string()))?;
        let n = self.player_count();
        if n < 3 {
            return Err(RulesError::NeighborUndefined { player_count: n });
        }

        let players = self.players();
        let left = &players[(seat + n - 1) % n];
        let right = &players[(seat + 1) % n];
        debug!(%player, %left, %right, "resolved neighbors");
        Ok((left, right))
    }

    /// Number of a player's two neighbors on the evil team.
    pub fn evil_neighbor_count(&self, player: &P) -> RulesResult<usize> {
        let (left, right) = self.get_neighbors(player)?;
        let mut count = 0;
        for neighbor in [left, right] {
            if self.is_evil(neighbor)? {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Factory for a validated world.
pub fn create_world<P: PlayerKey>(
    assignments: impl IntoIterator<Item = (P, Role)>,
) -> RulesResult<World<P>> {
    let world = World::new(assignments)?;
    debug!(players = world.player_count(), "created world");
    Ok(world)
}

// Worlds compare as assignment sets, independent of seating order. Neighbor
// queries do depend on seating, so two equal worlds seated differently can
// disagree on an evil-neighbor count; use `World::same_seating` when that
// matters.
impl<P: PlayerKey> PartialEq for World<P> {
    fn eq(&self, other: &Self) -> bool {
        self.player_count() == other.player_count()
            && self
                .iter()
                .all(|(player, role)| other.get_role(player).ok() == Some(role))
    }
}

impl<P: PlayerKey> Eq for World<P> {}

impl<P: PlayerKey + Serialize> Serialize for World<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.player_count()))?;
        for (player, role) in self.iter() {
            map.serialize_entry(player, &role)?;
        }
        map.end()
    }
}

impl<P: PlayerKey> fmt::Display for World<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "World:")?;
        for (player, role) in self.iter() {
            writeln!(f, "  [{}] {}: {}", role.team(), player, role)?;
        }
        Ok(())
    }
}
