//! Constraint engine - pure filters that narrow a belief state.
//!
//! Each constraint encodes one piece of evidence. Applying it keeps exactly
//! the worlds consistent with that evidence, in their original order, as a new
//! collection; the input is never touched.

mod trace;

pub use trace::*;

use botc_rules::{PlayerKey, Role, RulesResult, World};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// One piece of evidence about the hidden assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint<P> {
    /// One of two players holds a good-information role (Washerwoman).
    TownsfolkSighting { first: P, second: P, role: Role },

    /// One of two players holds an evil-information role (Investigator).
    MinionSighting { first: P, second: P, role: Role },

    /// A player has exactly this many evil neighbors (Empath).
    EvilNeighbors { player: P, evil_count: usize },

    /// Both players hold their stated roles (Scarlet Woman naming the demon).
    PairedIdentity {
        first: P,
        first_role: Role,
        second: P,
        second_role: Role,
    },

    /// A player holds exactly this role.
    ExactRole { player: P, role: Role },
}

impl<P: PlayerKey> Constraint<P> {
    /// Washerwoman sees `first` and `second`; one is `role`.
    pub fn washerwoman(first: P, second: P, role: Role) -> Self {
        Constraint::TownsfolkSighting {
            first,
            second,
            role,
        }
    }

    /// Investigator sees `first` and `second`; one is `role`.
    pub fn investigator(first: P, second: P, role: Role) -> Self {
        Constraint::MinionSighting {
            first,
            second,
            role,
        }
    }

    /// Empath `player` has `evil_count` evil neighbors.
    pub fn empath(player: P, evil_count: usize) -> Self {
        Constraint::EvilNeighbors { player, evil_count }
    }

    /// `minion` is the Scarlet Woman and `demon` is the Imp.
    pub fn scarlet_woman(minion: P, demon: P) -> Self {
        Self::paired_identity(minion, Role::ScarletWoman, demon, Role::Imp)
    }

    pub fn paired_identity(first: P, first_role: Role, second: P, second_role: Role) -> Self {
        Constraint::PairedIdentity {
            first,
            first_role,
            second,
            second_role,
        }
    }

    pub fn exact_role(player: P, role: Role) -> Self {
        Constraint::ExactRole { player, role }
    }

    /// Short variant name for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Constraint::TownsfolkSighting { .. } => "washerwoman",
            Constraint::MinionSighting { .. } => "investigator",
            Constraint::EvilNeighbors { .. } => "empath",
            Constraint::PairedIdentity { .. } => "paired_identity",
            Constraint::ExactRole { .. } => "role",
        }
    }

    /// Whether a single world is consistent with this constraint.
    ///
    /// Fails if a named player is absent, or for a neighbor count on a table
    /// with fewer than 3 players.
    pub fn holds(&self, world: &World<P>) -> RulesResult<bool> {
        match self {
            Constraint::TownsfolkSighting {
                first,
                second,
                role,
            }
            | Constraint::MinionSighting {
                first,
                second,
                role,
            } => Ok(world.get_role(first)? == *role || world.get_role(second)? == *role),
            Constraint::EvilNeighbors { player, evil_count } => {
                Ok(world.evil_neighbor_count(player)? == *evil_count)
            }
            Constraint::PairedIdentity {
                first,
                first_role,
                second,
                second_role,
            } => Ok(
                world.get_role(first)? == *first_role && world.get_role(second)? == *second_role
            ),
            Constraint::ExactRole { player, role } => Ok(world.get_role(player)? == *role),
        }
    }

    /// Keep the worlds this constraint allows.
    pub fn apply(&self, worlds: &[World<P>]) -> RulesResult<Vec<World<P>>> {
        let mut kept = Vec::with_capacity(worlds.len());
        for world in worlds {
            if self.holds(world)? {
                kept.push(world.clone());
            }
        }
        debug!(
            constraint = self.label(),
            before = worlds.len(),
            after = kept.len(),
            "applied constraint"
        );
        Ok(kept)
    }

    /// Human-readable statement of the evidence.
    pub fn description(&self) -> String {
        match self {
            Constraint::TownsfolkSighting {
                first,
                second,
                role,
            } => format!("Washerwoman sees {first} and {second}, one is {role}"),
            Constraint::MinionSighting {
                first,
                second,
                role,
            } => format!("Investigator sees {first} and {second}, one is {role}"),
            Constraint::EvilNeighbors { player, evil_count } => {
                format!("Empath ({player}) sees {evil_count} evil neighbor(s)")
            }
            Constraint::PairedIdentity {
                first,
                first_role,
                second,
                second_role,
            } => format!("{first} is {first_role} and {second} is {second_role}"),
            Constraint::ExactRole { player, role } => format!("{player} is {role}"),
        }
    }
}

impl<P: PlayerKey> fmt::Display for Constraint<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Apply constraints in order, each to the previous output.
///
/// Every constraint runs even after the belief state empties; the first
/// emptying step is logged. An empty result is a contradiction, not an error.
pub fn apply_constraints<P: PlayerKey>(
    worlds: &[World<P>],
    constraints: &[Constraint<P>],
) -> RulesResult<Vec<World<P>>> {
    info!(
        constraints = constraints.len(),
        worlds = worlds.len(),
        "applying constraints"
    );

    let current = apply_constraints_traced(worlds, constraints)?.worlds;
    info!(worlds = current.len(), "constraints applied");
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_builder::generate_worlds;
    use botc_rules::RulesError;

    fn five_player_worlds() -> Vec<World<usize>> {
        generate_worlds(0..5usize, None).unwrap()
    }

    #[test]
    fn test_no_constraints_is_identity() {
        let worlds = five_player_worlds();
        let result = apply_constraints(&worlds, &[]).unwrap();
        assert_eq!(result, worlds);
    }

    #[test]
    fn test_exact_role_on_full_set() {
        let worlds = five_player_worlds();
        let result = Constraint::exact_role(0, Role::Imp).apply(&worlds).unwrap();
        assert_eq!(result.len(), 24);
        assert!(result.iter().all(|w| w.get_role(&0) == Ok(Role::Imp)));
        assert_eq!(worlds.len(), 120);
    }

    #[test]
    fn test_two_exact_roles() {
        let worlds = five_player_worlds();
        let result = apply_constraints(
            &worlds,
            &[
                Constraint::exact_role(0, Role::Imp),
                Constraint::exact_role(1, Role::ScarletWoman),
            ],
        )
        .unwrap();
        assert_eq!(result.len(), 6);
    }

    #[test]
    fn test_contradiction_yields_empty() {
        let worlds = five_player_worlds();
        let result = apply_constraints(
            &worlds,
            &[
                Constraint::exact_role(2, Role::Empath),
                Constraint::exact_role(2, Role::Washerwoman),
                Constraint::exact_role(3, Role::Imp),
            ],
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_reapplying_is_idempotent() {
        let worlds = five_player_worlds();
        let constraint = Constraint::washerwoman(1, 2, Role::Investigator);
        let once = constraint.apply(&worlds).unwrap();
        let twice = constraint.apply(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sighting_is_disjunctive() {
        let worlds = five_player_worlds();
        let constraint = Constraint::washerwoman(1, 2, Role::Investigator);
        let result = constraint.apply(&worlds).unwrap();
        // Investigator on seat 1 or seat 2: 2 × (4 × 3 × 2) = 48 worlds.
        assert_eq!(result.len(), 48);
        for world in &result {
            assert!(
                world.get_role(&1) == Ok(Role::Investigator)
                    || world.get_role(&2) == Ok(Role::Investigator)
            );
        }
    }

    #[test]
    fn test_investigator_sighting() {
        let worlds = five_player_worlds();
        let result = Constraint::investigator(3, 4, Role::ScarletWoman)
            .apply(&worlds)
            .unwrap();
        assert_eq!(result.len(), 48);
    }

    #[test]
    fn test_paired_identity_is_conjunctive() {
        let worlds = five_player_worlds();
        let result = Constraint::scarlet_woman(4, 3).apply(&worlds).unwrap();
        assert_eq!(result.len(), 6);
        for world in &result {
            assert_eq!(world.get_role(&4), Ok(Role::ScarletWoman));
            assert_eq!(world.get_role(&3), Ok(Role::Imp));
        }
    }

    #[test]
    fn test_evil_neighbors() {
        let worlds = five_player_worlds();
        let mut total = 0;
        for count in 0..=2 {
            let result = Constraint::empath(2, count).apply(&worlds).unwrap();
            for world in &result {
                assert_eq!(world.evil_neighbor_count(&2).unwrap(), count);
            }
            total += result.len();
        }
        assert_eq!(total, 120);

        // Both neighbors evil: seats 1 and 3 hold the demon and the minion.
        let both = Constraint::empath(2, 2).apply(&worlds).unwrap();
        assert_eq!(both.len(), 12);
    }

    #[test]
    fn test_missing_player_propagates() {
        let worlds = five_player_worlds();
        let err = Constraint::exact_role(9, Role::Imp).apply(&worlds).unwrap_err();
        assert_eq!(err, RulesError::PlayerNotFound("9".into()));
    }

    #[test]
    fn test_empty_input_stays_empty() {
        let none: Vec<World<usize>> = Vec::new();
        assert!(Constraint::exact_role(9, Role::Imp).apply(&none).unwrap().is_empty());
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(
            Constraint::washerwoman("Bob", "Charlie", Role::Investigator).to_string(),
            "Washerwoman sees Bob and Charlie, one is Investigator"
        );
        assert_eq!(
            Constraint::empath("Charlie", 1).description(),
            "Empath (Charlie) sees 1 evil neighbor(s)"
        );
        assert_eq!(
            Constraint::scarlet_woman("Eve", "Diana").description(),
            "Eve is Scarlet Woman and Diana is Imp"
        );
        assert_eq!(Constraint::exact_role(0, Role::Imp).label(), "role");
    }
}
