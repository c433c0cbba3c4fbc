//! Agent memory - the observation history behind one reasoner's beliefs.
//!
//! A memory owns its belief state. Every new observation rebuilds that state
//! from the initial worlds over the full ordered history, so the current
//! worlds always equal `apply_constraints(initial, history)`.

mod observation;

pub use observation::*;

use botc_rules::{PlayerKey, Role, RulesResult, World};
use tracing::{debug, info};

use crate::constraints::{apply_constraints, apply_constraints_traced, Constraint, ConstraintTrace};
use crate::deduction::{BeliefStatus, BeliefSummary};
use crate::world_builder::WorldGenerator;

/// Observation history and belief state for one player.
#[derive(Debug, Clone)]
pub struct Memory<P> {
    owner: P,
    owner_role: Role,
    initial: Vec<World<P>>,
    history: Vec<ObservationRecord<P>>,
    current: Vec<World<P>>,
}

impl<P: PlayerKey> Memory<P> {
    /// Start a memory over `initial` worlds. The owner's own role is the
    /// first observation.
    pub fn new(owner: P, owner_role: Role, initial: Vec<World<P>>) -> RulesResult<Self> {
        info!(%owner, role = %owner_role, worlds = initial.len(), "initialized memory");
        let mut memory = Self {
            owner: owner.clone(),
            owner_role,
            current: initial.clone(),
            initial,
            history: Vec::new(),
        };
        memory.record(Observation::SelfRole {
            player: owner,
            role: owner_role,
        })?;
        Ok(memory)
    }

    /// Start a memory over every world the generator produces.
    pub fn from_generator(
        owner: P,
        owner_role: Role,
        generator: &WorldGenerator<P>,
        good_roles: Option<&[Role]>,
    ) -> RulesResult<Self> {
        let initial = generator.generate_all_worlds(good_roles)?;
        Self::new(owner, owner_role, initial)
    }

    /// Append the owner's own observation, received at setup, and rebuild
    /// the belief state.
    pub fn record(&mut self, observation: Observation<P>) -> RulesResult<&[World<P>]> {
        self.record_at(observation, ObservationSource::Own, 0)
    }

    /// Append an observation with its source and night, and rebuild the
    /// belief state.
    ///
    /// On failure the observation is discarded and the previous belief state
    /// is kept.
    pub fn record_at(
        &mut self,
        observation: Observation<P>,
        source: ObservationSource<P>,
        night: u32,
    ) -> RulesResult<&[World<P>]> {
        debug!(%observation, night, "recording observation");
        self.history.push(ObservationRecord {
            observation,
            source,
            night,
        });

        match apply_constraints(&self.initial, &self.constraints()) {
            Ok(worlds) => {
                info!(
                    observations = self.history.len(),
                    worlds = worlds.len(),
                    "updated belief state"
                );
                self.current = worlds;
                Ok(&self.current)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }

    /// Constraints derived from the history, in order.
    pub fn constraints(&self) -> Vec<Constraint<P>> {
        self.history
            .iter()
            .map(|record| record.observation.to_constraint())
            .collect()
    }

    pub fn owner(&self) -> &P {
        &self.owner
    }

    pub fn owner_role(&self) -> Role {
        self.owner_role
    }

    /// Every observation received, in order.
    pub fn history(&self) -> &[ObservationRecord<P>] {
        &self.history
    }

    pub fn observations_of_kind(
        &self,
        kind: ObservationKind,
    ) -> impl Iterator<Item = &ObservationRecord<P>> + '_ {
        self.history.iter().filter(move |record| record.kind() == kind)
    }

    /// Observations that came from a role's ability rather than self-knowledge.
    pub fn ability_observations(&self) -> impl Iterator<Item = &ObservationRecord<P>> + '_ {
        self.history.iter().filter(|record| record.kind().is_ability())
    }

    pub fn observations_on_night(
        &self,
        night: u32,
    ) -> impl Iterator<Item = &ObservationRecord<P>> + '_ {
        self.history.iter().filter(move |record| record.night == night)
    }

    pub fn initial_worlds(&self) -> &[World<P>] {
        &self.initial
    }

    /// Current belief state.
    pub fn worlds(&self) -> &[World<P>] {
        &self.current
    }

    pub fn status(&self) -> BeliefStatus {
        BeliefStatus::from_count(self.current.len())
    }

    pub fn summary(&self) -> RulesResult<BeliefSummary<P>> {
        BeliefSummary::from_worlds(&self.current)
    }

    /// Replay the history step by step for reporting.
    pub fn trace(&self) -> RulesResult<ConstraintTrace<P>> {
        apply_constraints_traced(&self.initial, &self.constraints())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deduction::{find_proven_facts, is_proven_good, prove_role};
    use crate::world_builder::generate_worlds;
    use botc_rules::{empath_info, washerwoman_info, RulesError};

    const PLAYERS: [&str; 5] = ["Alice", "Bob", "Charlie", "Diana", "Eve"];

    fn ground_truth() -> World<&'static str> {
        World::new([
            ("Alice", Role::Washerwoman),
            ("Bob", Role::Investigator),
            ("Charlie", Role::Empath),
            ("Diana", Role::Imp),
            ("Eve", Role::ScarletWoman),
        ])
        .unwrap()
    }

    #[test]
    fn test_sighting_narrows_without_contradiction() {
        let truth = ground_truth();
        let worlds = generate_worlds(PLAYERS, None).unwrap();
        assert_eq!(worlds.len(), 120);

        let bob_role = truth.get_role(&"Bob").unwrap();
        let constraint = Constraint::washerwoman("Bob", "Charlie", bob_role);
        let narrowed = apply_constraints(&worlds, &[constraint.clone()]).unwrap();

        assert!(narrowed.len() < 120);
        assert!(!narrowed.is_empty());
        assert!(narrowed.iter().all(|w| constraint.holds(w).unwrap()));
        assert!(narrowed.contains(&truth));
    }

    #[test]
    fn test_self_role_is_first_observation() {
        let generator = WorldGenerator::new(PLAYERS).unwrap();
        let memory = Memory::from_generator("Alice", Role::Washerwoman, &generator, None).unwrap();

        assert_eq!(memory.history().len(), 1);
        assert_eq!(memory.history()[0].source, ObservationSource::Own);
        assert_eq!(memory.history()[0].night, 0);
        assert_eq!(memory.initial_worlds().len(), 120);
        assert_eq!(memory.worlds().len(), 24);
        assert_eq!(prove_role(memory.worlds(), &"Alice").unwrap(), Some(Role::Washerwoman));
    }

    #[test]
    fn test_washerwoman_agent_scenario() {
        let truth = ground_truth();
        let info = washerwoman_info(&truth, &"Alice", &"Bob", &"Charlie").unwrap();
        let observation = Observation::from_ability(&"Alice", &info).unwrap();

        let generator = WorldGenerator::new(PLAYERS).unwrap();
        let mut memory =
            Memory::from_generator("Alice", Role::Washerwoman, &generator, None).unwrap();
        memory.record(observation).unwrap();

        // Alice is fixed; Bob or Charlie is the Investigator.
        assert_eq!(memory.worlds().len(), 12);
        assert!(memory.worlds().contains(&truth));
        assert!(matches!(memory.status(), BeliefStatus::Uncertain { worlds: 12 }));
    }

    #[test]
    fn test_full_information_determines_world() {
        let truth = ground_truth();
        let generator = WorldGenerator::new(PLAYERS).unwrap();
        let mut memory = Memory::from_generator("Charlie", Role::Empath, &generator, None).unwrap();

        let reading = empath_info(&truth, &"Charlie").unwrap();
        memory
            .record(Observation::from_ability(&"Charlie", &reading).unwrap())
            .unwrap();
        memory
            .record(Observation::ScarletWoman {
                minion: "Eve",
                demon: "Diana",
            })
            .unwrap();
        memory
            .record(Observation::SelfRole {
                player: "Alice",
                role: Role::Washerwoman,
            })
            .unwrap();

        assert_eq!(memory.status(), BeliefStatus::Determined);
        assert_eq!(memory.worlds(), &[truth]);
        assert_eq!(find_proven_facts(memory.worlds()).unwrap().len(), 5);

        let trace = memory.trace().unwrap();
        assert_eq!(trace.steps.len(), 4);
        assert_eq!(trace.initial_count(), Some(120));
        assert_eq!(trace.worlds.len(), 1);
    }

    #[test]
    fn test_contradiction_is_distinct_from_uncertainty() {
        let generator = WorldGenerator::new(PLAYERS).unwrap();
        let mut memory =
            Memory::from_generator("Alice", Role::Washerwoman, &generator, None).unwrap();
        assert!(!memory.status().is_contradiction());

        memory
            .record(Observation::Investigator {
                players: ("Alice", "Alice"),
                role: Role::ScarletWoman,
            })
            .unwrap();

        assert!(memory.worlds().is_empty());
        assert!(memory.status().is_contradiction());
        assert!(!is_proven_good(memory.worlds(), &"Bob").unwrap());
        assert!(memory.summary().unwrap().status.is_contradiction());
        assert_eq!(memory.trace().unwrap().first_empty, Some(1));
    }

    #[test]
    fn test_failed_record_keeps_previous_state() {
        let generator = WorldGenerator::new(PLAYERS).unwrap();
        let mut memory =
            Memory::from_generator("Alice", Role::Washerwoman, &generator, None).unwrap();

        let err = memory
            .record(Observation::Empath {
                player: "Zed",
                evil_count: 0,
            })
            .unwrap_err();

        assert_eq!(err, RulesError::PlayerNotFound("Zed".into()));
        assert_eq!(memory.history().len(), 1);
        assert_eq!(memory.worlds().len(), 24);
    }

    #[test]
    fn test_history_filters_by_kind_and_night() {
        let truth = ground_truth();
        let generator = WorldGenerator::new(PLAYERS).unwrap();
        let mut memory =
            Memory::from_generator("Charlie", Role::Empath, &generator, None).unwrap();

        let first = empath_info(&truth, &"Charlie").unwrap();
        let first = Observation::from_ability(&"Charlie", &first).unwrap();
        memory.record_at(first.clone(), ObservationSource::Own, 1).unwrap();
        memory.record_at(first, ObservationSource::Own, 2).unwrap();
        memory
            .record_at(
                Observation::SelfRole {
                    player: "Alice",
                    role: Role::Washerwoman,
                },
                ObservationSource::Player("Alice"),
                2,
            )
            .unwrap();

        assert_eq!(memory.history().len(), 4);
        assert_eq!(memory.observations_of_kind(ObservationKind::Empath).count(), 2);
        assert_eq!(memory.observations_of_kind(ObservationKind::SelfRole).count(), 2);
        assert_eq!(memory.observations_of_kind(ObservationKind::Investigator).count(), 0);
        assert!(memory
            .ability_observations()
            .all(|record| record.kind() == ObservationKind::Empath));

        let night_two: Vec<_> = memory.observations_on_night(2).collect();
        assert_eq!(night_two.len(), 2);
        assert_eq!(night_two[1].source, ObservationSource::Player("Alice"));
        assert!(memory.worlds().contains(&truth));
    }
}
