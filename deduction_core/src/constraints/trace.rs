//! Step-by-step record of a constraint run, for reporting.

use botc_rules::{PlayerKey, RulesResult, World};
use serde::Serialize;
use tracing::warn;

use super::Constraint;

/// How one constraint narrowed the belief state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintStep {
    pub description: String,
    pub before: usize,
    pub after: usize,
}

impl ConstraintStep {
    pub fn eliminated(&self) -> usize {
        self.before - self.after
    }
}

/// Result of applying an ordered constraint list, with per-step counts.
#[derive(Debug, Clone)]
pub struct ConstraintTrace<P> {
    pub steps: Vec<ConstraintStep>,
    /// Zero-based index of the first step that left no worlds.
    pub first_empty: Option<usize>,
    pub worlds: Vec<World<P>>,
}

impl<P: PlayerKey> ConstraintTrace<P> {
    pub fn initial_count(&self) -> Option<usize> {
        self.steps.first().map(|s| s.before)
    }

    pub fn is_contradiction(&self) -> bool {
        self.worlds.is_empty()
    }
}

/// Like [`super::apply_constraints`], also recording each step.
pub fn apply_constraints_traced<P: PlayerKey>(
    worlds: &[World<P>],
    constraints: &[Constraint<P>],
) -> RulesResult<ConstraintTrace<P>> {
    let mut current = worlds.to_vec();
    let mut steps = Vec::with_capacity(constraints.len());
    let mut first_empty = None;

    for (index, constraint) in constraints.iter().enumerate() {
        let before = current.len();
        current = constraint.apply(&current)?;
        steps.push(ConstraintStep {
            description: constraint.description(),
            before,
            after: current.len(),
        });
        if current.is_empty() && before > 0 && first_empty.is_none() {
            first_empty = Some(index);
            warn!(step = index + 1, constraint = %constraint, "no worlds remain");
        }
    }

    Ok(ConstraintTrace {
        steps,
        first_empty,
        worlds: current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_builder::generate_worlds;
    use botc_rules::Role;

    #[test]
    fn test_trace_records_each_step() {
        let worlds = generate_worlds(0..5usize, None).unwrap();
        let trace = apply_constraints_traced(
            &worlds,
            &[
                Constraint::exact_role(0, Role::Imp),
                Constraint::exact_role(1, Role::ScarletWoman),
            ],
        )
        .unwrap();

        assert_eq!(trace.initial_count(), Some(120));
        assert_eq!(trace.steps[0].after, 24);
        assert_eq!(trace.steps[1].before, 24);
        assert_eq!(trace.steps[1].after, 6);
        assert_eq!(trace.steps[0].eliminated(), 96);
        assert_eq!(trace.steps[1].description, "1 is Scarlet Woman");
        assert_eq!(trace.first_empty, None);
        assert_eq!(trace.worlds.len(), 6);
    }

    #[test]
    fn test_trace_marks_first_emptying_step() {
        let worlds = generate_worlds(0..5usize, None).unwrap();
        let trace = apply_constraints_traced(
            &worlds,
            &[
                Constraint::exact_role(0, Role::Imp),
                Constraint::exact_role(0, Role::Empath),
                Constraint::exact_role(1, Role::Washerwoman),
            ],
        )
        .unwrap();

        assert_eq!(trace.first_empty, Some(1));
        assert_eq!(trace.steps.len(), 3);
        assert_eq!(trace.steps[2].before, 0);
        assert!(trace.is_contradiction());
    }
}
