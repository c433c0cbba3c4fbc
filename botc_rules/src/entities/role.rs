//! The role catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{RoleCategory, Team};

/// Character roles available in the game. Ordered by catalog position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    // Townsfolk
    Washerwoman,
    Investigator,
    Empath,
    /// Generic good role with no first-night information.
    Townsfolk,

    // Minion
    ScarletWoman,

    // Demon
    Imp,
}

/// Good roles that receive first-night information, in seating-fill order.
pub const INFORMATION_ROLES: [Role; 3] = [Role::Washerwoman, Role::Investigator, Role::Empath];

impl Role {
    /// Every role in the catalog.
    pub const fn all() -> &'static [Role] {
        &[
            Role::Washerwoman,
            Role::Investigator,
            Role::Empath,
            Role::Townsfolk,
            Role::ScarletWoman,
            Role::Imp,
        ]
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Role::Washerwoman => "Washerwoman",
            Role::Investigator => "Investigator",
            Role::Empath => "Empath",
            Role::Townsfolk => "Townsfolk",
            Role::ScarletWoman => "Scarlet Woman",
            Role::Imp => "Imp",
        }
    }

    pub const fn category(&self) -> RoleCategory {
        match self {
            Role::Washerwoman | Role::Investigator | Role::Empath | Role::Townsfolk => {
                RoleCategory::Townsfolk
            }
            Role::ScarletWoman => RoleCategory::Minion,
            Role::Imp => RoleCategory::Demon,
        }
    }

    pub fn team(&self) -> Team {
        self.category().team()
    }

    pub fn is_evil(&self) -> bool {
        self.team() == Team::Evil
    }

    pub fn is_good(&self) -> bool {
        self.team() == Team::Good
    }

    pub fn is_demon(&self) -> bool {
        self.category() == RoleCategory::Demon
    }

    pub fn is_minion(&self) -> bool {
        self.category() == RoleCategory::Minion
    }

    /// Look up a role by display name or snake_case identifier.
    pub fn from_name(s: &str) -> Option<Role> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Role::all()
            .iter()
            .copied()
            .find(|role| role.name().to_lowercase().replace(' ', "_") == normalized)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default good-role list for a table: the information roles first, then
/// generic Townsfolk for every remaining good seat.
///
/// Two seats are reserved for the demon and the minion.
pub fn default_good_roles(player_count: usize) -> Vec<Role> {
    let good_seats = player_count.saturating_sub(2);
    let mut roles: Vec<Role> = INFORMATION_ROLES.iter().copied().take(good_seats).collect();
    roles.resize(good_seats, Role::Townsfolk);
    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_teams() {
        assert!(Role::Imp.is_evil());
        assert!(Role::ScarletWoman.is_evil());
        assert!(Role::Washerwoman.is_good());
        assert!(Role::Townsfolk.is_good());
        assert!(!Role::Empath.is_evil());
    }

    #[test]
    fn test_single_demon_in_catalog() {
        let demons = Role::all().iter().filter(|r| r.is_demon()).count();
        let minions = Role::all().iter().filter(|r| r.is_minion()).count();
        assert_eq!(demons, 1);
        assert_eq!(minions, 1);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Role::from_name("Scarlet Woman"), Some(Role::ScarletWoman));
        assert_eq!(Role::from_name("scarlet_woman"), Some(Role::ScarletWoman));
        assert_eq!(Role::from_name("IMP"), Some(Role::Imp));
        assert_eq!(Role::from_name("Baron"), None);
    }

    #[test]
    fn test_default_good_roles() {
        assert_eq!(
            default_good_roles(5),
            vec![Role::Washerwoman, Role::Investigator, Role::Empath]
        );
        assert_eq!(default_good_roles(4), vec![Role::Washerwoman, Role::Investigator]);
        assert_eq!(
            default_good_roles(7),
            vec![
                Role::Washerwoman,
                Role::Investigator,
                Role::Empath,
                Role::Townsfolk,
                Role::Townsfolk,
            ]
        );
        assert!(default_good_roles(1).is_empty());
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(toml_name(Role::ScarletWoman), "scarlet_woman");
        assert_eq!(toml_name(Role::Imp), "imp");
    }

    fn toml_name(role: Role) -> String {
        #[derive(Serialize)]
        struct Wrapper {
            role: Role,
        }
        let rendered = toml::to_string(&Wrapper { role }).unwrap();
        rendered
            .trim()
            .trim_start_matches("role = ")
            .trim_matches('"')
            .to_string()
    }
}
