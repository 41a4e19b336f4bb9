//! Role definitions and their stat schemas.
//!
//! Both roles and every stat they track are fixed at compile time. A session
//! never reads the catalog after start; it works on the owned copy produced by
//! [`initial_stats`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::EngineError;

/// The two mutually exclusive sides of the occupied city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Denizen,
    Occupier,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Denizen, Role::Occupier];

    /// Display name shown to the player.
    pub fn name(self) -> &'static str {
        definition(self).name
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Denizen => write!(f, "denizen"),
            Role::Occupier => write!(f, "occupier"),
        }
    }
}

impl FromStr for Role {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "denizen" => Ok(Role::Denizen),
            "occupier" => Ok(Role::Occupier),
            _ => Err(EngineError::InvalidRole(s.to_string())),
        }
    }
}

/// The city the session takes place in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[default]
    Portland,
    NewYork,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Portland => write!(f, "portland"),
            Location::NewYork => write!(f, "newyork"),
        }
    }
}

impl FromStr for Location {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portland" => Ok(Location::Portland),
            "newyork" | "new-york" | "new_york" => Ok(Location::NewYork),
            _ => Err(EngineError::InvalidLocation(s.to_string())),
        }
    }
}

/// Stats tracked for the Denizen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DenizenStat {
    /// 0 is full, 100 is starving.
    Hunger,
    Suspicion,
    Health,
    Supplies,
}

/// Stats tracked for the Occupier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupierStat {
    Control,
    Resources,
    Unrest,
    Manpower,
}

/// A stat key tagged with the role that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum StatKey {
    Denizen(DenizenStat),
    Occupier(OccupierStat),
}

impl StatKey {
    pub fn role(self) -> Role {
        match self {
            StatKey::Denizen(_) => Role::Denizen,
            StatKey::Occupier(_) => Role::Occupier,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StatKey::Denizen(DenizenStat::Hunger) => "hunger",
            StatKey::Denizen(DenizenStat::Suspicion) => "suspicion",
            StatKey::Denizen(DenizenStat::Health) => "health",
            StatKey::Denizen(DenizenStat::Supplies) => "supplies",
            StatKey::Occupier(OccupierStat::Control) => "control",
            StatKey::Occupier(OccupierStat::Resources) => "resources",
            StatKey::Occupier(OccupierStat::Unrest) => "unrest",
            StatKey::Occupier(OccupierStat::Manpower) => "manpower",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<DenizenStat> for StatKey {
    fn from(stat: DenizenStat) -> Self {
        StatKey::Denizen(stat)
    }
}

impl From<OccupierStat> for StatKey {
    fn from(stat: OccupierStat) -> Self {
        StatKey::Occupier(stat)
    }
}

/// Schema entry for one stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatSpec {
    pub key: StatKey,
    pub initial: i32,
    pub max: i32,
    pub label: &'static str,
}

/// Static definition of a role.
#[derive(Debug)]
pub struct RoleDefinition {
    pub role: Role,
    pub name: &'static str,
    /// Ordered stat schema.
    pub stats: &'static [StatSpec],
}

pub type StatSchema = [StatSpec];

const fn denizen(key: DenizenStat, initial: i32, max: i32, label: &'static str) -> StatSpec {
    StatSpec {
        key: StatKey::Denizen(key),
        initial,
        max,
        label,
    }
}

const fn occupier(key: OccupierStat, initial: i32, max: i32, label: &'static str) -> StatSpec {
    StatSpec {
        key: StatKey::Occupier(key),
        initial,
        max,
        label,
    }
}

static DENIZEN: RoleDefinition = RoleDefinition {
    role: Role::Denizen,
    name: "The Denizen",
    stats: &[
        denizen(DenizenStat::Hunger, 20, 100, "Hunger (Low is Good)"),
        denizen(DenizenStat::Suspicion, 0, 100, "Suspicion"),
        denizen(DenizenStat::Health, 100, 100, "Health"),
        denizen(DenizenStat::Supplies, 5, 50, "Supplies"),
    ],
};

static OCCUPIER: RoleDefinition = RoleDefinition {
    role: Role::Occupier,
    name: "The Occupier",
    stats: &[
        occupier(OccupierStat::Control, 80, 100, "City Control"),
        occupier(OccupierStat::Resources, 100, 500, "Rations Stock"),
        occupier(OccupierStat::Unrest, 20, 100, "Civil Unrest"),
        occupier(OccupierStat::Manpower, 50, 100, "Patrol Strength"),
    ],
};

pub fn definition(role: Role) -> &'static RoleDefinition {
    match role {
        Role::Denizen => &DENIZEN,
        Role::Occupier => &OCCUPIER,
    }
}

/// Ordered stat schema for a role.
pub fn schema(role: Role) -> &'static StatSchema {
    definition(role).stats
}

/// Current value of one stat within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub key: StatKey,
    pub label: &'static str,
    pub value: i32,
    pub max: i32,
}

impl Stat {
    /// Add `delta` and clamp into `0..=max`.
    pub fn adjust(&mut self, delta: i32) {
        self.value = self.value.saturating_add(delta).clamp(0, self.max);
    }
}

/// Fresh, independently owned stat values for a new session.
pub fn initial_stats(role: Role) -> Vec<Stat> {
    schema(role)
        .iter()
        .map(|spec| Stat {
            key: spec.key,
            label: spec.label,
            value: spec.initial,
            max: spec.max,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_never_share_keys_across_roles() {
        for role in Role::ALL {
            assert!(schema(role).iter().all(|spec| spec.key.role() == role));
        }
    }

    #[test]
    fn initial_values_are_within_bounds() {
        for role in Role::ALL {
            for spec in schema(role) {
                assert!(spec.initial >= 0 && spec.initial <= spec.max, "{}", spec.key);
            }
        }
    }

    #[test]
    fn denizen_schema_matches_content() {
        let stats = initial_stats(Role::Denizen);
        let keys: Vec<_> = stats.iter().map(|s| s.key.name()).collect();
        assert_eq!(keys, ["hunger", "suspicion", "health", "supplies"]);
        assert_eq!(stats[0].value, 20);
        assert_eq!(stats[3].max, 50);
    }

    #[test]
    fn mutating_session_stats_leaves_catalog_untouched() {
        let mut stats = initial_stats(Role::Occupier);
        stats[1].adjust(-100);
        assert_eq!(stats[1].value, 0);
        assert_eq!(schema(Role::Occupier)[1].initial, 100);
        assert_eq!(initial_stats(Role::Occupier)[1].value, 100);
    }

    #[test]
    fn adjust_clamps_to_bounds() {
        let mut stat = initial_stats(Role::Denizen).remove(3);
        stat.adjust(1000);
        assert_eq!(stat.value, 50);
        stat.adjust(i32::MIN);
        assert_eq!(stat.value, 0);
    }

    #[test]
    fn parses_role_and_location_names() {
        assert_eq!("Denizen".parse::<Role>(), Ok(Role::Denizen));
        assert_eq!(" occupier ".parse::<Role>(), Ok(Role::Occupier));
        assert_eq!("new-york".parse::<Location>(), Ok(Location::NewYork));
        assert_eq!("newyork".parse::<Location>(), Ok(Location::NewYork));
        assert!(matches!(
            "mayor".parse::<Role>(),
            Err(EngineError::InvalidRole(name)) if name == "mayor"
        ));
        assert!(matches!(
            "paris".parse::<Location>(),
            Err(EngineError::InvalidLocation(_))
        ));
    }

    #[test]
    fn role_names_are_human_readable() {
        assert_eq!(Role::Denizen.name(), "The Denizen");
        assert_eq!(Role::Occupier.name(), "The Occupier");
    }
}
