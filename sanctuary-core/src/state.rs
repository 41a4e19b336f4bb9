//! Session state for a single playthrough.

use serde::Serialize;

use crate::role::{self, Location, Role, Stat, StatKey};

/// How a log entry should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Choice,
}

/// A single line of the narrative log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub text: String,
    pub severity: Severity,
}

/// The full mutable record of one session. Only the engine writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) role: Role,
    pub(crate) location: Location,
    pub(crate) day: u32,
    pub(crate) stats: Vec<Stat>,
    pub(crate) log: Vec<LogEntry>,
    pub(crate) terminated: bool,
    pub(crate) termination_reason: Option<String>,
}

impl GameState {
    /// A day-one state with the role's initial stats.
    pub fn new(role: Role, location: Location) -> Self {
        Self {
            role,
            location,
            day: 1,
            stats: role::initial_stats(role),
            log: Vec::new(),
            terminated: false,
            termination_reason: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Current stats in schema order.
    pub fn stats(&self) -> &[Stat] {
        &self.stats
    }

    pub fn stat(&self, key: impl Into<StatKey>) -> Option<&Stat> {
        let key = key.into();
        self.stats.iter().find(|s| s.key == key)
    }

    /// Current value of a stat; `None` when the key is not in this role's schema.
    pub fn value(&self, key: impl Into<StatKey>) -> Option<i32> {
        self.stat(key).map(|s| s.value)
    }

    /// Narrative log in insertion order.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn termination_reason(&self) -> Option<&str> {
        self.termination_reason.as_deref()
    }

    pub(crate) fn stat_mut(&mut self, key: impl Into<StatKey>) -> Option<&mut Stat> {
        let key = key.into();
        self.stats.iter_mut().find(|s| s.key == key)
    }

    /// Clamped adjustment. Returns false when the key is foreign to this role.
    pub(crate) fn adjust(&mut self, key: impl Into<StatKey>, delta: i32) -> bool {
        match self.stat_mut(key) {
            Some(stat) => {
                stat.adjust(delta);
                true
            }
            None => false,
        }
    }

    pub(crate) fn record(&mut self, text: impl Into<String>, severity: Severity) {
        self.log.push(LogEntry {
            text: text.into(),
            severity,
        });
    }

    /// Owned copy of everything the presentation layer renders.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            role: self.role,
            role_name: self.role.name(),
            location: self.location,
            day: self.day,
            stats: self.stats.clone(),
            log: self.log.clone(),
            terminated: self.terminated,
            termination_reason: self.termination_reason.clone(),
        }
    }
}

/// Read-only view of a session at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub role: Role,
    pub role_name: &'static str,
    pub location: Location,
    pub day: u32,
    pub stats: Vec<Stat>,
    pub log: Vec<LogEntry>,
    pub terminated: bool,
    pub termination_reason: Option<String>,
}
