//! Turn-based simulation of life in an occupied city, played from either side.
//!
//! [`SimulationEngine`] owns the session and is the only writer of its
//! [`GameState`]. Content (roles, stat schemas, events) is static and never
//! mutated by play.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod event;
pub mod role;
pub mod state;

pub use engine::{ChoiceResult, DayOutcome, Phase, SimulationEngine};
pub use error::{EngineError, IllegalState, Result};
pub use event::{Choice, Effect, Event, RandomSource};
pub use role::{DenizenStat, Location, OccupierStat, Role, Stat, StatKey};
pub use state::{GameState, LogEntry, Severity, Snapshot};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_denizen_session_runs_to_an_end() {
        let mut engine = SimulationEngine::seeded(2024);
        engine.start_game(Role::Denizen, Location::Portland).unwrap();

        let mut days = 0;
        while !engine.state().unwrap().is_terminated() && days < 500 {
            if engine.phase() == Phase::AwaitingChoice {
                engine.resolve_choice_index(0).unwrap();
            }
            if !engine.state().unwrap().is_terminated() {
                engine.advance_day().unwrap();
            }
            days += 1;
        }

        let snapshot = engine.snapshot().unwrap();
        assert!(snapshot.terminated);
        assert!(snapshot.termination_reason.is_some());
        assert_eq!(snapshot.log.last().unwrap().severity, Severity::Warning);
    }
}
