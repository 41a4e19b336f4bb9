//! The session state machine.
//!
//! A [`SimulationEngine`] owns at most one [`GameState`] and is its only
//! writer. Every operation validates first and mutates second, so a call that
//! returns an error leaves the session exactly as it found it.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::catalog;
use crate::error::{EngineError, IllegalState, Result};
use crate::event::{Choice, Event, RandomSource};
use crate::role::{DenizenStat, Location, OccupierStat, Role, StatKey};
use crate::state::{GameState, Severity, Snapshot};

/// Where the engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session exists.
    Menu,
    /// An event has been offered and is waiting for a choice.
    AwaitingChoice,
    /// Today's choice is made; the next step is ending the day.
    AwaitingDayEnd,
    Terminated,
}

/// Result of ending a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOutcome {
    /// The session continues with this event.
    Event(Event),
    /// Passive effects ended the session.
    Terminated { reason: String },
}

/// Result of resolving a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceResult {
    pub terminated: bool,
}

#[derive(Debug, Clone, Copy)]
enum Threshold {
    AtMost(i32),
    AtLeast(i32),
}

impl Threshold {
    fn crossed_by(self, value: i32) -> bool {
        match self {
            Threshold::AtMost(limit) => value <= limit,
            Threshold::AtLeast(limit) => value >= limit,
        }
    }
}

struct TerminationRule {
    stat: StatKey,
    threshold: Threshold,
    reason: &'static str,
}

/// Checked in order; the first crossed rule supplies the reason.
const DENIZEN_RULES: &[TerminationRule] = &[
    TerminationRule {
        stat: StatKey::Denizen(DenizenStat::Health),
        threshold: Threshold::AtMost(0),
        reason: "You succumbed to your injuries. The city claimed another soul.",
    },
    TerminationRule {
        stat: StatKey::Denizen(DenizenStat::Suspicion),
        threshold: Threshold::AtLeast(100),
        reason: "The secret police kicked down your door. You were never seen again.",
    },
    TerminationRule {
        stat: StatKey::Denizen(DenizenStat::Hunger),
        threshold: Threshold::AtLeast(100),
        reason: "Starvation has taken you.",
    },
];

const OCCUPIER_RULES: &[TerminationRule] = &[
    TerminationRule {
        stat: StatKey::Occupier(OccupierStat::Control),
        threshold: Threshold::AtMost(0),
        reason: "The city has fallen to the rebellion. You are forced to flee.",
    },
    TerminationRule {
        stat: StatKey::Occupier(OccupierStat::Unrest),
        threshold: Threshold::AtLeast(100),
        reason: "A massive uprising has overthrown your command center.",
    },
];

/// Hunger at or above this drains health each day.
pub const STARVATION_THRESHOLD: i32 = 90;

/// Reason the session should end, if any threshold is crossed.
pub fn termination_reason(state: &GameState) -> Option<&'static str> {
    let rules = match state.role() {
        Role::Denizen => DENIZEN_RULES,
        Role::Occupier => OCCUPIER_RULES,
    };
    rules
        .iter()
        .find(|rule| {
            state
                .value(rule.stat)
                .is_some_and(|value| rule.threshold.crossed_by(value))
        })
        .map(|rule| rule.reason)
}

#[derive(Debug)]
struct Session {
    state: GameState,
    pending: Option<Event>,
}

/// Drives sessions. Generic over the random source used to draw events.
#[derive(Debug)]
pub struct SimulationEngine<R = StdRng> {
    rng: R,
    session: Option<Session>,
}

impl SimulationEngine<StdRng> {
    /// Engine with a reproducible event sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> SimulationEngine<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, session: None }
    }

    /// Begin a new session, discarding any existing one.
    pub fn start_game(&mut self, role: Role, location: Location) -> Result<Event> {
        if self.session.is_some() {
            self.return_to_menu();
        }

        let mut state = GameState::new(role, location);
        let event = catalog::select_event(role, state.day, location, &mut self.rng);
        present(&mut state, &event);
        info!(%role, %location, "Session started");

        self.session = Some(Session {
            state,
            pending: Some(event.clone()),
        });
        Ok(event)
    }

    /// Like [`start_game`](Self::start_game), parsing role and location names.
    pub fn start_game_named(&mut self, role: &str, location: &str) -> Result<Event> {
        let role: Role = role.parse()?;
        let location: Location = location.parse()?;
        self.start_game(role, location)
    }

    /// End the current day: passive effects, termination check, next event.
    pub fn advance_day(&mut self) -> Result<DayOutcome> {
        let session = active(&mut self.session)?;
        let state = &mut session.state;

        state.day += 1;
        debug!(day = state.day, "Day advanced");
        apply_passive_effects(state);

        if let Some(reason) = terminate_if_crossed(state) {
            session.pending = None;
            return Ok(DayOutcome::Terminated {
                reason: reason.to_string(),
            });
        }

        let event = catalog::select_event(state.role, state.day, state.location, &mut self.rng);
        present(state, &event);
        session.pending = Some(event.clone());
        Ok(DayOutcome::Event(event))
    }

    /// Apply `choice`, which must be one of the pending event's choices.
    pub fn resolve_choice(&mut self, choice: &Choice) -> Result<ChoiceResult> {
        let session = active(&mut self.session)?;
        let event = session
            .pending
            .as_ref()
            .ok_or(EngineError::IllegalState(IllegalState::NoPendingEvent))?;
        if event.position_of(choice).is_none() {
            return Err(EngineError::UnknownChoice {
                label: choice.label.clone(),
            });
        }

        session.pending = None;
        Ok(apply_choice(&mut session.state, choice))
    }

    /// Resolve the pending event's choice at `index`.
    pub fn resolve_choice_index(&mut self, index: usize) -> Result<ChoiceResult> {
        let session = active(&mut self.session)?;
        let event = session
            .pending
            .take()
            .ok_or(EngineError::IllegalState(IllegalState::NoPendingEvent))?;
        if index >= event.choices.len() {
            session.pending = Some(event);
            return Err(EngineError::UnknownChoice {
                label: format!("#{index}"),
            });
        }

        Ok(apply_choice(&mut session.state, &event.choices[index]))
    }

    /// Evaluate termination rules now. Returns whether the session has ended.
    pub fn check_termination(&mut self) -> Result<bool> {
        let session = self
            .session
            .as_mut()
            .ok_or(EngineError::IllegalState(IllegalState::NoSession))?;
        if session.state.terminated {
            return Ok(true);
        }
        let ended = terminate_if_crossed(&mut session.state).is_some();
        if ended {
            session.pending = None;
        }
        Ok(ended)
    }

    /// Discard the session, if any.
    pub fn return_to_menu(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(day = session.state.day, "Session discarded");
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.session {
            None => Phase::Menu,
            Some(session) if session.state.terminated => Phase::Terminated,
            Some(session) if session.pending.is_some() => Phase::AwaitingChoice,
            Some(_) => Phase::AwaitingDayEnd,
        }
    }

    pub fn state(&self) -> Option<&GameState> {
        self.session.as_ref().map(|s| &s.state)
    }

    /// The event currently waiting for a choice.
    pub fn current_event(&self) -> Option<&Event> {
        self.session.as_ref().and_then(|s| s.pending.as_ref())
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.state().map(GameState::snapshot)
    }
}

/// The running session, refusing when none exists or it has ended.
fn active(session: &mut Option<Session>) -> Result<&mut Session> {
    let session = session
        .as_mut()
        .ok_or(EngineError::IllegalState(IllegalState::NoSession))?;
    if session.state.terminated {
        return Err(EngineError::IllegalState(IllegalState::Terminated));
    }
    Ok(session)
}

fn present(state: &mut GameState, event: &Event) {
    state.record(format!("Day {}: {}", state.day, event.title), Severity::Normal);
    state.record(event.description.clone(), Severity::Normal);
}

fn apply_choice(state: &mut GameState, choice: &Choice) -> ChoiceResult {
    for effect in &choice.effects {
        if state.adjust(effect.stat, effect.delta) {
            debug!(stat = %effect.stat, delta = effect.delta, "Effect applied");
        } else {
            warn!(stat = %effect.stat, role = %state.role, "Effect skipped for foreign stat");
        }
    }
    state.record(format!("> {}", choice.label), Severity::Choice);
    state.record(choice.outcome.clone(), Severity::Normal);

    ChoiceResult {
        terminated: terminate_if_crossed(state).is_some(),
    }
}

fn apply_passive_effects(state: &mut GameState) {
    match state.role {
        Role::Denizen => {
            state.adjust(DenizenStat::Hunger, 10);
            state.adjust(DenizenStat::Suspicion, -5);
            if state
                .value(DenizenStat::Hunger)
                .is_some_and(|hunger| hunger >= STARVATION_THRESHOLD)
            {
                state.record("You are starving...", Severity::Warning);
                state.adjust(DenizenStat::Health, -10);
            }
        }
        Role::Occupier => {
            state.adjust(OccupierStat::Unrest, 5);
            state.adjust(OccupierStat::Resources, -5);
        }
    }
}

fn terminate_if_crossed(state: &mut GameState) -> Option<&'static str> {
    let reason = termination_reason(state)?;
    state.terminated = true;
    state.termination_reason = Some(reason.to_string());
    state.record("GAME OVER", Severity::Warning);
    state.record(reason, Severity::Warning);
    info!(day = state.day, role = %state.role, reason, "Session terminated");
    Some(reason)
}
