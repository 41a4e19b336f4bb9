//! Narrative events offered to the player each day.

use rand::{Rng, RngCore};
use serde::Serialize;

use crate::role::StatKey;

/// An event the player must respond to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub title: String,
    /// What is happening.
    pub description: String,
    /// Optional scene illustration.
    pub image: Option<String>,
    /// Available responses, in display order.
    pub choices: Vec<Choice>,
}

/// A possible response to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    /// Narrative text logged once the choice is taken.
    pub outcome: String,
    /// Stat deltas applied in order.
    pub effects: Vec<Effect>,
}

/// A single stat delta carried by a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Effect {
    pub stat: StatKey,
    pub delta: i32,
}

impl Event {
    /// Position of `choice` among this event's choices.
    pub fn position_of(&self, choice: &Choice) -> Option<usize> {
        self.choices.iter().position(|c| c == choice)
    }
}

/// Source of the indices used to draw events from a pool.
///
/// Implementations must return a value below `len` whenever `len > 0`.
pub trait RandomSource {
    fn next_index(&mut self, len: usize) -> usize;
}

impl<R: RngCore> RandomSource for R {
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::DenizenStat;
    use rand::SeedableRng;

    fn make_event() -> Event {
        Event {
            title: "Test".to_string(),
            description: "Something happens".to_string(),
            image: None,
            choices: vec![
                Choice {
                    label: "Option A".to_string(),
                    outcome: "A happened".to_string(),
                    effects: vec![Effect {
                        stat: DenizenStat::Health.into(),
                        delta: -5,
                    }],
                },
                Choice {
                    label: "Option B".to_string(),
                    outcome: "B happened".to_string(),
                    effects: vec![],
                },
            ],
        }
    }

    #[test]
    fn position_of_finds_offered_choice() {
        let event = make_event();
        assert_eq!(event.position_of(&event.choices[1]), Some(1));
    }

    #[test]
    fn position_of_rejects_foreign_choice() {
        let event = make_event();
        let mut foreign = event.choices[0].clone();
        foreign.effects[0].delta = -50;
        assert_eq!(event.position_of(&foreign), None);
    }

    #[test]
    fn rng_source_stays_in_range() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for len in 1..10 {
            for _ in 0..50 {
                assert!(rng.next_index(len) < len);
            }
        }
        assert_eq!(rng.next_index(0), 0);
    }
}
