//! Built-in narrative content and day-by-day event selection.

use tracing::debug;

use crate::event::{Choice, Effect, Event, RandomSource};
use crate::role::{DenizenStat, Location, OccupierStat, Role, StatKey};

/// Immutable content an [`Event`] is instantiated from.
#[derive(Debug)]
pub struct EventTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub image: Option<&'static str>,
    pub choices: &'static [ChoiceTemplate],
}

#[derive(Debug)]
pub struct ChoiceTemplate {
    pub label: &'static str,
    pub outcome: &'static str,
    pub effects: &'static [(StatKey, i32)],
}

impl EventTemplate {
    /// Produce an owned event that shares nothing with the template.
    pub fn instantiate(&self) -> Event {
        Event {
            title: self.title.to_string(),
            description: self.description.to_string(),
            image: self.image.map(str::to_string),
            choices: self.choices.iter().map(ChoiceTemplate::instantiate).collect(),
        }
    }
}

impl ChoiceTemplate {
    fn instantiate(&self) -> Choice {
        Choice {
            label: self.label.to_string(),
            outcome: self.outcome.to_string(),
            effects: self
                .effects
                .iter()
                .map(|&(stat, delta)| Effect { stat, delta })
                .collect(),
        }
    }
}

const HUNGER: StatKey = StatKey::Denizen(DenizenStat::Hunger);
const SUSPICION: StatKey = StatKey::Denizen(DenizenStat::Suspicion);
const HEALTH: StatKey = StatKey::Denizen(DenizenStat::Health);
const SUPPLIES: StatKey = StatKey::Denizen(DenizenStat::Supplies);

const CONTROL: StatKey = StatKey::Occupier(OccupierStat::Control);
const RESOURCES: StatKey = StatKey::Occupier(OccupierStat::Resources);
const UNREST: StatKey = StatKey::Occupier(OccupierStat::Unrest);
const MANPOWER: StatKey = StatKey::Occupier(OccupierStat::Manpower);

// ============================================================================
// Scripted Opening
// ============================================================================

/// The Denizen's first day. Its title is replaced per location.
pub static SIEGE_OPENING: EventTemplate = EventTemplate {
    title: "Midtown Under Siege",
    description: "You are a mid-level corporate analyst for OmniCorp. The morning coffee is \
        still warm on your desk when the first explosion shatters the glass. Looking out from \
        the 40th floor, you see a rocket impact the adjacent tower. The invasion has begun. \
        You have split seconds to react.",
    image: Some("midtown_attack.jpg"),
    choices: &[
        ChoiceTemplate {
            label: "Grab Emergency Kit & Stairs",
            outcome: "You knew this day might come. You grab your 'go-bag' from under the desk \
                and hit the fire stairs. You preserve your health but leave suspicious.",
            effects: &[(SUSPICION, 10), (HEALTH, 0), (SUPPLIES, 10)],
        },
        ChoiceTemplate {
            label: "Download Data & Run",
            outcome: "This data could be valuable leverage. You secure the drive but inhale \
                smoke on the way out.",
            effects: &[(SUSPICION, 0), (HEALTH, -10), (SUPPLIES, 0)],
        },
        ChoiceTemplate {
            label: "Help Coworkers",
            outcome: "You stop to help Karen from HR. It slows you down, and you witness \
                horrors you can't unsee.",
            // TODO: restore the morale hit once content decides which stat it maps to.
            effects: &[(HEALTH, -5), (SUSPICION, -5)],
        },
    ],
};

/// Title of the scripted opening for a given city.
pub fn siege_title(location: Location) -> &'static str {
    match location {
        Location::Portland => "Downtown Under Siege",
        Location::NewYork => "Manhattan Under Siege",
    }
}

// ============================================================================
// Denizen Pool
// ============================================================================

pub static DENIZEN_EVENTS: &[EventTemplate] = &[
    EventTemplate {
        title: "A Knock at the Door",
        description: "Controls are tightening. Neighbors say patrols are checking random \
            houses for contraband.",
        image: None,
        choices: &[
            ChoiceTemplate {
                label: "Hide Supplies",
                outcome: "You hid your meager supplies under the floorboards. Safe, but \
                    you're exhausted.",
                effects: &[(SUSPICION, -10), (HUNGER, 5), (SUPPLIES, 0)],
            },
            ChoiceTemplate {
                label: "Bribe Patrol",
                outcome: "You gave them some food. They left you alone, for now.",
                effects: &[(SUSPICION, -20), (SUPPLIES, -2)],
            },
            ChoiceTemplate {
                label: "Do Nothing",
                outcome: "You sat in silence. They walked past.",
                effects: &[(SUSPICION, 5)],
            },
        ],
    },
    EventTemplate {
        title: "The Market Leak",
        description: "A truck carrying rations crashed nearby. People are swarming.",
        image: None,
        choices: &[
            ChoiceTemplate {
                label: "Join the crowd",
                outcome: "You managed to grab a box, but got bruised in the chaos.",
                effects: &[(SUPPLIES, 5), (HEALTH, -5), (SUSPICION, 10)],
            },
            ChoiceTemplate {
                label: "Stay away",
                outcome: "Too dangerous. You come home empty handed.",
                effects: &[(HUNGER, 5)],
            },
        ],
    },
    EventTemplate {
        title: "Curfew Violation",
        description: "You are caught outside just as the sirens wail.",
        image: None,
        choices: &[
            ChoiceTemplate {
                label: "Run",
                outcome: "You dart down an alleyway. Heart pounding.",
                effects: &[(SUSPICION, 20), (HUNGER, 5)],
            },
            ChoiceTemplate {
                label: "Hide in dumpster",
                outcome: "It smells awful, but they didn't see you.",
                effects: &[(HEALTH, -5), (SUSPICION, -5)],
            },
        ],
    },
];

// ============================================================================
// Occupier Pool
// ============================================================================

pub static OCCUPIER_EVENTS: &[EventTemplate] = &[
    EventTemplate {
        title: "Food Riots",
        description: "Citizens in Sector 4 are protesting the rationing.",
        image: None,
        choices: &[
            ChoiceTemplate {
                label: "Crackdown",
                outcome: "You sent in the riot squad. Order restored, but they hate you.",
                effects: &[(CONTROL, 10), (UNREST, 10), (MANPOWER, -5)],
            },
            ChoiceTemplate {
                label: "Distribute Extra Rations",
                outcome: "The crowd disperses peacefully. Supplies are low.",
                effects: &[(UNREST, -10), (RESOURCES, -20)],
            },
        ],
    },
    EventTemplate {
        title: "The Informant",
        description: "A local offers information on the resistance leader in exchange for \
            medicine.",
        image: None,
        choices: &[
            ChoiceTemplate {
                label: "Accept Deal",
                outcome: "The info was good. We made several arrests.",
                effects: &[(CONTROL, 15), (RESOURCES, -10)],
            },
            ChoiceTemplate {
                label: "Ignore",
                outcome: "Likely a trap or beggar. You ignore them.",
                effects: &[(CONTROL, -5)],
            },
        ],
    },
];

/// Random event pool for a role.
pub fn pool(role: Role) -> &'static [EventTemplate] {
    match role {
        Role::Denizen => DENIZEN_EVENTS,
        Role::Occupier => OCCUPIER_EVENTS,
    }
}

/// Pick the event for `day`.
///
/// The Denizen's first day is always the scripted opening, retitled for the
/// city. Every other day draws uniformly from the role's own pool.
pub fn select_event<R>(role: Role, day: u32, location: Location, rng: &mut R) -> Event
where
    R: RandomSource + ?Sized,
{
    if day == 1 && role == Role::Denizen {
        let mut event = SIEGE_OPENING.instantiate();
        event.title = siege_title(location).to_string();
        debug!(%role, day, title = %event.title, "Scripted event selected");
        return event;
    }

    let pool = pool(role);
    let index = rng.next_index(pool.len()).min(pool.len() - 1);
    let event = pool[index].instantiate();
    debug!(%role, day, index, title = %event.title, "Event drawn from pool");
    event
}
