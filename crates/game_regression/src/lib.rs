//! Helpers for deterministic regression tests.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use game_engine::{PlayerCharacter, PlayerSnapshot, Property};
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_SEED: u64 = 42;

/// One scripted step applied to a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Sleep,
    Damage { amount: u32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised action `{0}` (expected `sleep` or `damage:<amount>`)")]
pub struct ParseActionError(String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("sleep") {
            return Ok(Action::Sleep);
        }
        trimmed
            .split_once(':')
            .filter(|(name, _)| name.trim().eq_ignore_ascii_case("damage"))
            .and_then(|(_, amount)| amount.trim().parse().ok())
            .map(|amount| Action::Damage { amount })
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Sleep => f.write_str("sleep"),
            Action::Damage { amount } => write!(f, "damage:{amount}"),
        }
    }
}

/// A notification observed while a step ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    PropertyChanged { property: Property },
    PlayerSlept,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTrace {
    #[serde(flatten)]
    pub action: Action,
    pub health: u32,
    pub events: Vec<SessionEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionTrace {
    pub seed: u64,
    pub steps: Vec<StepTrace>,
    #[serde(rename = "final")]
    pub final_state: PlayerSnapshot,
}

/// Applies `actions` in order to `player`, recording every notification the
/// character raises along the way.
pub fn run_session(player: &mut PlayerCharacter, actions: &[Action]) -> SessionTrace {
    let log: Rc<RefCell<Vec<SessionEvent>>> = Rc::default();
    let changed = {
        let log = Rc::clone(&log);
        player.on_property_changed(move |e| {
            log.borrow_mut().push(SessionEvent::PropertyChanged {
                property: e.property,
            })
        })
    };
    let slept = {
        let log = Rc::clone(&log);
        player.on_player_slept(move |_| log.borrow_mut().push(SessionEvent::PlayerSlept))
    };

    let steps = actions
        .iter()
        .map(|action| {
            match *action {
                Action::Sleep => {
                    player.sleep();
                }
                Action::Damage { amount } => {
                    player.take_damage(amount);
                }
            }
            StepTrace {
                action: *action,
                health: player.health(),
                events: log.borrow_mut().drain(..).collect(),
            }
        })
        .collect();

    player.unsubscribe_property_changed(changed);
    player.unsubscribe_player_slept(slept);

    SessionTrace {
        seed: player.sleep_seed(),
        steps,
        final_state: player.snapshot(),
    }
}

/// Fresh default character driven through a fixed rest-and-fight script.
pub fn scripted_session(seed: u64) -> SessionTrace {
    let mut player = PlayerCharacter::with_seed(seed);
    run_session(
        &mut player,
        &[
            Action::Sleep,
            Action::Damage { amount: 30 },
            Action::Sleep,
            Action::Damage { amount: 250 },
            Action::Sleep,
        ],
    )
}

pub fn trace_json(trace: &SessionTrace) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(trace)
}
