//! Player character entity with synchronous change notifications.

pub mod config;
pub mod error;
pub mod notify;
pub mod player;
pub mod rng;

pub use config::{GameConfig, PlayerSettings, SleepSettings};
pub use error::ConfigError;
pub use notify::{Notifier, PlayerSlept, Property, PropertyChanged, SubscriptionId};
pub use player::{PlayerCharacter, PlayerSnapshot, DEFAULT_WEAPONS};
pub use rng::SleepRng;
