//! The player character entity.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{GameConfig, PlayerSettings, SleepSettings};
use crate::error::ConfigError;
use crate::notify::{Notifier, PlayerSlept, Property, PropertyChanged, SubscriptionId};
use crate::rng::SleepRng;

/// Loadout every character starts with, in order.
pub const DEFAULT_WEAPONS: [&str; 3] = ["Long Bow", "Short Bow", "Short Sword"];

/// A single player character: identity, health and starting weapons.
///
/// Health changes raise [`PropertyChanged`] for [`Property::Health`] after the
/// new value is stored. [`PlayerCharacter::sleep`] additionally raises
/// [`PlayerSlept`] once the bonus has been applied.
#[derive(Debug)]
pub struct PlayerCharacter {
    first_name: String,
    last_name: String,
    nickname: Option<String>,
    health: u32,
    damage_taken: u64,
    weapons: Vec<String>,
    settings: PlayerSettings,
    sleep: SleepSettings,
    rng: SleepRng,
    player_slept: Notifier<PlayerSlept>,
    property_changed: Notifier<PropertyChanged>,
}

impl PlayerCharacter {
    pub fn new() -> Self {
        Self::from_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// Default character whose sleep bonuses come from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_config(GameConfig {
            sleep: SleepSettings::from_seed(seed),
            ..GameConfig::default()
        })
    }

    fn from_config(config: GameConfig) -> Self {
        let GameConfig { player, sleep } = config;
        Self {
            first_name: String::new(),
            last_name: String::new(),
            nickname: None,
            health: player.starting_health,
            damage_taken: 0,
            weapons: DEFAULT_WEAPONS.iter().map(|w| w.to_string()).collect(),
            rng: SleepRng::new(sleep.seed),
            settings: player,
            sleep,
            player_slept: Notifier::new(),
            property_changed: Notifier::new(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
        debug!(target: "game_engine.player", first_name = %self.first_name, "first name set");
        self.notify(Property::FirstName);
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
        debug!(target: "game_engine.player", last_name = %self.last_name, "last name set");
        self.notify(Property::LastName);
    }

    /// `first_name`, a space, then `last_name`, exactly as stored.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn set_nickname(&mut self, nickname: impl Into<String>) {
        self.nickname = Some(nickname.into());
        self.notify(Property::Nickname);
    }

    pub fn clear_nickname(&mut self) {
        self.nickname = None;
        self.notify(Property::Nickname);
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.settings.max_health
    }

    /// Total damage absorbed over the character's lifetime.
    pub fn damage_taken(&self) -> u64 {
        self.damage_taken
    }

    pub fn is_noob(&self) -> bool {
        self.damage_taken < self.settings.veteran_after_damage
    }

    pub fn weapons(&self) -> &[String] {
        &self.weapons
    }

    pub fn sleep_seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Restores a seeded bonus of health, capped at `max_health`, and returns
    /// the amount actually gained.
    pub fn sleep(&mut self) -> u32 {
        let bonus = self
            .rng
            .gen_range(self.sleep.min_bonus..=self.sleep.max_bonus);
        let before = self.health;
        self.health = before.saturating_add(bonus).min(self.settings.max_health);
        let gained = self.health - before;
        info!(
            target: "game_engine.player",
            health = self.health,
            max = self.settings.max_health,
            bonus,
            gained,
            "slept"
        );
        self.notify(Property::Health);
        self.player_slept.emit(&PlayerSlept);
        gained
    }

    /// Health never drops below zero. Returns the new health.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let absorbed = damage.min(self.health);
        self.health -= absorbed;
        self.damage_taken = self.damage_taken.saturating_add(u64::from(absorbed));
        info!(
            target: "game_engine.player",
            health = self.health,
            damage,
            absorbed,
            "health updated"
        );
        self.notify(Property::Health);
        self.health
    }

    pub fn on_player_slept(
        &mut self,
        handler: impl FnMut(&PlayerSlept) + 'static,
    ) -> SubscriptionId {
        self.player_slept.subscribe(handler)
    }

    pub fn unsubscribe_player_slept(&mut self, id: SubscriptionId) -> bool {
        self.player_slept.unsubscribe(id)
    }

    pub fn on_property_changed(
        &mut self,
        handler: impl FnMut(&PropertyChanged) + 'static,
    ) -> SubscriptionId {
        self.property_changed.subscribe(handler)
    }

    pub fn unsubscribe_property_changed(&mut self, id: SubscriptionId) -> bool {
        self.property_changed.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.player_slept.len() + self.property_changed.len()
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            full_name: self.full_name(),
            nickname: self.nickname.clone(),
            health: self.health,
            is_noob: self.is_noob(),
            weapons: self.weapons.clone(),
        }
    }

    fn notify(&mut self, property: Property) {
        self.property_changed.emit(&PropertyChanged { property });
    }
}

impl Default for PlayerCharacter {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only copy of a character's observable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub nickname: Option<String>,
    pub health: u32,
    pub is_noob: bool,
    pub weapons: Vec<String>,
}
