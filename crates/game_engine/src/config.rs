use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_STARTING_HEALTH: u32 = 100;
pub const DEFAULT_MAX_HEALTH: u32 = 200;
pub const DEFAULT_VETERAN_AFTER_DAMAGE: u64 = 100;
pub const DEFAULT_SLEEP_SEED: u64 = 42;
pub const DEFAULT_MIN_SLEEP_BONUS: u32 = 1;
pub const DEFAULT_MAX_SLEEP_BONUS: u32 = 100;

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct GameConfig {
    #[serde(default)]
    pub player: PlayerSettings,
    #[serde(default)]
    pub sleep: SleepSettings,
}

impl GameConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: GameConfig = data.parse()?;
        debug!(target: "game_engine.config", path = %path.display(), "config loaded");
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        let sleep = &self.sleep;
        if player.max_health == 0 {
            return Err(ConfigError::Invalid("player.max_health must be positive".into()));
        }
        if player.starting_health > player.max_health {
            return Err(ConfigError::Invalid(format!(
                "player.starting_health ({}) exceeds player.max_health ({})",
                player.starting_health, player.max_health
            )));
        }
        if player.veteran_after_damage == 0 {
            return Err(ConfigError::Invalid(
                "player.veteran_after_damage must be positive".into(),
            ));
        }
        if sleep.min_bonus == 0 {
            return Err(ConfigError::Invalid("sleep.min_bonus must be positive".into()));
        }
        if sleep.min_bonus > sleep.max_bonus {
            return Err(ConfigError::Invalid(format!(
                "sleep.min_bonus ({}) exceeds sleep.max_bonus ({})",
                sleep.min_bonus, sleep.max_bonus
            )));
        }
        Ok(())
    }
}

impl FromStr for GameConfig {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let cfg: GameConfig = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PlayerSettings {
    pub starting_health: u32,
    pub max_health: u32,
    /// Lifetime damage a character must absorb before it stops being a noob.
    pub veteran_after_damage: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            starting_health: DEFAULT_STARTING_HEALTH,
            max_health: DEFAULT_MAX_HEALTH,
            veteran_after_damage: DEFAULT_VETERAN_AFTER_DAMAGE,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SleepSettings {
    pub seed: u64,
    pub min_bonus: u32,
    pub max_bonus: u32,
}

impl SleepSettings {
    pub fn from_env() -> Self {
        let seed = std::env::var("PLAYER_SLEEP_SEED")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(DEFAULT_SLEEP_SEED);
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

impl Default for SleepSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SLEEP_SEED,
            min_bonus: DEFAULT_MIN_SLEEP_BONUS,
            max_bonus: DEFAULT_MAX_SLEEP_BONUS,
        }
    }
}
