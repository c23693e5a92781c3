//! Simulation settings
//!
//! Loaded from a JSON file by the host; every field has a default so partial
//! files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{CHAIN_EXPLOSION_DELAY_MS, COUNTER_ATTACK_DELAY_MS, DEFAULT_TICK_RATE_HZ};
use crate::sim::WeaponId;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tick rate must be positive")]
    InvalidTickRate,
    #[error("viewport must be positive and finite, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (same seed + same inputs = same run)
    pub seed: u64,
    /// Host refresh rate, used to turn millisecond delays into ticks
    pub tick_rate_hz: u32,
    /// Viewport size; planets sit at its center
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Delay before the secondary bursts of a chain explosion
    pub chain_explosion_delay_ms: u32,
    /// Delay between a defense arming and its counter-attack
    pub counter_attack_delay_ms: u32,
    /// Weapon selected at startup
    pub starting_weapon: WeaponId,
    /// Planet selected at startup
    pub starting_target: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            chain_explosion_delay_ms: CHAIN_EXPLOSION_DELAY_MS,
            counter_attack_delay_ms: COUNTER_ATTACK_DELAY_MS,
            starting_weapon: WeaponId::Rocket,
            starting_target: "earth".to_string(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::InvalidTickRate);
        }
        let (width, height) = (self.viewport_width, self.viewport_height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        Ok(())
    }

    /// Convert a wall-clock delay to a tick count (at least one tick)
    pub fn delay_ticks(&self, ms: u32) -> u64 {
        let ticks = (u64::from(ms) * u64::from(self.tick_rate_hz)).div_ceil(1000);
        ticks.max(1)
    }

    pub fn chain_explosion_delay_ticks(&self) -> u64 {
        self.delay_ticks(self.chain_explosion_delay_ms)
    }

    pub fn counter_attack_delay_ticks(&self) -> u64 {
        self.delay_ticks(self.counter_attack_delay_ms)
    }
}
