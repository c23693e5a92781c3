//! Planet Strike - A planet bombardment sandbox
//!
//! Core modules:
//! - `sim`: Deterministic combat simulation (projectiles, impacts, planetary defense)
//! - `settings`: Simulation configuration loaded from JSON
//!
//! Rendering and input wiring live outside this crate; a host drives
//! [`sim::tick`] once per frame and draws from [`sim::SimulationState::snapshot`].

pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Settings};

use glam::Vec2;

/// Simulation constants
///
/// Every motion value is a fixed per-tick delta (one tick = one rendered frame).
pub mod consts {
    /// Extra distance beyond a planet's radius that still counts as a hit
    pub const HIT_MARGIN: f32 = 10.0;
    /// Projectile trail length (positions)
    pub const TRAIL_LENGTH: usize = 20;

    /// Fraction of incoming damage a shield soaks up
    pub const SHIELD_ABSORPTION: f32 = 0.7;
    /// Passive shield regeneration per tick
    pub const SHIELD_REGEN_PER_TICK: f32 = 0.1;
    /// Integrity lost = damage / INTEGRITY_DAMAGE_DIVISOR
    pub const INTEGRITY_DAMAGE_DIVISOR: f32 = 10.0;
    /// Population lost per point of damage
    pub const POPULATION_PER_DAMAGE: f64 = 1e8;
    /// Crater size = damage / CRATER_SIZE_DIVISOR
    pub const CRATER_SIZE_DIVISOR: f32 = 5.0;
    /// Crater depth = damage / CRATER_DEPTH_DIVISOR
    pub const CRATER_DEPTH_DIVISOR: f32 = 10.0;

    /// Velocity damping applied to every particle each tick
    pub const PARTICLE_DAMPING: f32 = 0.98;
    /// Downward acceleration for debris particles (screen space, +y is down)
    pub const DEBRIS_GRAVITY: f32 = 0.1;

    /// Default host refresh rate
    pub const DEFAULT_TICK_RATE_HZ: u32 = 60;
    /// Wall-clock delay before chain explosion bursts
    pub const CHAIN_EXPLOSION_DELAY_MS: u32 = 200;
    /// Wall-clock delay between a defense arming and its counter-attack launch
    pub const COUNTER_ATTACK_DELAY_MS: u32 = 1000;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
