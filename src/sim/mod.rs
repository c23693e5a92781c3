//! Deterministic simulation module
//!
//! All combat logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick deltas only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Delays measured in ticks, never wall-clock time
//! - No rendering or platform dependencies

pub mod defense;
pub mod effects;
pub mod entity;
pub mod impact;
pub mod pool;
pub mod schedule;
pub mod state;
pub mod target;
pub mod tick;
pub mod weapons;

pub use defense::{DefenseKind, DefensePhase, DefenseSystem};
pub use entity::{CounterAttack, CounterAttackKind, Motion, Particle, ParticleKind, Projectile};
pub use impact::{ImpactResult, Outcome};
pub use pool::Pool;
pub use schedule::{ScheduledEffect, Scheduler};
pub use state::{GameEvent, SimulationState, Snapshot};
pub use target::{Crater, Target, stock_planets};
pub use tick::{TickInput, tick};
pub use weapons::{Capabilities, Capability, WeaponId, WeaponSpec, spec_for, spec_for_name};
