//! Planetary defense
//!
//! A planet that takes real damage while its defenses are idle arms them,
//! raises a warning, and launches a counter-attack after a short delay.
//! Further hits during the cooldown are ignored.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{CounterAttack, CounterAttackKind};
use super::schedule::{ScheduledEffect, Scheduler};
use super::state::GameEvent;
use super::target::Target;
use crate::polar_to_cartesian;

/// Counter-attack flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefenseKind {
    Storm,
    Lava,
    Acid,
    Lightning,
}

/// How launch angles are chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spread {
    /// Evenly spaced around the planet, plus up to `jitter` radians
    Even { jitter: f32 },
    /// Uniformly random angle per attack
    Random,
}

/// Launch parameters for one defense kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAttackParams {
    pub count: u32,
    pub spread: Spread,
    /// Added to the planet radius to get the spawn distance
    pub radius_offset: f32,
    pub speed: f32,
    pub damage: f32,
    pub lifetime: u32,
    pub color: u32,
    pub size: f32,
    pub kind: CounterAttackKind,
}

impl DefenseKind {
    pub fn params(self) -> &'static CounterAttackParams {
        const STORM: CounterAttackParams = CounterAttackParams {
            count: 5,
            spread: Spread::Even { jitter: 0.5 },
            radius_offset: 50.0,
            speed: 3.0,
            damage: 15.0,
            lifetime: 200,
            color: 0x666666,
            size: 8.0,
            kind: CounterAttackKind::Debris,
        };
        const LAVA: CounterAttackParams = CounterAttackParams {
            count: 8,
            spread: Spread::Random,
            radius_offset: 30.0,
            speed: 4.0,
            damage: 20.0,
            lifetime: 150,
            color: 0xff4500,
            size: 6.0,
            kind: CounterAttackKind::Lava,
        };
        const ACID: CounterAttackParams = CounterAttackParams {
            count: 12,
            spread: Spread::Random,
            radius_offset: 40.0,
            speed: 2.0,
            damage: 10.0,
            lifetime: 300,
            color: 0x90ee90,
            size: 4.0,
            kind: CounterAttackKind::Acid,
        };
        const LIGHTNING: CounterAttackParams = CounterAttackParams {
            count: 3,
            spread: Spread::Random,
            radius_offset: 100.0,
            speed: 8.0,
            damage: 35.0,
            lifetime: 60,
            color: 0xffff00,
            size: 3.0,
            kind: CounterAttackKind::Lightning,
        };

        match self {
            DefenseKind::Storm => &STORM,
            DefenseKind::Lava => &LAVA,
            DefenseKind::Acid => &ACID,
            DefenseKind::Lightning => &LIGHTNING,
        }
    }
}

/// Observable defense state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DefensePhase {
    Idle,
    Cooldown,
}

/// A planet's defense system
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefenseSystem {
    pub kind: DefenseKind,
    pub max_cooldown: u32,
    /// Ticks until the system can arm again
    pub cooldown: u32,
}

impl DefenseSystem {
    pub fn new(kind: DefenseKind, max_cooldown: u32) -> Self {
        Self {
            kind,
            max_cooldown,
            cooldown: 0,
        }
    }

    pub fn phase(&self) -> DefensePhase {
        if self.cooldown == 0 {
            DefensePhase::Idle
        } else {
            DefensePhase::Cooldown
        }
    }

    /// Arm if idle. Returns false (and changes nothing) while cooling down.
    pub fn try_arm(&mut self) -> bool {
        if self.cooldown > 0 {
            return false;
        }
        self.cooldown = self.max_cooldown;
        true
    }

    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }
}

/// Warning text shown when a planet's defenses arm
pub fn warning_message(name: &str) -> String {
    format!("{} is counter-attacking!", name)
}

/// React to a damaging hit on `target`.
///
/// Arms the defense if idle, emits a warning and schedules the launch at
/// `launch_tick`. Returns whether the defense armed.
pub fn trigger(
    target: &mut Target,
    scheduler: &mut Scheduler,
    events: &mut Vec<GameEvent>,
    launch_tick: u64,
) -> bool {
    if !target.defense.try_arm() {
        return false;
    }

    log::info!(
        "{} defenses armed ({:?}), launching at tick {}",
        target.name,
        target.defense.kind,
        launch_tick
    );
    events.push(GameEvent::Warning {
        target_id: target.id.clone(),
        message: warning_message(&target.name),
    });
    scheduler.schedule(
        launch_tick,
        ScheduledEffect::CounterAttack {
            target_id: target.id.clone(),
            generation: target.generation,
        },
    );
    true
}

/// Build the counter-attack wave for `target` from its defense table
pub fn launch<R: Rng>(
    target: &Target,
    rng: &mut R,
    mut next_id: impl FnMut() -> u32,
) -> Vec<CounterAttack> {
    let params = target.defense.kind.params();
    let distance = target.radius + params.radius_offset;

    (0..params.count)
        .map(|i| {
            let angle = match params.spread {
                Spread::Even { jitter } => {
                    std::f32::consts::TAU / params.count as f32 * i as f32
                        + rng.random::<f32>() * jitter
                }
                Spread::Random => rng.random::<f32>() * std::f32::consts::TAU,
            };
            let dir = Vec2::new(angle.cos(), angle.sin());
            CounterAttack {
                id: next_id(),
                source: target.id.clone(),
                pos: target.pos + polar_to_cartesian(distance, angle),
                vel: dir * params.speed,
                life: params.lifetime,
                max_life: params.lifetime,
                damage: params.damage,
                color: params.color,
                size: params.size,
                kind: params.kind,
            }
        })
        .collect()
}
