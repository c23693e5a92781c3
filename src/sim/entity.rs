//! Transient simulation entities
//!
//! Projectiles, counter-attacks and particles. Each lives in its own
//! [`Pool`](super::pool::Pool) and is removed only by the tick sweep.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::weapons::{Capabilities, WeaponId, WeaponSpec};
use crate::consts::TRAIL_LENGTH;

/// How a projectile moves each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Motion {
    /// Re-aims at the target's current position every tick
    Homing,
    /// Sits on the target's current position every tick
    Beam,
    /// Fixed velocity chosen at fire time
    Ballistic { vel: Vec2 },
}

impl Motion {
    /// Pick the motion mode for a weapon fired from `origin` at `aim`
    pub fn for_weapon(capabilities: Capabilities, speed: f32, origin: Vec2, aim: Vec2) -> Self {
        if capabilities.contains(Capabilities::GUIDED) {
            Motion::Homing
        } else if capabilities.contains(Capabilities::INSTANT) {
            Motion::Beam
        } else {
            // Fired from the target's center: no direction, the shot stays put
            let vel = (aim - origin)
                .try_normalize()
                .map_or(Vec2::ZERO, |dir| dir * speed);
            Motion::Ballistic { vel }
        }
    }
}

/// A fired shot
#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub id: u32,
    pub weapon: WeaponId,
    pub pos: Vec2,
    pub origin: Vec2,
    /// Target center at fire time
    pub aim: Vec2,
    pub speed: f32,
    /// Damage still carried (shields eat into it on impact)
    pub damage: f32,
    pub color: u32,
    /// Oldest position first
    pub trail: VecDeque<Vec2>,
    pub ttl_ticks: u32,
    pub capabilities: Capabilities,
    pub motion: Motion,
}

impl Projectile {
    pub fn new(id: u32, spec: &WeaponSpec, origin: Vec2, aim: Vec2) -> Self {
        Self {
            id,
            weapon: spec.id,
            pos: origin,
            origin,
            aim,
            speed: spec.speed,
            damage: spec.damage,
            color: spec.color,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
            ttl_ticks: spec.lifetime_ticks,
            capabilities: spec.capabilities,
            motion: Motion::for_weapon(spec.capabilities, spec.speed, origin, aim),
        }
    }

    /// Move one tick toward `target_pos` (the active planet's current center)
    pub fn advance(&mut self, target_pos: Vec2) {
        match self.motion {
            Motion::Homing => {
                if let Some(dir) = (target_pos - self.pos).try_normalize() {
                    self.pos += dir * self.speed;
                }
            }
            Motion::Beam => self.pos = target_pos,
            Motion::Ballistic { vel } => self.pos += vel,
        }
        self.record_trail();
    }

    /// Record current position to trail
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    pub fn is_guided(&self) -> bool {
        self.capabilities.contains(Capabilities::GUIDED)
    }
}

/// Visual family of a planetary counter-attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterAttackKind {
    Debris,
    Lava,
    Acid,
    Lightning,
}

impl CounterAttackKind {
    /// Particle kind used for this attack's trail
    pub fn trail_particle(self) -> ParticleKind {
        match self {
            CounterAttackKind::Debris => ParticleKind::Debris,
            CounterAttackKind::Lava => ParticleKind::Lava,
            CounterAttackKind::Acid => ParticleKind::Acid,
            CounterAttackKind::Lightning => ParticleKind::Lightning,
        }
    }
}

/// A projectile launched by a planet's defenses, radiating outward
#[derive(Debug, Clone, Serialize)]
pub struct CounterAttack {
    pub id: u32,
    /// Planet that launched it
    pub source: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub damage: f32,
    pub color: u32,
    pub size: f32,
    pub kind: CounterAttackKind,
}

/// Particle families, used for color and behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Muzzle,
    ShieldSpark,
    Deflection,
    Explosion,
    Burn,
    Energy,
    Plasma,
    Debris,
    Void,
    Electric,
    Ice,
    Shockwave,
    Lava,
    Acid,
    Lightning,
}

impl ParticleKind {
    /// Default color for impact effects of this family (0xRRGGBB)
    pub fn effect_color(self) -> u32 {
        match self {
            ParticleKind::Burn => 0xff4444,
            ParticleKind::Energy => 0xffff00,
            ParticleKind::Plasma => 0xff00ff,
            ParticleKind::Debris => 0x8b4513,
            ParticleKind::Void => 0x000000,
            ParticleKind::Electric => 0x00ffff,
            ParticleKind::Ice => 0x87ceeb,
            _ => 0xff6b35,
        }
    }

    /// Whether this particle falls under gravity
    pub fn has_gravity(self) -> bool {
        self == ParticleKind::Debris
    }
}

/// A purely cosmetic particle
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: f32,
    pub max_life: f32,
    pub color: u32,
    pub size: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Remaining life as a 0-1 ratio (for fading)
    pub fn fade(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
