//! Planet state
//!
//! Each planet tracks its shield, structural integrity, population, the craters
//! left on its surface and its defense system.

use glam::Vec2;
use serde::Serialize;

use super::defense::{DefenseKind, DefenseSystem};
use super::weapons::WeaponId;
use crate::consts::*;

/// Surface scar left by a hit (visual only)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crater {
    /// Angle from the planet center to the impact point (radians)
    pub angle: f32,
    pub size: f32,
    pub depth: f32,
    pub weapon: WeaponId,
}

/// A celestial body that can be fired upon
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    pub id: String,
    pub name: String,
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
    pub secondary_color: u32,
    pub atmosphere: f32,
    shield: f32,
    pub max_shield: f32,
    /// Raw integrity; can dip below zero
    integrity: f32,
    population: u64,
    pub max_population: u64,
    pub craters: Vec<Crater>,
    pub defense: DefenseSystem,
    /// Bumped on reset; scheduled effects from older generations are dropped
    pub generation: u32,
}

/// Values needed to build (or rebuild) a stock planet
#[derive(Debug, Clone, Copy)]
struct PlanetTemplate {
    id: &'static str,
    name: &'static str,
    radius: f32,
    color: u32,
    secondary_color: u32,
    population: u64,
    shield: f32,
    atmosphere: f32,
    defense: DefenseKind,
    cooldown: u32,
}

const PLANETS: [PlanetTemplate; 4] = [
    PlanetTemplate {
        id: "earth",
        name: "Earth",
        radius: 120.0,
        color: 0x4a90e2,
        secondary_color: 0x2e7d32,
        population: 7_800_000_000,
        shield: 100.0,
        atmosphere: 0.8,
        defense: DefenseKind::Storm,
        cooldown: 300,
    },
    PlanetTemplate {
        id: "mars",
        name: "Mars",
        radius: 100.0,
        color: 0xd32f2f,
        secondary_color: 0xbf360c,
        population: 0,
        shield: 60.0,
        atmosphere: 0.1,
        defense: DefenseKind::Lava,
        cooldown: 200,
    },
    PlanetTemplate {
        id: "venus",
        name: "Venus",
        radius: 115.0,
        color: 0xffa726,
        secondary_color: 0xff8f00,
        population: 0,
        shield: 150.0,
        atmosphere: 2.0,
        defense: DefenseKind::Acid,
        cooldown: 250,
    },
    PlanetTemplate {
        id: "jupiter",
        name: "Jupiter",
        radius: 200.0,
        color: 0xff7043,
        secondary_color: 0xd84315,
        population: 0,
        shield: 300.0,
        atmosphere: 5.0,
        defense: DefenseKind::Lightning,
        cooldown: 150,
    },
];

/// Build the stock planets, all centered on `center`
pub fn stock_planets(center: Vec2) -> Vec<Target> {
    PLANETS.iter().map(|t| Target::from_template(t, center)).collect()
}

/// Result of applying damage to a planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShieldHit {
    pub absorbed: f32,
    /// Damage left after the shield
    pub remaining: f32,
}

impl Target {
    /// Create a custom planet (full shield, full population, idle defenses)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        pos: Vec2,
        radius: f32,
        max_shield: f32,
        max_population: u64,
        defense: DefenseKind,
        max_cooldown: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pos,
            radius,
            color: 0xffffff,
            secondary_color: 0x888888,
            atmosphere: 0.0,
            shield: max_shield,
            max_shield,
            integrity: 100.0,
            population: max_population,
            max_population,
            craters: Vec::new(),
            defense: DefenseSystem::new(defense, max_cooldown),
            generation: 0,
        }
    }

    fn from_template(t: &PlanetTemplate, center: Vec2) -> Self {
        let mut target = Self::new(
            t.id,
            t.name,
            center,
            t.radius,
            t.shield,
            t.population,
            t.defense,
            t.cooldown,
        );
        target.color = t.color;
        target.secondary_color = t.secondary_color;
        target.atmosphere = t.atmosphere;
        target
    }

    /// Restore stock combat values and invalidate pending scheduled effects.
    ///
    /// Custom planets (not in the stock list) get full shield/population and
    /// a clean surface.
    pub fn reset(&mut self) {
        let generation = self.generation.wrapping_add(1);
        let pos = self.pos;
        if let Some(t) = PLANETS.iter().find(|t| t.id == self.id) {
            *self = Self::from_template(t, pos);
        } else {
            self.shield = self.max_shield;
            self.integrity = 100.0;
            self.population = self.max_population;
            self.craters.clear();
            self.defense.cooldown = 0;
        }
        self.generation = generation;
    }

    pub fn shield(&self) -> f32 {
        self.shield
    }

    pub fn set_shield(&mut self, shield: f32) {
        self.shield = shield.clamp(0.0, self.max_shield);
    }

    /// Shield as a 0-1 ratio (0 when the planet has no shield at all)
    pub fn shield_fraction(&self) -> f32 {
        if self.max_shield > 0.0 {
            self.shield / self.max_shield
        } else {
            0.0
        }
    }

    /// Raw integrity (may be negative after heavy bombardment)
    pub fn integrity(&self) -> f32 {
        self.integrity
    }

    /// Integrity clamped to [0, 100] for display
    pub fn integrity_clamped(&self) -> f32 {
        self.integrity.clamp(0.0, 100.0)
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn is_destroyed(&self) -> bool {
        self.integrity <= 0.0
    }

    /// Let the shield soak up its share of `damage`
    pub fn absorb(&mut self, damage: f32) -> ShieldHit {
        if self.shield <= 0.0 {
            return ShieldHit {
                absorbed: 0.0,
                remaining: damage,
            };
        }
        let absorbed = self.shield.min(damage * SHIELD_ABSORPTION).max(0.0);
        self.shield = (self.shield - absorbed).max(0.0);
        ShieldHit {
            absorbed,
            remaining: damage - absorbed,
        }
    }

    /// Apply post-shield damage to integrity and population
    pub fn apply_damage(&mut self, damage: f32) {
        self.integrity -= damage / INTEGRITY_DAMAGE_DIVISOR;
        let lost = (f64::from(damage) * POPULATION_PER_DAMAGE) as u64;
        self.population = self.population.saturating_sub(lost);
    }

    /// Scar the surface at `impact`
    pub fn add_crater(&mut self, impact: Vec2, damage: f32, weapon: WeaponId) {
        let (_, angle) = crate::cartesian_to_polar(impact - self.pos);
        self.craters.push(Crater {
            angle,
            size: damage / CRATER_SIZE_DIVISOR,
            depth: damage / CRATER_DEPTH_DIVISOR,
            weapon,
        });
    }

    /// Whether `point` is close enough to count as a hit
    pub fn is_hit(&self, point: Vec2) -> bool {
        point.distance(self.pos) <= self.radius + HIT_MARGIN
    }

    /// Per-tick passive systems: shield regeneration and defense cooldown
    pub fn tick_passive(&mut self) {
        if self.shield < self.max_shield {
            self.shield = (self.shield + SHIELD_REGEN_PER_TICK).min(self.max_shield);
        }
        self.defense.tick();
    }
}
