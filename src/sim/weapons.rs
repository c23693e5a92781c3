//! Weapon catalog
//!
//! Static ballistic/damage/visual parameters for every weapon the player can
//! fire. Lookups are total: an unrecognised name resolves to the rocket.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::entity::ParticleKind;

/// Weapon identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeaponId {
    #[default]
    Rocket,
    GuidedMissile,
    Laser,
    BurstLaser,
    SuperLaser,
    Asteroid,
    Bomb,
    BlackHole,
    Railgun,
    FreezeRay,
}

impl WeaponId {
    pub const ALL: [WeaponId; 10] = [
        WeaponId::Rocket,
        WeaponId::GuidedMissile,
        WeaponId::Laser,
        WeaponId::BurstLaser,
        WeaponId::SuperLaser,
        WeaponId::Asteroid,
        WeaponId::Bomb,
        WeaponId::BlackHole,
        WeaponId::Railgun,
        WeaponId::FreezeRay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponId::Rocket => "rocket",
            WeaponId::GuidedMissile => "guided-missile",
            WeaponId::Laser => "laser",
            WeaponId::BurstLaser => "burst-laser",
            WeaponId::SuperLaser => "super-laser",
            WeaponId::Asteroid => "asteroid",
            WeaponId::Bomb => "bomb",
            WeaponId::BlackHole => "black-hole",
            WeaponId::Railgun => "railgun",
            WeaponId::FreezeRay => "freeze-ray",
        }
    }

    /// Strict lookup by name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }

    /// Lenient lookup by name; unknown names fall back to the rocket
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            log::debug!("Unknown weapon '{}', using rocket", name);
            WeaponId::Rocket
        })
    }

    /// Particle family spawned when this weapon lands a hit
    pub fn effect_kind(&self) -> ParticleKind {
        match self {
            WeaponId::Rocket | WeaponId::GuidedMissile | WeaponId::Bomb => ParticleKind::Explosion,
            WeaponId::Laser => ParticleKind::Burn,
            WeaponId::BurstLaser => ParticleKind::Energy,
            WeaponId::SuperLaser => ParticleKind::Plasma,
            WeaponId::Asteroid => ParticleKind::Debris,
            WeaponId::BlackHole => ParticleKind::Void,
            WeaponId::Railgun => ParticleKind::Electric,
            WeaponId::FreezeRay => ParticleKind::Ice,
        }
    }
}

bitflags! {
    /// Capability set copied onto each projectile at spawn
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Capabilities: u16 {
        const EXPLOSIVE = 1 << 0;
        const GUIDED = 1 << 1;
        const INSTANT = 1 << 2;
        const PENETRATING = 1 << 3;
        const BURST = 1 << 4;
        const PIERCING = 1 << 5;
        const SHOCKWAVE = 1 << 6;
        const MASSIVE = 1 << 7;
        const GRAVITY = 1 << 8;
        const CHAIN_EXPLOSION = 1 << 9;
        const AREA_EFFECT = 1 << 10;
        const GRAVITATIONAL = 1 << 11;
        const ABSORPTION = 1 << 12;
        const ELECTROMAGNETIC = 1 << 13;
        const FREEZING = 1 << 14;
        const SLOWING = 1 << 15;
    }
}

/// A single capability, for exhaustive dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Explosive,
    Guided,
    Instant,
    Penetrating,
    Burst,
    Piercing,
    Shockwave,
    Massive,
    Gravity,
    ChainExplosion,
    AreaEffect,
    Gravitational,
    Absorption,
    Electromagnetic,
    Freezing,
    Slowing,
}

impl Capability {
    pub const ALL: [Capability; 16] = [
        Capability::Explosive,
        Capability::Guided,
        Capability::Instant,
        Capability::Penetrating,
        Capability::Burst,
        Capability::Piercing,
        Capability::Shockwave,
        Capability::Massive,
        Capability::Gravity,
        Capability::ChainExplosion,
        Capability::AreaEffect,
        Capability::Gravitational,
        Capability::Absorption,
        Capability::Electromagnetic,
        Capability::Freezing,
        Capability::Slowing,
    ];

    pub fn flag(self) -> Capabilities {
        match self {
            Capability::Explosive => Capabilities::EXPLOSIVE,
            Capability::Guided => Capabilities::GUIDED,
            Capability::Instant => Capabilities::INSTANT,
            Capability::Penetrating => Capabilities::PENETRATING,
            Capability::Burst => Capabilities::BURST,
            Capability::Piercing => Capabilities::PIERCING,
            Capability::Shockwave => Capabilities::SHOCKWAVE,
            Capability::Massive => Capabilities::MASSIVE,
            Capability::Gravity => Capabilities::GRAVITY,
            Capability::ChainExplosion => Capabilities::CHAIN_EXPLOSION,
            Capability::AreaEffect => Capabilities::AREA_EFFECT,
            Capability::Gravitational => Capabilities::GRAVITATIONAL,
            Capability::Absorption => Capabilities::ABSORPTION,
            Capability::Electromagnetic => Capabilities::ELECTROMAGNETIC,
            Capability::Freezing => Capabilities::FREEZING,
            Capability::Slowing => Capabilities::SLOWING,
        }
    }
}

impl Capabilities {
    /// Individual capabilities in declaration order
    pub fn each(self) -> impl Iterator<Item = Capability> {
        Capability::ALL
            .into_iter()
            .filter(move |cap| self.contains(cap.flag()))
    }
}

/// Trail hint for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrailStyle {
    Plain,
    Smoke,
    Fire,
}

/// Immutable weapon parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponSpec {
    pub id: WeaponId,
    /// Distance travelled per tick
    pub speed: f32,
    pub damage: f32,
    /// 0xRRGGBB
    pub color: u32,
    /// Ticks before an airborne projectile fizzles
    pub lifetime_ticks: u32,
    pub capabilities: Capabilities,
    pub trail: TrailStyle,
}

const CATALOG: [WeaponSpec; 10] = [
    WeaponSpec {
        id: WeaponId::Rocket,
        speed: 3.0,
        damage: 25.0,
        color: 0xff6b35,
        lifetime_ticks: 2000,
        capabilities: Capabilities::EXPLOSIVE,
        trail: TrailStyle::Smoke,
    },
    WeaponSpec {
        id: WeaponId::GuidedMissile,
        speed: 2.0,
        damage: 30.0,
        color: 0xff3333,
        lifetime_ticks: 3000,
        capabilities: Capabilities::GUIDED,
        trail: TrailStyle::Fire,
    },
    WeaponSpec {
        id: WeaponId::Laser,
        speed: 15.0,
        damage: 15.0,
        color: 0x00ff00,
        lifetime_ticks: 100,
        capabilities: Capabilities::INSTANT.union(Capabilities::PENETRATING),
        trail: TrailStyle::Plain,
    },
    WeaponSpec {
        id: WeaponId::BurstLaser,
        speed: 12.0,
        damage: 40.0,
        color: 0xffff00,
        lifetime_ticks: 200,
        capabilities: Capabilities::BURST.union(Capabilities::EXPLOSIVE),
        trail: TrailStyle::Plain,
    },
    WeaponSpec {
        id: WeaponId::SuperLaser,
        speed: 20.0,
        damage: 80.0,
        color: 0xff00ff,
        lifetime_ticks: 150,
        capabilities: Capabilities::PIERCING.union(Capabilities::SHOCKWAVE),
        trail: TrailStyle::Plain,
    },
    WeaponSpec {
        id: WeaponId::Asteroid,
        speed: 1.5,
        damage: 60.0,
        color: 0x8b4513,
        lifetime_ticks: 4000,
        capabilities: Capabilities::MASSIVE.union(Capabilities::GRAVITY),
        trail: TrailStyle::Plain,
    },
    WeaponSpec {
        id: WeaponId::Bomb,
        speed: 2.5,
        damage: 50.0,
        color: 0x333333,
        lifetime_ticks: 2500,
        capabilities: Capabilities::CHAIN_EXPLOSION.union(Capabilities::AREA_EFFECT),
        trail: TrailStyle::Plain,
    },
    WeaponSpec {
        id: WeaponId::BlackHole,
        speed: 1.0,
        damage: 100.0,
        color: 0x000000,
        lifetime_ticks: 5000,
        capabilities: Capabilities::GRAVITATIONAL.union(Capabilities::ABSORPTION),
        trail: TrailStyle::Plain,
    },
    WeaponSpec {
        id: WeaponId::Railgun,
        speed: 25.0,
        damage: 45.0,
        color: 0x00ffff,
        lifetime_ticks: 80,
        capabilities: Capabilities::ELECTROMAGNETIC.union(Capabilities::PIERCING),
        trail: TrailStyle::Plain,
    },
    WeaponSpec {
        id: WeaponId::FreezeRay,
        speed: 8.0,
        damage: 20.0,
        color: 0x87ceeb,
        lifetime_ticks: 1500,
        capabilities: Capabilities::FREEZING.union(Capabilities::SLOWING),
        trail: TrailStyle::Plain,
    },
];

/// Look up a weapon's parameters
pub fn spec_for(id: WeaponId) -> &'static WeaponSpec {
    // CATALOG is declared in WeaponId::ALL order
    &CATALOG[id as usize]
}

/// Look up by name, falling back to the rocket
pub fn spec_for_name(name: &str) -> &'static WeaponSpec {
    spec_for(WeaponId::from_name(name))
}
