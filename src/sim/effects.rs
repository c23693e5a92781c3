//! Particle bursts
//!
//! Every visual effect is a [`Burst`]: a fixed particle count scattered around
//! a point with randomized velocity, life and size. Counts and ranges are
//! part of the visual contract, not tuning knobs.

use glam::Vec2;
use rand::Rng;

use super::entity::{CounterAttack, Particle, ParticleKind};
use super::pool::Pool;
use crate::polar_to_cartesian;

/// Shape of a particle burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub count: usize,
    /// Full width of the position scatter box
    pub spread: f32,
    /// Full width of the velocity scatter box (per axis)
    pub velocity: f32,
    /// Life = life_min + U(0, life_range)
    pub life_min: f32,
    pub life_range: f32,
    pub max_life: f32,
    pub size_min: f32,
    pub size_range: f32,
    pub color: u32,
    pub kind: ParticleKind,
}

pub const MUZZLE_FLASH: Burst = Burst {
    count: 10,
    spread: 20.0,
    velocity: 4.0,
    life_min: 30.0,
    life_range: 20.0,
    max_life: 50.0,
    size_min: 2.0,
    size_range: 3.0,
    color: 0xffffff,
    kind: ParticleKind::Muzzle,
};

pub const SHIELD_SPARKS: Burst = Burst {
    count: 15,
    spread: 30.0,
    velocity: 8.0,
    life_min: 20.0,
    life_range: 15.0,
    max_life: 35.0,
    size_min: 1.0,
    size_range: 2.0,
    color: 0x00ffff,
    kind: ParticleKind::ShieldSpark,
};

pub const IMPACT: Burst = Burst {
    count: 15,
    spread: 40.0,
    velocity: 12.0,
    life_min: 40.0,
    life_range: 30.0,
    max_life: 70.0,
    size_min: 2.0,
    size_range: 4.0,
    color: 0xff6b35,
    kind: ParticleKind::Explosion,
};

/// Impact particle count for explosive weapons
pub const EXPLOSIVE_IMPACT_COUNT: usize = 30;

pub const CHAIN_BURST: Burst = Burst {
    count: 20,
    spread: 30.0,
    velocity: 10.0,
    life_min: 30.0,
    life_range: 20.0,
    max_life: 50.0,
    size_min: 2.0,
    size_range: 3.0,
    color: 0xff3333,
    kind: ParticleKind::Explosion,
};

/// Chain bursts sit this far from the impact, plus U(0, CHAIN_DISTANCE_RANGE)
pub const CHAIN_DISTANCE_MIN: f32 = 50.0;
pub const CHAIN_DISTANCE_RANGE: f32 = 30.0;
pub const CHAIN_BURST_COUNT: usize = 3;

pub const FREEZE_CLOUD: Burst = Burst {
    count: 25,
    spread: 60.0,
    velocity: 3.0,
    life_min: 60.0,
    life_range: 40.0,
    max_life: 100.0,
    size_min: 3.0,
    size_range: 5.0,
    color: 0x87ceeb,
    kind: ParticleKind::Ice,
};

pub const SHOCKWAVE_COUNT: usize = 50;
pub const SHOCKWAVE_SPEED_MIN: f32 = 8.0;
pub const SHOCKWAVE_SPEED_RANGE: f32 = 4.0;

pub const DEFLECTION_COUNT: usize = 10;
pub const DEFLECTION_SPEED_MIN: f32 = 3.0;
pub const DEFLECTION_SPEED_RANGE: f32 = 3.0;

/// `(U(0,1) - 0.5) * extent`, i.e. uniform in ±extent/2
#[inline]
fn scatter<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * extent
}

/// Spawn `burst` around `center`
pub fn emit<R: Rng>(particles: &mut Pool<Particle>, rng: &mut R, center: Vec2, burst: &Burst) {
    for _ in 0..burst.count {
        let pos = center + Vec2::new(scatter(rng, burst.spread), scatter(rng, burst.spread));
        let vel = Vec2::new(scatter(rng, burst.velocity), scatter(rng, burst.velocity));
        let life = burst.life_min + rng.random::<f32>() * burst.life_range;
        let size = burst.size_min + rng.random::<f32>() * burst.size_range;
        particles.spawn(Particle {
            pos,
            vel,
            life,
            max_life: burst.max_life,
            color: burst.color,
            size,
            kind: burst.kind,
        });
    }
}

/// Firing flash at the muzzle, in the weapon's color
pub fn muzzle_flash<R: Rng>(particles: &mut Pool<Particle>, rng: &mut R, at: Vec2, color: u32) {
    emit(particles, rng, at, &Burst { color, ..MUZZLE_FLASH });
}

pub fn shield_sparks<R: Rng>(particles: &mut Pool<Particle>, rng: &mut R, at: Vec2) {
    emit(particles, rng, at, &SHIELD_SPARKS);
}

/// Main impact burst, colored by the weapon's effect family
pub fn impact_burst<R: Rng>(
    particles: &mut Pool<Particle>,
    rng: &mut R,
    at: Vec2,
    kind: ParticleKind,
    explosive: bool,
) {
    let count = if explosive {
        EXPLOSIVE_IMPACT_COUNT
    } else {
        IMPACT.count
    };
    let burst = Burst {
        count,
        color: kind.effect_color(),
        kind,
        ..IMPACT
    };
    emit(particles, rng, at, &burst);
}

/// Three bursts spaced 120° apart around `at`
pub fn chain_explosion<R: Rng>(particles: &mut Pool<Particle>, rng: &mut R, at: Vec2) {
    for i in 0..CHAIN_BURST_COUNT {
        let angle = std::f32::consts::TAU / CHAIN_BURST_COUNT as f32 * i as f32;
        let distance = CHAIN_DISTANCE_MIN + rng.random::<f32>() * CHAIN_DISTANCE_RANGE;
        emit(particles, rng, at + polar_to_cartesian(distance, angle), &CHAIN_BURST);
    }
}

pub fn freeze_cloud<R: Rng>(particles: &mut Pool<Particle>, rng: &mut R, at: Vec2) {
    emit(particles, rng, at, &FREEZE_CLOUD);
}

/// A perfect ring of particles flying outward from `at`
pub fn shockwave<R: Rng>(particles: &mut Pool<Particle>, rng: &mut R, at: Vec2) {
    for i in 0..SHOCKWAVE_COUNT {
        let angle = std::f32::consts::TAU / SHOCKWAVE_COUNT as f32 * i as f32;
        let speed = SHOCKWAVE_SPEED_MIN + rng.random::<f32>() * SHOCKWAVE_SPEED_RANGE;
        particles.spawn(Particle {
            pos: at,
            vel: polar_to_cartesian(speed, angle),
            life: 40.0 + rng.random::<f32>() * 20.0,
            max_life: 60.0,
            color: 0xff00ff,
            size: 1.0 + rng.random::<f32>() * 2.0,
            kind: ParticleKind::Shockwave,
        });
    }
}

/// Sparks glancing off a shield, flung away from the planet center
pub fn deflection<R: Rng>(particles: &mut Pool<Particle>, rng: &mut R, at: Vec2, planet: Vec2) {
    let normal = (at - planet).try_normalize().unwrap_or(Vec2::NEG_Y);
    let base = normal.y.atan2(normal.x);
    for _ in 0..DEFLECTION_COUNT {
        let angle = base + scatter(rng, std::f32::consts::FRAC_PI_2);
        let speed = DEFLECTION_SPEED_MIN + rng.random::<f32>() * DEFLECTION_SPEED_RANGE;
        particles.spawn(Particle {
            pos: at,
            vel: polar_to_cartesian(speed, angle),
            life: 15.0 + rng.random::<f32>() * 10.0,
            max_life: 25.0,
            color: 0xe0ffff,
            size: 1.0 + rng.random::<f32>() * 2.0,
            kind: ParticleKind::Deflection,
        });
    }
}

/// One trail particle behind a counter-attack
pub fn counter_attack_trail<R: Rng>(
    particles: &mut Pool<Particle>,
    rng: &mut R,
    attack: &CounterAttack,
) {
    particles.spawn(Particle {
        pos: attack.pos + Vec2::new(scatter(rng, 10.0), scatter(rng, 10.0)),
        vel: Vec2::new(scatter(rng, 2.0), scatter(rng, 2.0)),
        life: 20.0,
        max_life: 20.0,
        color: attack.color,
        size: attack.size / 2.0,
        kind: attack.kind.trail_particle(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(1)
    }

    #[test]
    fn test_burst_counts() {
        let mut rng = rng();
        let mut particles = Pool::new();
        impact_burst(&mut particles, &mut rng, Vec2::ZERO, ParticleKind::Void, false);
        assert_eq!(particles.len(), 15);
        impact_burst(&mut particles, &mut rng, Vec2::ZERO, ParticleKind::Explosion, true);
        assert_eq!(particles.len(), 45);
        freeze_cloud(&mut particles, &mut rng, Vec2::ZERO);
        assert_eq!(particles.len(), 70);
        chain_explosion(&mut particles, &mut rng, Vec2::ZERO);
        assert_eq!(particles.len(), 130);
    }

    #[test]
    fn test_burst_ranges() {
        let mut rng = rng();
        let mut particles = Pool::new();
        shield_sparks(&mut particles, &mut rng, Vec2::new(100.0, 100.0));
        for p in &particles {
            assert!((p.pos.x - 100.0).abs() <= 15.0 && (p.pos.y - 100.0).abs() <= 15.0);
            assert!(p.vel.x.abs() <= 4.0 && p.vel.y.abs() <= 4.0);
            assert!(p.life >= 20.0 && p.life <= 35.0);
            assert_eq!(p.max_life, 35.0);
            assert_eq!(p.kind, ParticleKind::ShieldSpark);
        }
    }

    #[test]
    fn test_shockwave_ring() {
        let mut rng = rng();
        let mut particles = Pool::new();
        shockwave(&mut particles, &mut rng, Vec2::ZERO);
        assert_eq!(particles.len(), SHOCKWAVE_COUNT);
        for (i, p) in particles.iter().enumerate() {
            let speed = p.vel.length();
            assert!((8.0..=12.0).contains(&speed));
            let expected = std::f32::consts::TAU / 50.0 * i as f32;
            let dir = Vec2::new(expected.cos(), expected.sin());
            assert!(p.vel.normalize().dot(dir) > 0.9999);
            assert_eq!(p.pos, Vec2::ZERO);
        }
    }

    #[test]
    fn test_chain_bursts_at_distance() {
        let mut rng = rng();
        let mut particles = Pool::new();
        chain_explosion(&mut particles, &mut rng, Vec2::ZERO);
        // Centers are 50-80 away; scatter adds at most ±15 per axis
        for p in &particles {
            let d = p.pos.length();
            assert!(d >= 50.0 - 22.0 && d <= 80.0 + 22.0, "distance {}", d);
        }
    }

    #[test]
    fn test_deflection_points_away_from_planet() {
        let mut rng = rng();
        let mut particles = Pool::new();
        deflection(&mut particles, &mut rng, Vec2::new(130.0, 0.0), Vec2::ZERO);
        assert_eq!(particles.len(), DEFLECTION_COUNT);
        for p in &particles {
            assert!(p.vel.x > 0.0);
        }
    }
}
