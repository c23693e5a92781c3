//! Impact resolution
//!
//! Moves projectiles, detects hits on the active planet, and resolves them:
//! shield absorption, guided-weapon deflection, damage, craters, particle
//! bursts, secondary effects and the defense trigger, in that order.

use rand_pcg::Pcg32;

use super::defense;
use super::effects;
use super::entity::{Particle, Projectile};
use super::pool::Pool;
use super::schedule::{ScheduledEffect, Scheduler};
use super::state::GameEvent;
use super::target::Target;
use super::weapons::{Capabilities, Capability};

/// Everything a hit may touch besides the planet and the projectile
pub struct ImpactContext<'a> {
    pub particles: &'a mut Pool<Particle>,
    pub scheduler: &'a mut Scheduler,
    pub events: &'a mut Vec<GameEvent>,
    pub rng: &'a mut Pcg32,
    /// Current tick
    pub now: u64,
    pub chain_delay_ticks: u64,
    pub counter_attack_delay_ticks: u64,
}

/// How a hit played out
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpactResult {
    /// Guided weapon bounced off a shield that survived absorption
    Deflected { absorbed: f32 },
    /// Shield soaked up everything
    Absorbed { absorbed: f32 },
    /// Damage reached the surface
    Damaged {
        absorbed: f32,
        applied: f32,
        defense_armed: bool,
    },
}

/// What happened to a projectile this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Airborne,
    Expired,
    Hit(ImpactResult),
}

impl Outcome {
    /// Whether the projectile stays in its pool
    pub fn keep(&self) -> bool {
        matches!(self, Outcome::Airborne)
    }
}

/// Advance one projectile against the active planet
pub fn advance_projectile(
    ctx: &mut ImpactContext<'_>,
    target: &mut Target,
    projectile: &mut Projectile,
) -> Outcome {
    projectile.advance(target.pos);

    if target.is_hit(projectile.pos) {
        return Outcome::Hit(resolve(ctx, target, projectile));
    }

    projectile.ttl_ticks = projectile.ttl_ticks.saturating_sub(1);
    if projectile.ttl_ticks == 0 {
        log::debug!("{} #{} fizzled", projectile.weapon.as_str(), projectile.id);
        Outcome::Expired
    } else {
        Outcome::Airborne
    }
}

/// Resolve a hit of `projectile` on `target` at the projectile's position
pub fn resolve(
    ctx: &mut ImpactContext<'_>,
    target: &mut Target,
    projectile: &mut Projectile,
) -> ImpactResult {
    let impact = projectile.pos;

    // 1. Shield absorption
    let mut absorbed = 0.0;
    if target.shield() > 0.0 {
        let hit = target.absorb(projectile.damage);
        absorbed = hit.absorbed;
        projectile.damage = hit.remaining;
        effects::shield_sparks(ctx.particles, ctx.rng, impact);

        // 2. Guided weapons cannot punch through what is left of a shield
        if projectile.is_guided() && target.shield() > 0.0 {
            effects::deflection(ctx.particles, ctx.rng, impact, target.pos);
            log::debug!("{} deflected by {}'s shield", projectile.weapon.as_str(), target.name);
            ctx.events.push(GameEvent::Deflected {
                target_id: target.id.clone(),
                weapon: projectile.weapon,
                absorbed,
            });
            return ImpactResult::Deflected { absorbed };
        }
    }

    if projectile.damage <= 0.0 {
        return ImpactResult::Absorbed { absorbed };
    }

    // 3. Surface damage
    let applied = projectile.damage;
    let was_destroyed = target.is_destroyed();
    target.apply_damage(applied);
    target.add_crater(impact, applied, projectile.weapon);
    effects::impact_burst(
        ctx.particles,
        ctx.rng,
        impact,
        projectile.weapon.effect_kind(),
        projectile.capabilities.contains(Capabilities::EXPLOSIVE),
    );

    // 4. Secondary effects
    secondary_effects(ctx, target, projectile);

    ctx.events.push(GameEvent::Impact {
        target_id: target.id.clone(),
        weapon: projectile.weapon,
        absorbed,
        applied,
    });
    if !was_destroyed && target.is_destroyed() {
        log::info!("{} has been destroyed", target.name);
        ctx.events.push(GameEvent::TargetDestroyed {
            target_id: target.id.clone(),
        });
    }

    // 5. Planetary defense
    let defense_armed = defense::trigger(
        target,
        ctx.scheduler,
        ctx.events,
        ctx.now + ctx.counter_attack_delay_ticks,
    );

    ImpactResult::Damaged {
        absorbed,
        applied,
        defense_armed,
    }
}

fn secondary_effects(ctx: &mut ImpactContext<'_>, target: &Target, projectile: &Projectile) {
    let at = projectile.pos;
    for capability in projectile.capabilities.each() {
        match capability {
            Capability::ChainExplosion => ctx.scheduler.schedule(
                ctx.now + ctx.chain_delay_ticks,
                ScheduledEffect::ChainExplosion {
                    target_id: target.id.clone(),
                    generation: target.generation,
                    at,
                },
            ),
            Capability::Freezing => effects::freeze_cloud(ctx.particles, ctx.rng, at),
            Capability::Shockwave => effects::shockwave(ctx.particles, ctx.rng, at),
            // Motion, burst sizing, or flavor only
            Capability::Explosive
            | Capability::Guided
            | Capability::Instant
            | Capability::Penetrating
            | Capability::Burst
            | Capability::Piercing
            | Capability::Massive
            | Capability::Gravity
            | Capability::AreaEffect
            | Capability::Gravitational
            | Capability::Absorption
            | Capability::Electromagnetic
            | Capability::Slowing => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::defense::{DefenseKind, DefensePhase};
    use crate::sim::entity::ParticleKind;
    use crate::sim::weapons::{WeaponId, spec_for};
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;

    struct Harness {
        particles: Pool<Particle>,
        scheduler: Scheduler,
        events: Vec<GameEvent>,
        rng: Pcg32,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                particles: Pool::new(),
                scheduler: Scheduler::default(),
                events: Vec::new(),
                rng: Pcg32::seed_from_u64(5),
            }
        }

        fn ctx(&mut self) -> ImpactContext<'_> {
            ImpactContext {
                particles: &mut self.particles,
                scheduler: &mut self.scheduler,
                events: &mut self.events,
                rng: &mut self.rng,
                now: 100,
                chain_delay_ticks: 12,
                counter_attack_delay_ticks: 60,
            }
        }
    }

    fn planet(shield: f32) -> Target {
        let mut t = Target::new(
            "earth",
            "Earth",
            Vec2::ZERO,
            120.0,
            300.0,
            7_800_000_000,
            DefenseKind::Storm,
            300,
        );
        t.set_shield(shield);
        t
    }

    fn shot(weapon: WeaponId, at: Vec2) -> Projectile {
        let mut p = Projectile::new(1, spec_for(weapon), at, Vec2::ZERO);
        p.pos = at;
        p
    }

    #[test]
    fn test_rocket_on_unshielded_planet() {
        let mut h = Harness::new();
        let mut target = planet(0.0);
        let mut rocket = shot(WeaponId::Rocket, Vec2::new(125.0, 0.0));

        let result = resolve(&mut h.ctx(), &mut target, &mut rocket);

        assert_eq!(
            result,
            ImpactResult::Damaged {
                absorbed: 0.0,
                applied: 25.0,
                defense_armed: true
            }
        );
        assert!((target.integrity() - 97.5).abs() < 1e-4);
        assert_eq!(target.population(), 5_300_000_000);
        assert_eq!(target.craters.len(), 1);
        assert_eq!(target.defense.phase(), DefensePhase::Cooldown);
        // Explosive: 30 impact particles, no shield sparks
        assert_eq!(h.particles.len(), 30);
        assert_eq!(h.scheduler.next_due(), Some(160));
    }

    #[test]
    fn test_partial_shield_lets_damage_through() {
        let mut h = Harness::new();
        let mut target = planet(60.0);
        let mut bomb = shot(WeaponId::Bomb, Vec2::new(125.0, 0.0));
        bomb.damage = 100.0;

        let result = resolve(&mut h.ctx(), &mut target, &mut bomb);

        assert!(matches!(result, ImpactResult::Damaged { absorbed, applied, .. }
            if absorbed == 60.0 && applied == 40.0));
        assert_eq!(target.shield(), 0.0);
        assert!((target.integrity() - 96.0).abs() < 1e-4);
    }

    #[test]
    fn test_black_hole_against_full_shield() {
        let mut h = Harness::new();
        let mut target = planet(100.0);
        let mut hole = shot(WeaponId::BlackHole, Vec2::new(125.0, 0.0));

        let result = resolve(&mut h.ctx(), &mut target, &mut hole);

        let ImpactResult::Damaged { absorbed, applied, .. } = result else {
            panic!("expected damage, got {:?}", result);
        };
        assert!((absorbed - 70.0).abs() < 1e-3);
        assert!((applied - 30.0).abs() < 1e-3);
        assert!((target.shield() - 30.0).abs() < 1e-3);
        // 15 shield sparks + 15 void particles (not explosive)
        assert_eq!(h.particles.len(), 30);
        let voids = h.particles.iter().filter(|p| p.kind == ParticleKind::Void).count();
        assert_eq!(voids, 15);
    }

    #[test]
    fn test_guided_deflects_off_residual_shield() {
        let mut h = Harness::new();
        let mut target = planet(100.0);
        let mut missile = shot(WeaponId::GuidedMissile, Vec2::new(125.0, 0.0));

        let result = resolve(&mut h.ctx(), &mut target, &mut missile);

        assert!(matches!(result, ImpactResult::Deflected { .. }));
        assert!(target.craters.is_empty());
        assert_eq!(target.integrity(), 100.0);
        assert_eq!(target.population(), 7_800_000_000);
        assert_eq!(target.defense.phase(), DefensePhase::Idle);
        assert!(h.scheduler.is_empty());
        assert!(matches!(h.events.as_slice(), [GameEvent::Deflected { .. }]));
    }

    #[test]
    fn test_guided_penetrates_exhausted_shield() {
        let mut h = Harness::new();
        // 30 damage * 0.7 = 21 absorbed > 10 of shield
        let mut target = planet(10.0);
        let mut missile = shot(WeaponId::GuidedMissile, Vec2::new(125.0, 0.0));

        let result = resolve(&mut h.ctx(), &mut target, &mut missile);

        assert!(matches!(result, ImpactResult::Damaged { applied, .. } if applied == 20.0));
        assert_eq!(target.craters.len(), 1);
    }

    #[test]
    fn test_fully_absorbed_hit_has_no_consequences() {
        let mut h = Harness::new();
        let mut target = planet(300.0);
        let mut rocket = shot(WeaponId::Rocket, Vec2::new(125.0, 0.0));
        rocket.damage = 0.0;

        let result = resolve(&mut h.ctx(), &mut target, &mut rocket);

        assert!(matches!(result, ImpactResult::Absorbed { .. }));
        assert!(target.craters.is_empty());
        assert_eq!(target.defense.phase(), DefensePhase::Idle);
    }

    #[test]
    fn test_secondary_effects() {
        let mut h = Harness::new();
        let mut target = planet(0.0);

        let mut bomb = shot(WeaponId::Bomb, Vec2::new(125.0, 0.0));
        resolve(&mut h.ctx(), &mut target, &mut bomb);
        // Chain explosion and counter-attack both pending
        assert_eq!(h.scheduler.len(), 2);
        assert_eq!(h.scheduler.next_due(), Some(112));

        let before = h.particles.len();
        let mut freeze = shot(WeaponId::FreezeRay, Vec2::new(125.0, 0.0));
        resolve(&mut h.ctx(), &mut target, &mut freeze);
        assert_eq!(h.particles.len() - before, 15 + 25);

        let before = h.particles.len();
        let mut super_laser = shot(WeaponId::SuperLaser, Vec2::new(125.0, 0.0));
        resolve(&mut h.ctx(), &mut target, &mut super_laser);
        assert_eq!(h.particles.len() - before, 15 + 50);
    }

    #[test]
    fn test_cooldown_blocks_second_trigger() {
        let mut h = Harness::new();
        let mut target = planet(0.0);
        let mut first = shot(WeaponId::Rocket, Vec2::new(125.0, 0.0));
        let mut second = shot(WeaponId::Rocket, Vec2::new(125.0, 0.0));

        resolve(&mut h.ctx(), &mut target, &mut first);
        target.defense.tick();
        let result = resolve(&mut h.ctx(), &mut target, &mut second);

        assert!(matches!(result, ImpactResult::Damaged { defense_armed: false, .. }));
        assert_eq!(target.defense.cooldown, 299);
        let warnings = h
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Warning { .. }))
            .count();
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_projectile_expires_silently() {
        let mut h = Harness::new();
        let mut target = planet(0.0);
        // Aimed away from the planet
        let mut p = Projectile::new(
            1,
            spec_for(WeaponId::Railgun),
            Vec2::new(1000.0, 0.0),
            Vec2::new(5000.0, 0.0),
        );

        let mut outcome = Outcome::Airborne;
        let mut ticks = 0;
        while outcome.keep() {
            outcome = advance_projectile(&mut h.ctx(), &mut target, &mut p);
            ticks += 1;
        }
        assert_eq!(outcome, Outcome::Expired);
        assert_eq!(ticks, 80);
        assert!(target.craters.is_empty());
        assert!(h.particles.is_empty());
    }

    #[test]
    fn test_destruction_reported_once() {
        let mut h = Harness::new();
        let mut target = planet(0.0);
        for _ in 0..12 {
            let mut hole = shot(WeaponId::BlackHole, Vec2::new(125.0, 0.0));
            resolve(&mut h.ctx(), &mut target, &mut hole);
        }
        let destroyed = h
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::TargetDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
    }

    proptest! {
        #[test]
        fn prop_shield_absorption(shield in 0.0f32..300.0, damage in 0.0f32..200.0) {
            let mut h = Harness::new();
            let mut target = planet(shield);
            let mut rocket = shot(WeaponId::Rocket, Vec2::new(125.0, 0.0));
            rocket.damage = damage;

            resolve(&mut h.ctx(), &mut target, &mut rocket);

            let expected_shield = (shield - shield.min(0.7 * damage)).max(0.0);
            prop_assert!((target.shield() - expected_shield).abs() < 1e-3);
            let expected_remaining = damage - (shield - target.shield());
            prop_assert!((rocket.damage - expected_remaining).abs() < 1e-3);
            prop_assert!(target.shield() >= 0.0);
        }

        #[test]
        fn prop_guided_never_cratered_through_shield(shield in 21.5f32..300.0) {
            let mut h = Harness::new();
            let mut target = planet(shield);
            let mut missile = shot(WeaponId::GuidedMissile, Vec2::new(125.0, 0.0));

            resolve(&mut h.ctx(), &mut target, &mut missile);

            prop_assert!(target.craters.is_empty());
            prop_assert_eq!(target.defense.phase(), DefensePhase::Idle);
        }
    }
}
