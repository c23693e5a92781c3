//! Per-frame simulation tick
//!
//! Fixed phase order: input, due scheduled effects, projectiles,
//! counter-attacks, particles, then planetary passive systems. Counter-attacks
//! launched this tick move this tick, and their trail particles use the
//! already-updated position.

use glam::Vec2;

use super::effects;
use super::impact::{self, ImpactContext};
use super::schedule::ScheduledEffect;
use super::state::{GameEvent, SimulationState};
use super::weapons::WeaponId;
use crate::consts::{DEBRIS_GRAVITY, PARTICLE_DAMPING};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Switch weapon before firing
    pub select_weapon: Option<WeaponId>,
    /// Switch the active planet before firing
    pub select_target: Option<String>,
    /// Screen points to fire from, in order
    pub fire: Vec<Vec2>,
}

/// Advance the simulation by one frame
pub fn tick(state: &mut SimulationState, input: &TickInput) {
    apply_input(state, input);

    state.time_ticks += 1;
    run_scheduled(state);

    advance_projectiles(state);
    advance_counter_attacks(state);
    advance_particles(state);
    advance_targets(state);
}

fn apply_input(state: &mut SimulationState, input: &TickInput) {
    if let Some(weapon) = input.select_weapon {
        state.select_weapon(weapon);
    }
    if let Some(id) = &input.select_target {
        state.select_target(id);
    }
    for &origin in &input.fire {
        state.fire(origin);
    }
}

/// Fire every scheduled effect that has come due
fn run_scheduled(state: &mut SimulationState) {
    for effect in state.scheduler.drain_due(state.time_ticks) {
        let Some(index) = state.target_index(effect.target_id()) else {
            log::debug!("Dropping {:?}: planet no longer exists", effect);
            continue;
        };
        let target = &state.targets[index];
        if target.generation != effect.generation() {
            log::debug!("Dropping {:?}: planet was reset", effect);
            continue;
        }
        if target.is_destroyed() {
            log::debug!("Dropping {:?}: {} is destroyed", effect, target.name);
            continue;
        }

        match effect {
            ScheduledEffect::ChainExplosion { at, .. } => {
                effects::chain_explosion(&mut state.particles, &mut state.rng, at);
            }
            ScheduledEffect::CounterAttack { target_id, .. } => {
                let count = state.launch_counter_attack(index);
                log::info!(
                    "{} launched {} counter-attacks",
                    state.targets[index].name,
                    count
                );
                state
                    .events
                    .push(GameEvent::CounterAttackLaunched { target_id, count });
            }
        }
    }
}

fn advance_projectiles(state: &mut SimulationState) {
    let chain_delay_ticks = state.settings.chain_explosion_delay_ticks();
    let counter_attack_delay_ticks = state.settings.counter_attack_delay_ticks();
    let active = state.active_index();
    let Some(target) = state.targets.get_mut(active) else {
        return;
    };

    let mut ctx = ImpactContext {
        particles: &mut state.particles,
        scheduler: &mut state.scheduler,
        events: &mut state.events,
        rng: &mut state.rng,
        now: state.time_ticks,
        chain_delay_ticks,
        counter_attack_delay_ticks,
    };
    state
        .projectiles
        .tick_all(|projectile| impact::advance_projectile(&mut ctx, target, projectile).keep());
}

fn advance_counter_attacks(state: &mut SimulationState) {
    let particles = &mut state.particles;
    let rng = &mut state.rng;
    state.counter_attacks.tick_all(|attack| {
        attack.pos += attack.vel;
        attack.life = attack.life.saturating_sub(1);
        effects::counter_attack_trail(particles, rng, attack);
        attack.life > 0
    });
}

fn advance_particles(state: &mut SimulationState) {
    state.particles.tick_all(|particle| {
        particle.pos += particle.vel;
        particle.life -= 1.0;
        if particle.kind.has_gravity() {
            particle.vel.y += DEBRIS_GRAVITY;
        }
        particle.vel *= PARTICLE_DAMPING;
        particle.life > 0.0
    });
}

fn advance_targets(state: &mut SimulationState) {
    for target in &mut state.targets {
        target.tick_passive();
    }
}
