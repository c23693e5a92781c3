//! Simulation state
//!
//! Everything the simulation owns lives in [`SimulationState`]. The host
//! holds it, feeds commands in, calls [`tick`](super::tick::tick) once per
//! frame and reads a [`Snapshot`] back out.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::defense;
use super::effects;
use super::entity::{CounterAttack, Particle, Projectile};
use super::pool::Pool;
use super::schedule::Scheduler;
use super::target::{Target, stock_planets};
use super::weapons::{WeaponId, spec_for};
use crate::settings::Settings;

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// A planet's defenses armed; show `message` to the player
    Warning { target_id: String, message: String },
    /// Damage reached a planet's surface
    Impact {
        target_id: String,
        weapon: WeaponId,
        absorbed: f32,
        applied: f32,
    },
    /// A guided weapon bounced off a shield
    Deflected {
        target_id: String,
        weapon: WeaponId,
        absorbed: f32,
    },
    /// Integrity reached zero
    TargetDestroyed { target_id: String },
    /// A counter-attack wave left the planet
    CounterAttackLaunched { target_id: String, count: usize },
}

/// Read-only view of the state for rendering
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub time_ticks: u64,
    pub weapon: WeaponId,
    pub active_target: &'a Target,
    pub projectiles: &'a [Projectile],
    pub counter_attacks: &'a [CounterAttack],
    pub particles: &'a [Particle],
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub settings: Settings,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Every planet; exactly one is active. The list is fixed after
    /// construction so `active` stays valid.
    pub(crate) targets: Vec<Target>,
    active: usize,
    weapon: WeaponId,
    pub projectiles: Pool<Projectile>,
    pub counter_attacks: Pool<CounterAttack>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Pool<Particle>,
    pub scheduler: Scheduler,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl SimulationState {
    /// Create a state with the stock planets centered in the viewport
    pub fn new(settings: Settings) -> Self {
        let center = Vec2::new(settings.viewport_width, settings.viewport_height) / 2.0;
        Self::with_targets(settings, stock_planets(center))
    }

    /// Create a state with a custom planet list.
    ///
    /// The active planet is `settings.starting_target` if present, otherwise
    /// the first one.
    pub fn with_targets(settings: Settings, targets: Vec<Target>) -> Self {
        let active = targets
            .iter()
            .position(|t| t.id == settings.starting_target)
            .unwrap_or(0);
        Self {
            time_ticks: 0,
            targets,
            active,
            weapon: settings.starting_weapon,
            projectiles: Pool::new(),
            counter_attacks: Pool::new(),
            particles: Pool::new(),
            scheduler: Scheduler::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(settings.seed),
            next_id: 1,
            settings,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn weapon(&self) -> WeaponId {
        self.weapon
    }

    pub fn select_weapon(&mut self, weapon: WeaponId) {
        self.weapon = weapon;
    }

    /// Select a weapon by name; unknown names select the rocket
    pub fn select_weapon_named(&mut self, name: &str) {
        self.weapon = WeaponId::from_name(name);
    }

    /// Make `id` the active planet. Unknown ids leave the selection alone.
    pub fn select_target(&mut self, id: &str) -> bool {
        match self.target_index(id) {
            Some(index) => {
                self.active = index;
                log::info!("Target: {}", self.targets[index].name);
                true
            }
            None => {
                log::warn!("Unknown target '{}', keeping {}", id, self.active_id());
                false
            }
        }
    }

    fn active_id(&self) -> &str {
        self.active_target().map_or("none", |t| t.id.as_str())
    }

    /// Every planet, in construction order
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn target_index(&self, id: &str) -> Option<usize> {
        self.targets.iter().position(|t| t.id == id)
    }

    pub fn target(&self, id: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn target_mut(&mut self, id: &str) -> Option<&mut Target> {
        self.targets.iter_mut().find(|t| t.id == id)
    }

    pub fn active_target(&self) -> Option<&Target> {
        self.targets.get(self.active)
    }

    pub fn active_target_mut(&mut self) -> Option<&mut Target> {
        self.targets.get_mut(self.active)
    }

    pub(crate) fn active_index(&self) -> usize {
        self.active
    }

    /// Spawn the counter-attack wave of the planet at `index`
    pub(crate) fn launch_counter_attack(&mut self, index: usize) -> usize {
        let Some(target) = self.targets.get(index) else {
            return 0;
        };
        let next_id = &mut self.next_id;
        let attacks = defense::launch(target, &mut self.rng, || {
            let id = *next_id;
            *next_id = next_id.wrapping_add(1);
            id
        });
        let count = attacks.len();
        self.counter_attacks.extend(attacks);
        count
    }

    /// Fire the selected weapon from `origin` at the active planet's center
    pub fn fire(&mut self, origin: Vec2) -> Option<u32> {
        let aim = self.active_target()?.pos;
        let spec = spec_for(self.weapon);
        let id = self.next_entity_id();

        self.projectiles.spawn(Projectile::new(id, spec, origin, aim));
        effects::muzzle_flash(&mut self.particles, &mut self.rng, origin, spec.color);
        log::debug!("Fired {} #{} from {:?}", spec.id.as_str(), id, origin);
        Some(id)
    }

    /// Re-center every planet for a new viewport size; combat state is kept
    pub fn resize(&mut self, width: f32, height: f32) {
        self.settings.viewport_width = width;
        self.settings.viewport_height = height;
        let center = Vec2::new(width, height) / 2.0;
        for target in &mut self.targets {
            target.pos = center;
        }
    }

    /// Restore a planet to its starting condition, dropping its pending
    /// chain explosions and counter-attacks
    pub fn reset_target(&mut self, id: &str) -> bool {
        let Some(target) = self.targets.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        target.reset();
        let cancelled = self.scheduler.cancel_for(id);
        log::info!("Reset {} ({} pending effects dropped)", target.name, cancelled);
        true
    }

    /// Reset every planet and clear all transient entities. Undrained events
    /// are kept for the presentation layer.
    pub fn reset_all(&mut self) {
        for target in &mut self.targets {
            target.reset();
        }
        self.scheduler.clear();
        self.projectiles.clear();
        self.counter_attacks.clear();
        self.particles.clear();
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Borrow everything the renderer needs
    pub fn snapshot(&self) -> Option<Snapshot<'_>> {
        Some(Snapshot {
            time_ticks: self.time_ticks,
            weapon: self.weapon,
            active_target: self.active_target()?,
            projectiles: self.projectiles.as_slice(),
            counter_attacks: self.counter_attacks.as_slice(),
            particles: self.particles.as_slice(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = SimulationState::new(Settings::default());
        assert_eq!(state.targets.len(), 4);
        assert_eq!(state.active_target().map(|t| t.id.as_str()), Some("earth"));
        assert_eq!(state.weapon(), WeaponId::Rocket);
        assert_eq!(state.active_target().map(|t| t.pos), Some(Vec2::new(640.0, 360.0)));
    }

    #[test]
    fn test_select_unknown_target_is_noop() {
        let mut state = SimulationState::new(Settings::default());
        assert!(state.select_target("mars"));
        assert!(!state.select_target("pluto"));
        assert_eq!(state.active_target().map(|t| t.id.as_str()), Some("mars"));
    }

    #[test]
    fn test_select_weapon_named_fallback() {
        let mut state = SimulationState::new(Settings::default());
        state.select_weapon_named("railgun");
        assert_eq!(state.weapon(), WeaponId::Railgun);
        state.select_weapon_named("death-star");
        assert_eq!(state.weapon(), WeaponId::Rocket);
    }

    #[test]
    fn test_fire_spawns_projectile_and_muzzle_flash() {
        let mut state = SimulationState::new(Settings::default());
        state.select_weapon(WeaponId::Bomb);
        let id = state.fire(Vec2::new(10.0, 10.0));
        assert_eq!(id, Some(1));
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.particles.len(), 10);

        let shot = &state.projectiles.as_slice()[0];
        assert_eq!(shot.weapon, WeaponId::Bomb);
        assert_eq!(shot.aim, Vec2::new(640.0, 360.0));
        assert!(state.particles.iter().all(|p| p.color == 0x333333));
    }

    #[test]
    fn test_fire_with_no_targets() {
        let mut state = SimulationState::with_targets(Settings::default(), Vec::new());
        assert_eq!(state.fire(Vec2::ZERO), None);
        assert!(state.snapshot().is_none());
    }

    #[test]
    fn test_resize_keeps_damage() {
        let mut state = SimulationState::new(Settings::default());
        if let Some(earth) = state.active_target_mut() {
            earth.apply_damage(50.0);
        }
        state.resize(800.0, 600.0);
        let earth = state.active_target().expect("earth");
        assert_eq!(earth.pos, Vec2::new(400.0, 300.0));
        assert_eq!(earth.integrity(), 95.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = SimulationState::new(Settings::default());
        state.fire(Vec2::ZERO);
        let snapshot = state.snapshot().expect("active target");
        let json = serde_json::to_value(&snapshot).expect("serializable");
        assert_eq!(json["active_target"]["id"], "earth");
        assert_eq!(json["projectiles"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_reset_all_keeps_undrained_warning() {
        let mut state = SimulationState::new(Settings::default());
        if let Some(earth) = state.active_target_mut() {
            earth.set_shield(0.0);
        }
        state.select_weapon(WeaponId::Laser);
        state.fire(Vec2::ZERO);
        crate::sim::tick(&mut state, &crate::sim::TickInput::default());

        state.reset_all();
        assert!(state.scheduler.is_empty());
        assert!(state.particles.is_empty());
        let events = state.drain_events();
        let warnings = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Warning { .. }))
            .count();
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_target_mut_keeps_active_selection() {
        let mut state = SimulationState::new(Settings::default());
        assert!(state.select_target("venus"));
        if let Some(mars) = state.target_mut("mars") {
            mars.apply_damage(100.0);
        }
        assert!(state.target_mut("pluto").is_none());

        assert_eq!(state.targets().len(), 4);
        assert_eq!(state.active_target().map(|t| t.id.as_str()), Some("venus"));
        assert_eq!(state.target("mars").map(|t| t.integrity()), Some(90.0));
        assert_eq!(state.target("venus").map(|t| t.integrity()), Some(100.0));
    }
}
