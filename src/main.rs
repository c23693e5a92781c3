//! Planet Strike headless driver
//!
//! Runs a scripted bombardment against every stock planet and prints a JSON
//! report. Pass a settings file path as the first argument to override the
//! defaults.

#[cfg(not(target_arch = "wasm32"))]
use planet_strike::Settings;
#[cfg(not(target_arch = "wasm32"))]
use planet_strike::sim::{GameEvent, SimulationState, TickInput, WeaponId, tick};

/// Upper bound on ticks spent waiting for one salvo to settle
#[cfg(not(target_arch = "wasm32"))]
const MAX_SALVO_TICKS: u32 = 5000;

#[cfg(not(target_arch = "wasm32"))]
#[derive(serde::Serialize)]
struct PlanetReport {
    id: String,
    shield: f32,
    integrity: f32,
    population: u64,
    craters: usize,
    destroyed: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Planet Strike (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let mut state = SimulationState::new(settings);
    let ids: Vec<String> = state.targets().iter().map(|t| t.id.clone()).collect();

    for id in &ids {
        for weapon in WeaponId::ALL {
            let input = TickInput {
                select_weapon: Some(weapon),
                select_target: Some(id.clone()),
                fire: vec![glam::Vec2::new(0.0, state.settings.viewport_height / 2.0)],
            };
            tick(&mut state, &input);

            let idle = TickInput::default();
            let mut ticks = 0;
            while !state.projectiles.is_empty() && ticks < MAX_SALVO_TICKS {
                tick(&mut state, &idle);
                ticks += 1;
            }
            report_events(state.drain_events());
        }
    }

    // Let pending counter-attacks play out
    while !state.scheduler.is_empty() || !state.counter_attacks.is_empty() {
        tick(&mut state, &TickInput::default());
    }
    report_events(state.drain_events());

    let report: Vec<PlanetReport> = state
        .targets()
        .iter()
        .map(|t| PlanetReport {
            id: t.id.clone(),
            shield: t.shield(),
            integrity: t.integrity_clamped(),
            population: t.population(),
            craters: t.craters.len(),
            destroyed: t.is_destroyed(),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&report)?);
    log::info!("Finished after {} ticks", state.time_ticks);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn report_events(events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::Warning { message, .. } => log::warn!("{}", message),
            GameEvent::Impact {
                target_id,
                weapon,
                applied,
                ..
            } => log::info!("{} hit {} for {:.1}", weapon.as_str(), target_id, applied),
            GameEvent::Deflected { target_id, weapon, .. } => {
                log::info!("{} deflected by {}", weapon.as_str(), target_id)
            }
            GameEvent::TargetDestroyed { target_id } => log::info!("{} destroyed", target_id),
            GameEvent::CounterAttackLaunched { target_id, count } => {
                log::info!("{} launched {} counter-attacks", target_id, count)
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosted builds drive the simulation from their own frame loop
}
