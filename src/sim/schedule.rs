//! Delayed effects keyed by tick deadline
//!
//! Replaces wall-clock timers. Each effect remembers the planet generation it
//! was scheduled under so a reset planet never receives stale effects.

use glam::Vec2;
use serde::Serialize;

/// Something that happens a fixed number of ticks after it was scheduled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScheduledEffect {
    /// Secondary bursts around a bomb impact
    ChainExplosion {
        target_id: String,
        generation: u32,
        at: Vec2,
    },
    /// A planet's counter-attack wave
    CounterAttack { target_id: String, generation: u32 },
}

impl ScheduledEffect {
    pub fn target_id(&self) -> &str {
        match self {
            ScheduledEffect::ChainExplosion { target_id, .. }
            | ScheduledEffect::CounterAttack { target_id, .. } => target_id,
        }
    }

    pub fn generation(&self) -> u32 {
        match self {
            ScheduledEffect::ChainExplosion { generation, .. }
            | ScheduledEffect::CounterAttack { generation, .. } => *generation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Entry {
    due_tick: u64,
    effect: ScheduledEffect,
}

/// Pending effects in scheduling order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scheduler {
    pending: Vec<Entry>,
}

impl Scheduler {
    pub fn schedule(&mut self, due_tick: u64, effect: ScheduledEffect) {
        self.pending.push(Entry { due_tick, effect });
    }

    /// Remove and return every effect due at or before `now`, in the order
    /// they were scheduled
    pub fn drain_due(&mut self, now: u64) -> Vec<ScheduledEffect> {
        let mut due = Vec::new();
        self.pending.retain_mut(|entry| {
            if entry.due_tick <= now {
                due.push(entry.effect.clone());
                false
            } else {
                true
            }
        });
        due
    }

    /// Drop every pending effect aimed at `target_id`
    pub fn cancel_for(&mut self, target_id: &str) -> usize {
        let before = self.pending.len();
        self.pending.retain(|e| e.effect.target_id() != target_id);
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|e| e.due_tick).min()
    }
}
