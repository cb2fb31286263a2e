use rand::Rng;

use crate::config::EngineConfig;
use crate::game::missions::{generate_mission, GenerationContext, Mission};
use crate::game::upgrades::UpgradeState;
use crate::protocol::{MissionId, Tick};

// ── Capacities ──────────────────────────────────────────────────────

pub fn board_capacity(config: &EngineConfig, worker_count: usize, upgrades: &UpgradeState) -> usize {
    let worker_bonus =
        (config.board_bonus_per_worker * worker_count).min(config.board_worker_bonus_cap);
    config.board_base_capacity
        + worker_bonus
        + config.board_slots_per_level * upgrades.board_slot_levels()
}

pub fn active_capacity(config: &EngineConfig, worker_count: usize, upgrades: &UpgradeState) -> usize {
    config.active_base_capacity + worker_count + upgrades.active_slot_levels()
}

/// Ticks between board refills. The refresh upgrade shortens it, but never
/// below the configured floor (itself at least one tick).
pub fn refill_interval(config: &EngineConfig, upgrades: &UpgradeState) -> u64 {
    let factor = (1.0 - upgrades.refresh_speedup(config.refill_speedup_per_level)).max(0.0);
    let scaled = (config.refill_interval_ticks as f64 * factor).round() as u64;
    scaled.max(config.refill_floor_ticks.max(1))
}

// ── Board maintenance ───────────────────────────────────────────────

/// The result of topping up the board.
pub struct FillResult {
    pub added: Vec<MissionId>,
    pub log_entries: Vec<String>,
}

/// Generates missions until the board holds `capacity` entries. Never
/// removes anything, so a board already at or over capacity is left alone.
pub fn fill_board<R: Rng + ?Sized>(
    board: &mut Vec<Mission>,
    capacity: usize,
    rng: &mut R,
    next_id: &mut MissionId,
    ctx: &GenerationContext<'_>,
) -> FillResult {
    let mut added = Vec::new();
    let mut log_entries = Vec::new();

    while board.len() < capacity {
        let id = *next_id;
        *next_id += 1;
        let mission = generate_mission(rng, id, ctx);
        if mission.is_bonus_op {
            log_entries.push(format!("Bonus op posted: {}", mission.template.name));
        }
        added.push(id);
        board.push(mission);
    }

    FillResult { added, log_entries }
}

/// Removes bonus-ops whose board lifetime has run out.
pub fn prune_expired_bonus_ops(board: &mut Vec<Mission>, now: Tick) -> Vec<MissionId> {
    let mut pruned = Vec::new();
    board.retain(|mission| {
        if mission.is_expired(now) {
            pruned.push(mission.id);
            false
        } else {
            true
        }
    });
    pruned
}
