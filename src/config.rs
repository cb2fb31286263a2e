use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

/// Balancing knobs for one engine instance.
///
/// Every field has a default, so a JSON file only needs the keys it wants to
/// override. Rule tables (catalog, tier bases, upgrade catalogue, notoriety
/// bands) are not configurable and live next to the code that uses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the default `StdRng`. `None` seeds from entropy.
    pub seed: Option<u64>,

    // ── Board ──────────────────────────────────────────────────────
    pub board_base_capacity: usize,
    pub board_bonus_per_worker: usize,
    pub board_worker_bonus_cap: usize,
    pub board_slots_per_level: usize,
    pub refill_interval_ticks: u64,
    pub refill_speedup_per_level: f64,
    pub refill_floor_ticks: u64,

    // ── Active queue ───────────────────────────────────────────────
    pub active_base_capacity: usize,
    /// Queued, untouched active missions older than this are dropped.
    pub queued_expiry_ticks: Option<u64>,

    // ── Generation ─────────────────────────────────────────────────
    pub bonus_op_chance: f64,
    pub bonus_op_multiplier: f64,
    pub bonus_op_lifetime_ticks: u64,
    pub cover_op_chance: f64,
    pub cover_op_notoriety_threshold: f64,

    // ── Hiring ─────────────────────────────────────────────────────
    pub hire_base_cost: u64,
    pub hire_cost_scale: f64,

    // ── Raids ──────────────────────────────────────────────────────
    pub raid_threshold: f64,
    pub raid_chance: f64,
    pub raid_countdown: u32,

    pub notification_ttl_ticks: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            board_base_capacity: 6,
            board_bonus_per_worker: 1,
            board_worker_bonus_cap: 4,
            board_slots_per_level: 3,
            refill_interval_ticks: 10,
            refill_speedup_per_level: 0.2,
            refill_floor_ticks: 2,
            active_base_capacity: 3,
            queued_expiry_ticks: None,
            bonus_op_chance: 0.08,
            bonus_op_multiplier: 2.0,
            bonus_op_lifetime_ticks: 30,
            cover_op_chance: 0.15,
            cover_op_notoriety_threshold: 40.0,
            hire_base_cost: 50,
            hire_cost_scale: 1.5,
            raid_threshold: 60.0,
            raid_chance: 0.02,
            raid_countdown: 10,
            notification_ttl_ticks: 4,
        }
    }
}

impl EngineConfig {
    /// Load the config from a JSON file on disk.
    /// Falls back to the defaults if the file is missing or malformed.
    pub fn load_from_file(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => {
                info!("Loaded engine config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}. Using default engine config.", e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}
