use crate::game::progression::worker_level;
use crate::protocol::{Accessory, MissionCategory, MissionId, WorkerStatusKind};

// ── Marker Components ────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Worker;

// ── Worker Components ────────────────────────────────────────────────

/// Monotonic hire sequence; gives the roster a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HireOrder(pub u64);

#[derive(Debug, Clone)]
pub struct WorkerName {
    pub name: String,
}

/// Cosmetic only.
#[derive(Debug, Clone)]
pub struct Appearance {
    pub color: String,
    pub accessory: Accessory,
}

#[derive(Debug, Clone)]
pub struct WorkerState {
    pub state: WorkerStatusKind,
}

/// Rolled once at hire time, never changed afterwards.
#[derive(Debug, Clone)]
pub struct WorkerStats {
    pub speed: f64,
    pub efficiency: f64,
}

#[derive(Debug, Clone)]
pub struct Specialty {
    pub category: MissionCategory,
}

#[derive(Debug, Clone)]
pub struct WorkerXP {
    pub xp: u64,
}

impl WorkerXP {
    pub fn level(&self) -> u32 {
        worker_level(self.xp)
    }
}

/// Forward reference to the active mission this worker is on.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub mission: Option<MissionId>,
}
