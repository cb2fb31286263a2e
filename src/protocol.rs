use serde::{Deserialize, Serialize};

use crate::game::upgrades::{UpgradeCategory, UpgradeId};

// ── Core type aliases ──────────────────────────────────────────────

pub type MissionId = u64;
pub type WorkerId = u64;
pub type NotificationId = u64;
pub type Tick = u64;

// ── Mission enums ──────────────────────────────────────────────────

/// Mission difficulty rank, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MissionTier {
    Petty,
    Sinister,
    Diabolical,
    Legendary,
}

impl MissionTier {
    pub const ALL: [MissionTier; 4] = [
        MissionTier::Petty,
        MissionTier::Sinister,
        MissionTier::Diabolical,
        MissionTier::Legendary,
    ];

    /// Zero-based rank, used to index the per-tier tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionCategory {
    Schemes,
    Heists,
    Research,
    Mayhem,
}

impl MissionCategory {
    pub const ALL: [MissionCategory; 4] = [
        MissionCategory::Schemes,
        MissionCategory::Heists,
        MissionCategory::Research,
        MissionCategory::Mayhem,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MissionCategory::Schemes => "Schemes",
            MissionCategory::Heists => "Heists",
            MissionCategory::Research => "Research",
            MissionCategory::Mayhem => "Mayhem",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    Queued,
    InProgress,
    Complete,
}

// ── Worker enums ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerStatusKind {
    Idle,
    Working,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accessory {
    Goggles,
    Helmet,
    Cape,
    Horns,
    None,
}

// ── Notoriety ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThreatLevel {
    Unknown,
    Suspicious,
    Wanted,
    Hunted,
    Infamous,
}

impl ThreatLevel {
    pub fn label(self) -> &'static str {
        match self {
            ThreatLevel::Unknown => "Unknown",
            ThreatLevel::Suspicious => "Suspicious",
            ThreatLevel::Wanted => "Wanted",
            ThreatLevel::Hunted => "Hunted",
            ThreatLevel::Infamous => "Infamous",
        }
    }
}

// ── Notifications ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Gold,
    Minion,
    Task,
    Department,
    Notoriety,
    Raid,
    Upgrade,
}

// ── Snapshots (Engine → Client) ────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSnapshot {
    pub id: MissionId,
    pub name: String,
    pub description: String,
    pub category: MissionCategory,
    pub tier: MissionTier,
    pub status: MissionStatus,
    pub gold_reward: u64,
    pub time_to_complete: f64,
    pub time_remaining: f64,
    pub clicks_required: u32,
    pub clicks_remaining: u32,
    pub assigned_worker: Option<WorkerId>,
    pub created_at: Tick,
    pub is_bonus_op: bool,
    pub bonus_op_expiry: Option<Tick>,
    pub is_risk_reduction_op: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerSnapshot {
    pub id: WorkerId,
    pub name: String,
    pub color: String,
    pub accessory: Accessory,
    pub status: WorkerStatusKind,
    pub assigned_mission: Option<MissionId>,
    pub speed: f64,
    pub efficiency: f64,
    pub specialty: MissionCategory,
    pub xp: u64,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSnapshot {
    pub category: MissionCategory,
    pub xp: u64,
    pub level: u32,
    pub next_level_xp: u64,
    pub unlocked_tiers: Vec<MissionTier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeSnapshot {
    pub id: UpgradeId,
    pub name: String,
    pub description: String,
    pub category: UpgradeCategory,
    pub current_level: u32,
    pub max_level: u32,
    /// `None` once the upgrade is maxed out.
    pub next_cost: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSnapshot {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RaidSnapshot {
    Inactive,
    Active { countdown: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotorietySnapshot {
    pub value: f64,
    pub max: f64,
    pub threat: ThreatLevel,
    pub threat_label: String,
    pub gold_penalty_pct: f64,
    pub bribe_cost: u64,
    pub raid: RaidSnapshot,
}

/// Full read-only view of an engine, as consumed by a rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub tick: Tick,
    pub currency: u64,
    pub lifetime_earned: u64,
    pub completed_count: u64,
    pub villain_level: u32,
    pub villain_title: String,
    pub next_hire_cost: u64,
    pub click_power: u32,
    pub board_capacity: usize,
    pub active_capacity: usize,
    pub workers: Vec<WorkerSnapshot>,
    pub board: Vec<MissionSnapshot>,
    pub active: Vec<MissionSnapshot>,
    pub departments: Vec<DepartmentSnapshot>,
    pub upgrades: Vec<UpgradeSnapshot>,
    pub notoriety: NotorietySnapshot,
    pub notifications: Vec<NotificationSnapshot>,
}

// ── Client → Engine messages ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientCommand {
    Reset,
    AcceptMission { mission_id: MissionId },
    ClickMission { mission_id: MissionId },
    HireWorker,
    PurchaseUpgrade { upgrade_id: UpgradeId },
    PayBribe,
    DefendRaid,
    DismissNotification { notification_id: NotificationId },

    // Debug actions
    DebugAddCurrency { amount: u64 },
}

/// Server-to-client message wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerMessage {
    /// Snapshot after every tick and every applied command.
    Snapshot(EngineSnapshot),
    /// A command was rejected and left the engine unchanged.
    Rejected { reason: String },
}
