use std::collections::HashSet;

use hecs::Entity;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::ecs::components::{Appearance, WorkerStats};
use crate::ecs::world::{Recruit, Roster};
use crate::error::CommandError;
use crate::game::economy::Ledger;
use crate::game::upgrades::UpgradeState;
use crate::protocol::{Accessory, MissionCategory, MissionTier};

/// Bank of 25 procedural minion names.
const NAME_BANK: [&str; 25] = [
    "Grim", "Skulk", "Mortis", "Dread", "Vex", "Blight", "Scourge", "Wraith", "Gloom", "Malice",
    "Spite", "Ruin", "Hex", "Fang", "Shade", "Doom", "Murk", "Cinder", "Rot", "Snarl", "Blaze",
    "Torment", "Havoc", "Nox", "Vile",
];

const COLORS: [&str; 15] = [
    "#6c3483", "#1a5276", "#7b241c", "#1e8449", "#b9770e", "#5b2c6f", "#154360", "#922b21",
    "#196f3d", "#9a7d0a", "#4a235a", "#1b4f72", "#78281f", "#1d8348", "#7d6608",
];

const ACCESSORIES: [Accessory; 5] = [
    Accessory::Goggles,
    Accessory::Helmet,
    Accessory::Cape,
    Accessory::Horns,
    Accessory::None,
];

/// Bounds of the hire-time stat roll.
const STAT_MIN: f64 = 0.8;
const STAT_MAX: f64 = 1.2;

const SPEED_PER_LEVEL: f64 = 0.05;
const EFFICIENCY_PER_LEVEL: f64 = 0.05;
const SPECIALTY_SPEED_BONUS: f64 = 0.25;
const SPECIALTY_EFFICIENCY_BONUS: f64 = 0.15;

/// Worker XP per completed mission, indexed by tier.
pub const WORKER_TIER_XP: [u64; 4] = [10, 20, 40, 80];

/// Price of the next hire: `base * scale^workers`, minus the agency discount.
pub fn hire_cost(base: u64, scale: f64, worker_count: usize, discount: f64) -> u64 {
    let raw = base as f64 * scale.powi(worker_count as i32);
    (raw * (1.0 - discount).max(0.0)).floor() as u64
}

/// Roll speed and efficiency once, uniformly within the stat bounds.
pub fn generate_stats<R: Rng + ?Sized>(rng: &mut R) -> WorkerStats {
    WorkerStats {
        speed: rng.gen_range(STAT_MIN..=STAT_MAX),
        efficiency: rng.gen_range(STAT_MIN..=STAT_MAX),
    }
}

/// Pick a name not handed out since the bank last wrapped.
pub fn pick_name<R: Rng + ?Sized>(rng: &mut R, used: &mut HashSet<usize>) -> String {
    if used.len() >= NAME_BANK.len() {
        used.clear();
    }
    let free: Vec<usize> = (0..NAME_BANK.len()).filter(|i| !used.contains(i)).collect();
    let idx = *free.choose(rng).unwrap_or(&0);
    used.insert(idx);
    NAME_BANK[idx].to_string()
}

fn generate_appearance<R: Rng + ?Sized>(rng: &mut R) -> Appearance {
    Appearance {
        color: COLORS.choose(rng).unwrap_or(&COLORS[0]).to_string(),
        accessory: *ACCESSORIES.choose(rng).unwrap_or(&Accessory::None),
    }
}

/// Hire a new minion into the roster.
///
/// Debits `cost` from the ledger, then rolls a name, appearance, stats and a
/// specialty and spawns the worker idle.
///
/// # Errors
///
/// Returns `InsufficientFunds` (and changes nothing) if the balance is short.
pub fn recruit_worker<R: Rng + ?Sized>(
    roster: &mut Roster,
    rng: &mut R,
    ledger: &mut Ledger,
    cost: u64,
) -> Result<Entity, CommandError> {
    ledger.debit(cost)?;

    let name = pick_name(rng, &mut roster.used_names);
    let appearance = generate_appearance(rng);
    let stats = generate_stats(rng);
    let specialty = *MissionCategory::ALL
        .choose(rng)
        .unwrap_or(&MissionCategory::Schemes);

    Ok(roster.spawn(Recruit {
        name,
        appearance,
        stats,
        specialty,
    }))
}

// ── Effective stats ─────────────────────────────────────────────────

/// Time units removed per tick on a mission of `category`.
pub fn effective_speed(
    stats: &WorkerStats,
    level: u32,
    specialty: MissionCategory,
    category: MissionCategory,
    upgrades: &UpgradeState,
) -> f64 {
    let mut speed = stats.speed + SPEED_PER_LEVEL * f64::from(level.saturating_sub(1));
    if specialty == category {
        speed += SPECIALTY_SPEED_BONUS;
    }
    speed * (1.0 + upgrades.speed_bonus())
}

/// Gold multiplier applied when this worker finishes a mission.
pub fn effective_efficiency(
    stats: &WorkerStats,
    level: u32,
    specialty: MissionCategory,
    category: MissionCategory,
    upgrades: &UpgradeState,
) -> f64 {
    let mut efficiency =
        stats.efficiency + EFFICIENCY_PER_LEVEL * f64::from(level.saturating_sub(1));
    if specialty == category {
        efficiency += SPECIALTY_EFFICIENCY_BONUS;
    }
    efficiency * (1.0 + upgrades.efficiency_bonus())
}

pub fn xp_award(tier: MissionTier, upgrades: &UpgradeState) -> u64 {
    (WORKER_TIER_XP[tier.index()] as f64 * (1.0 + upgrades.worker_xp_bonus())).round() as u64
}
