use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::EngineConfig;
use crate::game::catalog::{self, MissionTemplate};
use crate::game::departments::{clamp_tier, Departments};
use crate::protocol::{
    MissionCategory, MissionId, MissionSnapshot, MissionStatus, MissionTier, Tick,
};

/// Per-tier base values: (gold, time units, click units).
pub const TIER_CONFIG: [(u64, f64, u32); 4] = [
    (5, 8.0, 10),
    (15, 20.0, 20),
    (40, 45.0, 35),
    (100, 75.0, 50),
];

/// Compounding gold growth per villain level above 1.
pub const GOLD_SCALE_PER_LEVEL: f64 = 0.10;

/// Villain level at which Legendary missions start appearing.
pub const LEGENDARY_VILLAIN_LEVEL: u32 = 5;

/// Risk-reduction missions cost this share of a Petty mission.
const COVER_OP_COST_FACTOR: f64 = 0.75;

// ── Mission instance ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    pub id: MissionId,
    pub template: MissionTemplate,
    pub tier: MissionTier,
    pub status: MissionStatus,
    pub gold_reward: u64,
    pub time_to_complete: f64,
    pub time_remaining: f64,
    pub clicks_required: u32,
    pub clicks_remaining: u32,
    /// Back reference to the worker doing the job; the roster owns the worker.
    pub assigned_worker: Option<hecs::Entity>,
    pub created_at: Tick,
    pub accepted_at: Option<Tick>,
    pub is_bonus_op: bool,
    /// Only set while the mission sits on the board.
    pub bonus_op_expiry: Option<Tick>,
    pub is_risk_reduction_op: bool,
}

impl Mission {
    pub fn category(&self) -> MissionCategory {
        self.template.category
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_worker.is_some()
    }

    pub fn is_expired(&self, now: Tick) -> bool {
        self.bonus_op_expiry.is_some_and(|expiry| now >= expiry)
    }

    /// Queued copy for the active queue. Board-only expiry is dropped.
    pub fn accepted(mut self, now: Tick) -> Self {
        self.status = MissionStatus::Queued;
        self.bonus_op_expiry = None;
        self.accepted_at = Some(now);
        self
    }

    /// Manual progress. Returns `true` when this call completed the mission.
    pub fn apply_clicks(&mut self, power: u32) -> bool {
        self.clicks_remaining = self.clicks_remaining.saturating_sub(power.max(1));
        if self.clicks_remaining == 0 {
            self.status = MissionStatus::Complete;
            true
        } else {
            self.status = MissionStatus::InProgress;
            false
        }
    }

    /// Worker progress. Returns `true` when this call completed the mission.
    pub fn advance_time(&mut self, speed: f64) -> bool {
        self.time_remaining = (self.time_remaining - speed).max(0.0);
        if self.time_remaining <= 0.0 {
            self.status = MissionStatus::Complete;
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self) -> MissionSnapshot {
        MissionSnapshot {
            id: self.id,
            name: self.template.name.to_string(),
            description: self.template.description.to_string(),
            category: self.template.category,
            tier: self.tier,
            status: self.status,
            gold_reward: self.gold_reward,
            time_to_complete: self.time_to_complete,
            time_remaining: self.time_remaining,
            clicks_required: self.clicks_required,
            clicks_remaining: self.clicks_remaining,
            assigned_worker: self.assigned_worker.map(|e| e.to_bits().get()),
            created_at: self.created_at,
            is_bonus_op: self.is_bonus_op,
            bonus_op_expiry: self.bonus_op_expiry,
            is_risk_reduction_op: self.is_risk_reduction_op,
        }
    }
}

// ── Generation ──────────────────────────────────────────────────────

/// Everything the generator reads from the rest of the engine.
pub struct GenerationContext<'a> {
    pub villain_level: u32,
    pub departments: &'a Departments,
    pub notoriety: f64,
    pub now: Tick,
    pub config: &'a EngineConfig,
}

/// Tier weights (percent) for a villain level, indexed by tier.
///
/// Each level above 1 moves three points out of Petty (one to Sinister, two to
/// Diabolical) for up to ten levels. Legendary opens at
/// `LEGENDARY_VILLAIN_LEVEL` and keeps taking points from Petty up to 15.
pub fn tier_weights(villain_level: u32) -> [u32; 4] {
    let shift = villain_level.saturating_sub(1).min(10) * 3;
    let mut petty = 50 - shift;
    let sinister = 35 + shift / 3;
    let diabolical = 15 + shift - shift / 3;
    let mut legendary = 0;

    if villain_level >= LEGENDARY_VILLAIN_LEVEL {
        legendary = (5 + (villain_level - LEGENDARY_VILLAIN_LEVEL)).min(15);
        petty -= legendary;
    }

    [petty, sinister, diabolical, legendary]
}

pub fn roll_tier<R: Rng + ?Sized>(rng: &mut R, villain_level: u32) -> MissionTier {
    let weights = tier_weights(villain_level);
    let roll = rng.gen_range(0..100);
    let mut acc = 0;
    for tier in MissionTier::ALL {
        acc += weights[tier.index()];
        if roll < acc {
            return tier;
        }
    }
    MissionTier::Petty
}

/// Gold for a tier at a villain level, before any bonus.
pub fn scaled_gold(tier: MissionTier, villain_level: u32) -> u64 {
    let (base, _, _) = TIER_CONFIG[tier.index()];
    let scale = (1.0 + GOLD_SCALE_PER_LEVEL).powi(villain_level.saturating_sub(1) as i32);
    (base as f64 * scale).round() as u64
}

fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Produce one mission for the board. Never fails as long as the catalog is
/// populated.
pub fn generate_mission<R: Rng + ?Sized>(
    rng: &mut R,
    id: MissionId,
    ctx: &GenerationContext<'_>,
) -> Mission {
    let config = ctx.config;

    if ctx.notoriety > config.cover_op_notoriety_threshold && chance(rng, config.cover_op_chance) {
        return generate_cover_op(rng, id, ctx.now);
    }

    let drawn = roll_tier(rng, ctx.villain_level);
    let category = *MissionCategory::ALL
        .choose(rng)
        .unwrap_or(&MissionCategory::Schemes);
    let tier = clamp_tier(drawn, ctx.departments.level(category));

    let template = **catalog::candidates(category, tier)
        .choose(rng)
        .expect("mission catalog is empty");

    let (_, time, clicks) = TIER_CONFIG[tier.index()];
    let mut gold_reward = scaled_gold(tier, ctx.villain_level);

    let is_bonus_op = chance(rng, config.bonus_op_chance);
    let bonus_op_expiry = if is_bonus_op {
        gold_reward = (gold_reward as f64 * config.bonus_op_multiplier).round() as u64;
        Some(ctx.now + config.bonus_op_lifetime_ticks)
    } else {
        None
    };

    Mission {
        id,
        template,
        tier,
        status: MissionStatus::Queued,
        gold_reward,
        time_to_complete: time,
        time_remaining: time,
        clicks_required: clicks,
        clicks_remaining: clicks,
        assigned_worker: None,
        created_at: ctx.now,
        accepted_at: None,
        is_bonus_op,
        bonus_op_expiry,
        is_risk_reduction_op: false,
    }
}

fn generate_cover_op<R: Rng + ?Sized>(rng: &mut R, id: MissionId, now: Tick) -> Mission {
    let template = *catalog::cover_templates()
        .choose(rng)
        .expect("cover template table is empty");
    let (_, time, clicks) = TIER_CONFIG[MissionTier::Petty.index()];
    let time = (time * COVER_OP_COST_FACTOR).ceil();
    let clicks = (f64::from(clicks) * COVER_OP_COST_FACTOR).ceil() as u32;

    Mission {
        id,
        template,
        tier: MissionTier::Petty,
        status: MissionStatus::Queued,
        gold_reward: 0,
        time_to_complete: time,
        time_remaining: time,
        clicks_required: clicks,
        clicks_remaining: clicks,
        assigned_worker: None,
        created_at: now,
        accepted_at: None,
        is_bonus_op: false,
        bonus_op_expiry: None,
        is_risk_reduction_op: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet_config() -> EngineConfig {
        EngineConfig {
            bonus_op_chance: 0.0,
            cover_op_chance: 0.0,
            ..EngineConfig::default()
        }
    }

    fn ctx<'a>(
        config: &'a EngineConfig,
        departments: &'a Departments,
        villain_level: u32,
        notoriety: f64,
    ) -> GenerationContext<'a> {
        GenerationContext {
            villain_level,
            departments,
            notoriety,
            now: 100,
            config,
        }
    }

    #[test]
    fn weights_always_sum_to_100() {
        for level in 1..60 {
            let w = tier_weights(level);
            assert_eq!(w.iter().sum::<u32>(), 100, "level {}", level);
        }
        assert_eq!(tier_weights(1), [50, 35, 15, 0]);
        assert_eq!(tier_weights(4)[3], 0);
        assert_eq!(tier_weights(5)[3], 5);
        assert_eq!(tier_weights(40)[3], 15);
    }

    #[test]
    fn low_departments_only_generate_petty() {
        let config = quiet_config();
        let departments = Departments::new();
        let mut rng = StdRng::seed_from_u64(1);
        for id in 0..200 {
            let mission = generate_mission(&mut rng, id, &ctx(&config, &departments, 12, 0.0));
            assert_eq!(mission.tier, MissionTier::Petty);
            assert_eq!(mission.template.tier, MissionTier::Petty);
            assert_eq!(mission.clicks_required, 10);
            assert_eq!(mission.status, MissionStatus::Queued);
        }
    }

    #[test]
    fn unlocked_department_generates_higher_tiers() {
        let config = quiet_config();
        let mut departments = Departments::new();
        for category in MissionCategory::ALL {
            departments.get_mut(category).add_xp(10_000);
        }
        let mut rng = StdRng::seed_from_u64(2);
        let tiers: Vec<_> = (0..300)
            .map(|id| generate_mission(&mut rng, id, &ctx(&config, &departments, 8, 0.0)).tier)
            .collect();
        assert!(tiers.contains(&MissionTier::Diabolical));
        assert!(tiers.contains(&MissionTier::Legendary));
    }

    #[test]
    fn gold_compounds_with_villain_level() {
        assert_eq!(scaled_gold(MissionTier::Petty, 1), 5);
        assert_eq!(scaled_gold(MissionTier::Legendary, 1), 100);
        assert_eq!(scaled_gold(MissionTier::Legendary, 3), 121);
    }

    #[test]
    fn bonus_ops_pay_more_and_expire() {
        let config = EngineConfig {
            bonus_op_chance: 1.0,
            cover_op_chance: 0.0,
            ..EngineConfig::default()
        };
        let departments = Departments::new();
        let mut rng = StdRng::seed_from_u64(3);
        let mission = generate_mission(&mut rng, 1, &ctx(&config, &departments, 1, 0.0));
        assert!(mission.is_bonus_op);
        assert_eq!(mission.gold_reward, 10);
        assert_eq!(mission.bonus_op_expiry, Some(130));
        assert!(!mission.is_expired(129));
        assert!(mission.is_expired(130));

        let accepted = mission.accepted(131);
        assert!(accepted.is_bonus_op);
        assert!(!accepted.is_expired(10_000));
    }

    #[test]
    fn cover_ops_need_notoriety() {
        let config = EngineConfig {
            bonus_op_chance: 0.0,
            cover_op_chance: 1.0,
            ..EngineConfig::default()
        };
        let departments = Departments::new();
        let mut rng = StdRng::seed_from_u64(4);

        let calm = generate_mission(&mut rng, 1, &ctx(&config, &departments, 1, 40.0));
        assert!(!calm.is_risk_reduction_op);

        let hot = generate_mission(&mut rng, 2, &ctx(&config, &departments, 1, 41.0));
        assert!(hot.is_risk_reduction_op);
        assert_eq!(hot.gold_reward, 0);
        assert_eq!(hot.time_to_complete, 6.0);
        assert_eq!(hot.clicks_required, 8);
    }

    #[test]
    fn clicks_complete_on_exact_zero() {
        let config = quiet_config();
        let departments = Departments::new();
        let mut rng = StdRng::seed_from_u64(5);
        let mut mission = generate_mission(&mut rng, 1, &ctx(&config, &departments, 1, 0.0));

        assert!(!mission.apply_clicks(9));
        assert_eq!(mission.status, MissionStatus::InProgress);
        assert!(mission.apply_clicks(1));
        assert_eq!(mission.status, MissionStatus::Complete);
        assert_eq!(mission.clicks_remaining, 0);
    }
}
