use serde::{Deserialize, Serialize};

use crate::error::{CommandError, Target};
use crate::game::economy::Ledger;

// ── Upgrade identifiers ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeId {
    // Click
    ClickPower,
    ClickGold,
    // Minion training
    MinionSpeed,
    MinionEfficiency,
    MinionXp,
    HireDiscount,
    // War room
    BoardSlots,
    ActiveSlots,
    BoardRefresh,
    // Departments
    DeptXpBoost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeCategory {
    Click,
    Minion,
    WarRoom,
    Department,
}

// ── Upgrade definition ──────────────────────────────────────────────

pub struct UpgradeDef {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: UpgradeCategory,
    pub max_level: u32,
    pub base_cost: u64,
    pub cost_scale: f64,
}

impl UpgradeDef {
    /// Price of buying the level after `current_level`.
    pub fn cost_at(&self, current_level: u32) -> u64 {
        (self.base_cost as f64 * self.cost_scale.powi(current_level as i32)).floor() as u64
    }
}

/// Returns the full catalogue of upgrades.
pub fn all_upgrades() -> &'static [UpgradeDef] {
    use UpgradeCategory::*;
    use UpgradeId::*;

    static UPGRADES: &[UpgradeDef] = &[
        // ── Click ────────────────────────────────────────────────────
        UpgradeDef {
            id: ClickPower,
            name: "Iron Fingers",
            description: "Each click counts as multiple clicks.",
            category: Click,
            max_level: 10,
            base_cost: 30,
            cost_scale: 1.8,
        },
        UpgradeDef {
            id: ClickGold,
            name: "Golden Touch",
            description: "+15% gold from manually completed missions per level.",
            category: Click,
            max_level: 8,
            base_cost: 50,
            cost_scale: 2.0,
        },
        // ── Minion training ──────────────────────────────────────────
        UpgradeDef {
            id: MinionSpeed,
            name: "Speed Drills",
            description: "+8% global minion speed per level.",
            category: Minion,
            max_level: 10,
            base_cost: 60,
            cost_scale: 1.9,
        },
        UpgradeDef {
            id: MinionEfficiency,
            name: "Profit Training",
            description: "+8% global minion efficiency per level.",
            category: Minion,
            max_level: 10,
            base_cost: 60,
            cost_scale: 1.9,
        },
        UpgradeDef {
            id: MinionXp,
            name: "Fast Learner",
            description: "+20% minion XP gain per level.",
            category: Minion,
            max_level: 5,
            base_cost: 100,
            cost_scale: 2.2,
        },
        UpgradeDef {
            id: HireDiscount,
            name: "Recruitment Agency",
            description: "-8% minion hire cost per level.",
            category: Minion,
            max_level: 5,
            base_cost: 75,
            cost_scale: 2.2,
        },
        // ── War room ─────────────────────────────────────────────────
        UpgradeDef {
            id: BoardSlots,
            name: "Expanded Intel",
            description: "+3 mission board slots per level.",
            category: WarRoom,
            max_level: 5,
            base_cost: 80,
            cost_scale: 2.0,
        },
        UpgradeDef {
            id: ActiveSlots,
            name: "Operations Desk",
            description: "+1 active mission slot per level.",
            category: WarRoom,
            max_level: 5,
            base_cost: 120,
            cost_scale: 2.5,
        },
        UpgradeDef {
            id: BoardRefresh,
            name: "Rapid Intel",
            description: "Board refreshes 20% faster per level.",
            category: WarRoom,
            max_level: 5,
            base_cost: 70,
            cost_scale: 2.0,
        },
        // ── Departments ──────────────────────────────────────────────
        UpgradeDef {
            id: DeptXpBoost,
            name: "Department Funding",
            description: "+15% department XP gain per level.",
            category: Department,
            max_level: 8,
            base_cost: 90,
            cost_scale: 2.0,
        },
    ];

    UPGRADES
}

/// Looks up a single upgrade definition by id.
pub fn get_upgrade(id: UpgradeId) -> &'static UpgradeDef {
    all_upgrades()
        .iter()
        .find(|u| u.id == id)
        .expect("unknown upgrade id")
}

// ── Player upgrade state ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeState {
    levels: Vec<(UpgradeId, u32)>,
}

impl UpgradeState {
    pub fn new() -> Self {
        Self {
            levels: all_upgrades().iter().map(|u| (u.id, 0)).collect(),
        }
    }

    pub fn level(&self, id: UpgradeId) -> u32 {
        self.levels
            .iter()
            .find(|(uid, _)| *uid == id)
            .map(|(_, level)| *level)
            .unwrap_or(0)
    }

    /// Cost of the next level, or `None` when already maxed.
    pub fn next_cost(&self, id: UpgradeId) -> Option<u64> {
        let def = get_upgrade(id);
        let level = self.level(id);
        (level < def.max_level).then(|| def.cost_at(level))
    }

    /// Attempts to buy one level of the given upgrade, debiting its cost from
    /// the ledger. Returns the new level.
    pub fn purchase(&mut self, id: UpgradeId, ledger: &mut Ledger) -> Result<u32, CommandError> {
        let def = get_upgrade(id);
        let slot = self
            .levels
            .iter_mut()
            .find(|(uid, _)| *uid == id)
            .ok_or(CommandError::NotFound(Target::Upgrade(id)))?;

        if slot.1 >= def.max_level {
            return Err(CommandError::InvalidTransition("upgrade already at max level"));
        }
        ledger.debit(def.cost_at(slot.1))?;
        slot.1 += 1;
        Ok(slot.1)
    }

    // ── Derived effects ─────────────────────────────────────────────

    /// Click units removed per manual click.
    pub fn click_power(&self) -> u32 {
        1 + self.level(UpgradeId::ClickPower)
    }

    /// Gold multiplier for manually completed missions.
    pub fn click_gold_multiplier(&self) -> f64 {
        1.0 + 0.15 * f64::from(self.level(UpgradeId::ClickGold))
    }

    pub fn speed_bonus(&self) -> f64 {
        0.08 * f64::from(self.level(UpgradeId::MinionSpeed))
    }

    pub fn efficiency_bonus(&self) -> f64 {
        0.08 * f64::from(self.level(UpgradeId::MinionEfficiency))
    }

    pub fn worker_xp_bonus(&self) -> f64 {
        0.20 * f64::from(self.level(UpgradeId::MinionXp))
    }

    pub fn department_xp_bonus(&self) -> f64 {
        0.15 * f64::from(self.level(UpgradeId::DeptXpBoost))
    }

    /// Fraction knocked off the hire price.
    pub fn hire_discount(&self) -> f64 {
        0.08 * f64::from(self.level(UpgradeId::HireDiscount))
    }

    /// Fraction knocked off the board refill interval.
    pub fn refresh_speedup(&self, per_level: f64) -> f64 {
        per_level * f64::from(self.level(UpgradeId::BoardRefresh))
    }

    pub fn board_slot_levels(&self) -> usize {
        self.level(UpgradeId::BoardSlots) as usize
    }

    pub fn active_slot_levels(&self) -> usize {
        self.level(UpgradeId::ActiveSlots) as usize
    }
}

impl Default for UpgradeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_scales_per_level() {
        let def = get_upgrade(UpgradeId::ClickPower);
        assert_eq!(def.cost_at(0), 30);
        assert_eq!(def.cost_at(1), 54); // 30 * 1.8
        assert_eq!(def.cost_at(2), 97); // 30 * 3.24 = 97.2
    }

    #[test]
    fn purchase_debits_and_levels_up() {
        let mut upgrades = UpgradeState::new();
        let mut ledger = Ledger::default();
        ledger.credit_unearned(100);

        assert_eq!(upgrades.purchase(UpgradeId::ClickPower, &mut ledger), Ok(1));
        assert_eq!(ledger.balance(), 70);
        assert_eq!(upgrades.click_power(), 2);
        assert_eq!(upgrades.next_cost(UpgradeId::ClickPower), Some(54));
    }

    #[test]
    fn purchase_fails_with_insufficient_balance() {
        let mut upgrades = UpgradeState::new();
        let mut ledger = Ledger::default();
        ledger.credit_unearned(10);

        let result = upgrades.purchase(UpgradeId::ActiveSlots, &mut ledger);
        assert!(matches!(result, Err(CommandError::InsufficientFunds { .. })));
        assert_eq!(ledger.balance(), 10);
        assert_eq!(upgrades.level(UpgradeId::ActiveSlots), 0);
    }

    #[test]
    fn maxed_upgrade_never_charges_again() {
        let mut upgrades = UpgradeState::new();
        let mut ledger = Ledger::default();
        ledger.credit_unearned(1_000_000);

        let max = get_upgrade(UpgradeId::MinionXp).max_level;
        for _ in 0..max {
            upgrades.purchase(UpgradeId::MinionXp, &mut ledger).unwrap();
        }
        let balance = ledger.balance();

        for _ in 0..5 {
            let result = upgrades.purchase(UpgradeId::MinionXp, &mut ledger);
            assert!(matches!(result, Err(CommandError::InvalidTransition(_))));
        }
        assert_eq!(upgrades.level(UpgradeId::MinionXp), max);
        assert_eq!(upgrades.next_cost(UpgradeId::MinionXp), None);
        assert_eq!(ledger.balance(), balance);
    }

    #[test]
    fn fresh_state_has_neutral_effects() {
        let upgrades = UpgradeState::new();
        assert_eq!(upgrades.click_power(), 1);
        assert_eq!(upgrades.click_gold_multiplier(), 1.0);
        assert_eq!(upgrades.speed_bonus(), 0.0);
        assert_eq!(upgrades.hire_discount(), 0.0);
    }
}
