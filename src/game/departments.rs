use crate::game::progression::{department_level, DEPARTMENT_CURVE};
use crate::protocol::{MissionCategory, MissionTier};

/// Department XP earned per completed mission, indexed by tier.
pub const DEPT_TIER_XP: [u64; 4] = [5, 12, 25, 50];

/// Department level at which each tier becomes available.
const TIER_UNLOCK_LEVEL: [u32; 4] = [1, 3, 5, 8];

/// Tiers a department at `level` is allowed to generate, lowest first.
pub fn available_tiers(level: u32) -> Vec<MissionTier> {
    MissionTier::ALL
        .into_iter()
        .filter(|tier| level >= TIER_UNLOCK_LEVEL[tier.index()])
        .collect()
}

/// Highest tier not above `wanted` that `level` unlocks. Petty is always open.
pub fn clamp_tier(wanted: MissionTier, level: u32) -> MissionTier {
    available_tiers(level)
        .into_iter()
        .filter(|tier| *tier <= wanted)
        .max()
        .unwrap_or(MissionTier::Petty)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub category: MissionCategory,
    xp: u64,
}

impl Department {
    pub fn new(category: MissionCategory) -> Self {
        Self { category, xp: 0 }
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    /// Always re-derived from XP.
    pub fn level(&self) -> u32 {
        department_level(self.xp)
    }

    pub fn next_level_xp(&self) -> u64 {
        DEPARTMENT_CURVE.xp_for_level(self.level() + 1)
    }

    /// Adds XP and returns the new level if it changed.
    pub fn add_xp(&mut self, amount: u64) -> Option<u32> {
        let before = self.level();
        self.xp = self.xp.saturating_add(amount);
        let after = self.level();
        (after > before).then_some(after)
    }
}

/// One department per category, in `MissionCategory::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departments {
    departments: Vec<Department>,
}

impl Departments {
    pub fn new() -> Self {
        Self {
            departments: MissionCategory::ALL.into_iter().map(Department::new).collect(),
        }
    }

    pub fn get(&self, category: MissionCategory) -> &Department {
        &self.departments[category as usize]
    }

    pub fn get_mut(&mut self, category: MissionCategory) -> &mut Department {
        &mut self.departments[category as usize]
    }

    pub fn level(&self, category: MissionCategory) -> u32 {
        self.get(category).level()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Department> {
        self.departments.iter()
    }

    /// XP award for one completed mission, after the funding upgrade.
    pub fn xp_award(tier: MissionTier, bonus: f64) -> u64 {
        (DEPT_TIER_XP[tier.index()] as f64 * (1.0 + bonus)).round() as u64
    }
}

impl Default for Departments {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_gates() {
        assert_eq!(available_tiers(1), vec![MissionTier::Petty]);
        assert_eq!(available_tiers(2), vec![MissionTier::Petty]);
        assert_eq!(
            available_tiers(3),
            vec![MissionTier::Petty, MissionTier::Sinister]
        );
        assert_eq!(available_tiers(7).len(), 3);
        assert_eq!(available_tiers(8).len(), 4);
    }

    #[test]
    fn locked_tier_downgrades() {
        assert_eq!(clamp_tier(MissionTier::Legendary, 1), MissionTier::Petty);
        assert_eq!(clamp_tier(MissionTier::Legendary, 5), MissionTier::Diabolical);
        assert_eq!(clamp_tier(MissionTier::Sinister, 9), MissionTier::Sinister);
    }

    #[test]
    fn add_xp_reports_level_up() {
        let mut dept = Department::new(MissionCategory::Heists);
        assert_eq!(dept.add_xp(19), None);
        assert_eq!(dept.add_xp(1), Some(2));
        assert_eq!(dept.level(), 2);
        assert_eq!(dept.next_level_xp(), 69);
    }

    #[test]
    fn departments_indexed_by_category() {
        let mut depts = Departments::new();
        depts.get_mut(MissionCategory::Research).add_xp(500);
        assert!(depts.level(MissionCategory::Research) > 1);
        assert_eq!(depts.level(MissionCategory::Mayhem), 1);
        assert_eq!(depts.get(MissionCategory::Research).category, MissionCategory::Research);
    }

    #[test]
    fn xp_award_applies_bonus() {
        assert_eq!(Departments::xp_award(MissionTier::Petty, 0.0), 5);
        assert_eq!(Departments::xp_award(MissionTier::Legendary, 0.3), 65);
    }
}
