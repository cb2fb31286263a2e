use crate::error::CommandError;
use crate::protocol::{MissionTier, RaidSnapshot, ThreatLevel};

pub const MAX_NOTORIETY: f64 = 100.0;

/// Notoriety gained per completed mission, indexed by tier.
pub const NOTORIETY_PER_TIER: [f64; 4] = [2.0, 5.0, 12.0, 25.0];

/// Completing a risk-reduction mission takes this much off.
pub const COVER_OP_REDUCTION: f64 = 15.0;
pub const BRIBE_REDUCTION: f64 = 10.0;
pub const RAID_REPELLED_REDUCTION: f64 = 20.0;
pub const RAID_LOST_REDUCTION: f64 = 10.0;

const PENALTY_START: f64 = 35.0;
const PENALTY_MAX: f64 = 0.30;

/// Research mitigation per department level above 1, and its cap.
const MITIGATION_PER_LEVEL: f64 = 0.05;
const MITIGATION_CAP: f64 = 0.5;

pub fn threat_level(notoriety: f64) -> ThreatLevel {
    if notoriety < 15.0 {
        ThreatLevel::Unknown
    } else if notoriety < 35.0 {
        ThreatLevel::Suspicious
    } else if notoriety < 60.0 {
        ThreatLevel::Wanted
    } else if notoriety < 85.0 {
        ThreatLevel::Hunted
    } else {
        ThreatLevel::Infamous
    }
}

/// Fraction of every gold payout lost to notoriety: 0 below 35, rising
/// linearly to 30% at the ceiling.
pub fn gold_penalty(notoriety: f64) -> f64 {
    if notoriety < PENALTY_START {
        return 0.0;
    }
    (((notoriety - PENALTY_START) / (MAX_NOTORIETY - PENALTY_START)) * PENALTY_MAX)
        .min(PENALTY_MAX)
}

pub fn bribe_cost(notoriety: f64) -> u64 {
    (20.0 + notoriety * 2.0).floor() as u64
}

/// Share of mission notoriety absorbed by the Research department.
pub fn research_mitigation(research_level: u32) -> f64 {
    (MITIGATION_PER_LEVEL * f64::from(research_level.saturating_sub(1))).min(MITIGATION_CAP)
}

pub fn mission_notoriety(tier: MissionTier, research_level: u32) -> f64 {
    NOTORIETY_PER_TIER[tier.index()] * (1.0 - research_mitigation(research_level))
}

// ── Raid sub-state ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaidState {
    Inactive,
    Active { countdown: u32 },
}

/// What happened to a raid on a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaidOutcome {
    Started,
    Continuing,
    Repelled,
    TimedOut,
}

impl From<RaidState> for RaidSnapshot {
    fn from(state: RaidState) -> Self {
        match state {
            RaidState::Inactive => RaidSnapshot::Inactive,
            RaidState::Active { countdown } => RaidSnapshot::Active { countdown },
        }
    }
}

// ── Notoriety state ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Notoriety {
    value: f64,
    raid: RaidState,
}

impl Notoriety {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            raid: RaidState::Inactive,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn raid(&self) -> RaidState {
        self.raid
    }

    pub fn threat(&self) -> ThreatLevel {
        threat_level(self.value)
    }

    pub fn gold_penalty(&self) -> f64 {
        gold_penalty(self.value)
    }

    pub fn bribe_cost(&self) -> u64 {
        bribe_cost(self.value)
    }

    /// Gold after the notoriety penalty.
    pub fn apply_penalty(&self, gold: f64) -> u64 {
        (gold * (1.0 - self.gold_penalty())).floor().max(0.0) as u64
    }

    pub fn increase(&mut self, amount: f64) {
        self.value = (self.value + amount).clamp(0.0, MAX_NOTORIETY);
    }

    pub fn decrease(&mut self, amount: f64) {
        self.value = (self.value - amount).clamp(0.0, MAX_NOTORIETY);
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, value: f64) {
        self.value = value.clamp(0.0, MAX_NOTORIETY);
    }

    /// Player-issued defense. Reaching zero repels the raid.
    pub fn defend(&mut self) -> Result<RaidOutcome, CommandError> {
        let RaidState::Active { countdown } = self.raid else {
            return Err(CommandError::InvalidTransition("no raid to defend against"));
        };
        let remaining = countdown.saturating_sub(1);
        if remaining == 0 {
            self.raid = RaidState::Inactive;
            self.decrease(RAID_REPELLED_REDUCTION);
            Ok(RaidOutcome::Repelled)
        } else {
            self.raid = RaidState::Active {
                countdown: remaining,
            };
            Ok(RaidOutcome::Continuing)
        }
    }

    /// One tick of the raid machine. `roll` is a uniform draw in `[0, 1)`,
    /// consulted only when no raid is active.
    ///
    /// An active raid counts down and never restarts on the tick it ends, so a
    /// timed-out raid costs exactly one worker.
    pub fn step_raid(&mut self, threshold: f64, chance: f64, countdown: u32, roll: f64) -> Option<RaidOutcome> {
        match self.raid {
            RaidState::Active { countdown } => {
                let remaining = countdown.saturating_sub(1);
                if remaining == 0 {
                    self.raid = RaidState::Inactive;
                    self.decrease(RAID_LOST_REDUCTION);
                    Some(RaidOutcome::TimedOut)
                } else {
                    self.raid = RaidState::Active {
                        countdown: remaining,
                    };
                    Some(RaidOutcome::Continuing)
                }
            }
            RaidState::Inactive => {
                if self.value >= threshold && roll < chance {
                    self.raid = RaidState::Active {
                        countdown: countdown.max(1),
                    };
                    Some(RaidOutcome::Started)
                } else {
                    None
                }
            }
        }
    }
}

impl Default for Notoriety {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threat_bands() {
        assert_eq!(threat_level(0.0), ThreatLevel::Unknown);
        assert_eq!(threat_level(14.9), ThreatLevel::Unknown);
        assert_eq!(threat_level(15.0), ThreatLevel::Suspicious);
        assert_eq!(threat_level(59.0), ThreatLevel::Wanted);
        assert_eq!(threat_level(60.0), ThreatLevel::Hunted);
        assert_eq!(threat_level(100.0), ThreatLevel::Infamous);
    }

    #[test]
    fn penalty_ramps_to_cap() {
        assert_eq!(gold_penalty(0.0), 0.0);
        assert_eq!(gold_penalty(34.9), 0.0);
        assert_eq!(gold_penalty(35.0), 0.0);
        assert!((gold_penalty(67.5) - 0.15).abs() < 1e-9);
        assert!((gold_penalty(100.0) - 0.30).abs() < 1e-9);
    }

    #[test]
    fn bribe_cost_grows_with_notoriety() {
        assert_eq!(bribe_cost(0.0), 20);
        assert_eq!(bribe_cost(50.0), 120);
    }

    #[test]
    fn value_stays_clamped() {
        let mut n = Notoriety::new();
        n.increase(250.0);
        assert_eq!(n.value(), MAX_NOTORIETY);
        n.decrease(500.0);
        assert_eq!(n.value(), 0.0);
    }

    #[test]
    fn research_mitigation_caps() {
        assert_eq!(research_mitigation(1), 0.0);
        assert!((mission_notoriety(MissionTier::Legendary, 3) - 22.5).abs() < 1e-9);
        assert_eq!(research_mitigation(40), 0.5);
    }

    #[test]
    fn raid_starts_only_above_threshold() {
        let mut n = Notoriety::new();
        n.set(59.0);
        assert_eq!(n.step_raid(60.0, 1.0, 10, 0.0), None);
        n.set(60.0);
        assert_eq!(n.step_raid(60.0, 1.0, 10, 0.0), Some(RaidOutcome::Started));
        assert_eq!(n.raid(), RaidState::Active { countdown: 10 });
    }

    #[test]
    fn passive_countdown_times_out_once() {
        let mut n = Notoriety::new();
        n.set(80.0);
        n.step_raid(60.0, 1.0, 3, 0.0);
        assert_eq!(n.step_raid(60.0, 1.0, 3, 0.0), Some(RaidOutcome::Continuing));
        assert_eq!(n.step_raid(60.0, 1.0, 3, 0.0), Some(RaidOutcome::Continuing));
        assert_eq!(n.step_raid(60.0, 1.0, 3, 0.0), Some(RaidOutcome::TimedOut));
        assert_eq!(n.raid(), RaidState::Inactive);
        assert_eq!(n.value(), 70.0);
    }

    #[test]
    fn defending_to_zero_repels() {
        let mut n = Notoriety::new();
        n.set(90.0);
        n.step_raid(60.0, 1.0, 2, 0.0);
        assert_eq!(n.defend(), Ok(RaidOutcome::Continuing));
        assert_eq!(n.defend(), Ok(RaidOutcome::Repelled));
        assert_eq!(n.value(), 70.0);
        assert!(matches!(n.defend(), Err(CommandError::InvalidTransition(_))));
    }
}
