use crate::ecs::world::Roster;
use crate::game::missions::Mission;
use crate::game::upgrades::UpgradeState;
use crate::game::workers::effective_speed;
use crate::protocol::{MissionId, MissionStatus, Tick};

/// The result of advancing worker progress for one tick.
pub struct ProgressResult {
    /// Missions whose time ran out this tick, in queue order.
    pub completed: Vec<MissionId>,
    pub log_entries: Vec<String>,
}

/// Advances every worker-assigned mission by its worker's effective speed.
///
/// Completed missions are only flagged here; the caller removes and pays them
/// out so that every completion goes through one settlement path.
pub fn mission_progress_system(
    active: &mut [Mission],
    roster: &Roster,
    upgrades: &UpgradeState,
) -> ProgressResult {
    let mut completed = Vec::new();
    let mut log_entries = Vec::new();

    for mission in active.iter_mut() {
        if mission.status != MissionStatus::InProgress {
            continue;
        }
        let Some(worker) = mission.assigned_worker else {
            continue;
        };
        let (Some((stats, level)), Some(specialty)) =
            (roster.stats(worker), roster.specialty(worker))
        else {
            continue;
        };

        let speed = effective_speed(&stats, level, specialty, mission.category(), upgrades);
        if mission.advance_time(speed) {
            completed.push(mission.id);
            if let Some(name) = roster.name(worker) {
                log_entries.push(format!("[{}] finished {}", name, mission.template.name));
            }
        }
    }

    ProgressResult {
        completed,
        log_entries,
    }
}

/// Drops active missions that were accepted but never touched for `ttl`
/// ticks. Returns the dropped missions.
pub fn expire_stale_queued(active: &mut Vec<Mission>, now: Tick, ttl: u64) -> Vec<Mission> {
    let is_stale = |m: &Mission| {
        m.status == MissionStatus::Queued
            && !m.is_assigned()
            && m.clicks_remaining == m.clicks_required
            && m.accepted_at.is_some_and(|at| now.saturating_sub(at) >= ttl)
    };

    let (stale, keep): (Vec<Mission>, Vec<Mission>) =
        std::mem::take(active).into_iter().partition(|m| is_stale(m));
    *active = keep;
    stale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Appearance, WorkerStats};
    use crate::ecs::world::Recruit;
    use crate::game::catalog::all_templates;
    use crate::protocol::{Accessory, MissionCategory, MissionTier};

    fn mission(id: MissionId, time: f64) -> Mission {
        let template = all_templates()[0];
        Mission {
            id,
            template,
            tier: MissionTier::Petty,
            status: MissionStatus::Queued,
            gold_reward: 5,
            time_to_complete: time,
            time_remaining: time,
            clicks_required: 10,
            clicks_remaining: 10,
            assigned_worker: None,
            created_at: 0,
            accepted_at: Some(0),
            is_bonus_op: false,
            bonus_op_expiry: None,
            is_risk_reduction_op: false,
        }
    }

    fn roster_with_worker(specialty: MissionCategory) -> (Roster, hecs::Entity) {
        let mut roster = Roster::new();
        let entity = roster.spawn(Recruit {
            name: "Grim".to_string(),
            appearance: Appearance {
                color: "#000000".to_string(),
                accessory: Accessory::None,
            },
            stats: WorkerStats {
                speed: 1.0,
                efficiency: 1.0,
            },
            specialty,
        });
        (roster, entity)
    }

    #[test]
    fn only_assigned_missions_advance() {
        let (roster, worker) = roster_with_worker(MissionCategory::Mayhem);
        let upgrades = UpgradeState::new();
        let mut active = vec![mission(1, 8.0), mission(2, 8.0)];
        active[0].assigned_worker = Some(worker);
        active[0].status = MissionStatus::InProgress;

        let result = mission_progress_system(&mut active, &roster, &upgrades);
        assert!(result.completed.is_empty());
        assert!(active[0].time_remaining < 8.0);
        assert_eq!(active[1].time_remaining, 8.0);
    }

    #[test]
    fn mission_completes_when_time_runs_out() {
        let off_category = if all_templates()[0].category == MissionCategory::Mayhem {
            MissionCategory::Schemes
        } else {
            MissionCategory::Mayhem
        };
        let (roster, worker) = roster_with_worker(off_category);
        let upgrades = UpgradeState::new();
        let mut active = vec![mission(7, 2.0)];
        active[0].assigned_worker = Some(worker);
        active[0].status = MissionStatus::InProgress;

        let first = mission_progress_system(&mut active, &roster, &upgrades);
        assert!(first.completed.is_empty());
        assert_eq!(active[0].time_remaining, 1.0);

        let second = mission_progress_system(&mut active, &roster, &upgrades);
        assert_eq!(second.completed, vec![7]);
        assert_eq!(second.log_entries.len(), 1);
        assert_eq!(active[0].status, MissionStatus::Complete);
        assert_eq!(active[0].time_remaining, 0.0);
    }

    #[test]
    fn stale_queued_missions_are_dropped() {
        let mut active = vec![mission(1, 8.0), mission(2, 8.0), mission(3, 8.0)];
        active[1].clicks_remaining = 9;
        active[1].status = MissionStatus::InProgress;
        active[2].accepted_at = Some(15);

        let dropped = expire_stale_queued(&mut active, 20, 10);
        assert_eq!(dropped.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(active.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 3]);
    }
}
