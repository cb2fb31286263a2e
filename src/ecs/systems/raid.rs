use rand::Rng;

use crate::config::EngineConfig;
use crate::ecs::world::Roster;
use crate::game::missions::Mission;
use crate::game::notoriety::{Notoriety, RaidOutcome};
use crate::protocol::{MissionId, MissionStatus};

/// A worker carried off by a raid that nobody stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct LostWorker {
    pub name: String,
    /// The mission that went back to the queue, if the worker was busy.
    pub requeued: Option<MissionId>,
}

/// The result of one raid step.
pub struct RaidResult {
    pub outcome: Option<RaidOutcome>,
    pub lost: Option<LostWorker>,
    pub log_entries: Vec<String>,
}

/// Starts, advances or resolves the raid for one tick.
///
/// A raid that times out costs exactly one worker: an idle one if any,
/// otherwise the longest-serving busy one, whose mission returns to the queue
/// with its progress kept.
pub fn raid_system<R: Rng + ?Sized>(
    notoriety: &mut Notoriety,
    roster: &mut Roster,
    active: &mut [Mission],
    config: &EngineConfig,
    rng: &mut R,
) -> RaidResult {
    let mut log_entries = Vec::new();
    let roll: f64 = rng.gen();

    let outcome = notoriety.step_raid(
        config.raid_threshold,
        config.raid_chance,
        config.raid_countdown,
        roll,
    );

    let mut lost = None;
    match outcome {
        Some(RaidOutcome::Started) => {
            log_entries.push(format!(
                "Raid incoming! {} ticks to defend the lair",
                config.raid_countdown.max(1)
            ));
        }
        Some(RaidOutcome::TimedOut) => {
            lost = lose_worker(roster, active);
            match &lost {
                Some(worker) => {
                    log_entries.push(format!("The raid carried off {}", worker.name));
                }
                None => log_entries.push("The raid found nobody to take".to_string()),
            }
        }
        _ => {}
    }

    RaidResult {
        outcome,
        lost,
        log_entries,
    }
}

fn lose_worker(roster: &mut Roster, active: &mut [Mission]) -> Option<LostWorker> {
    let victim = roster
        .idle_workers()
        .first()
        .copied()
        .or_else(|| roster.working_workers().first().copied())?;
    let name = roster.name(victim).unwrap_or_default();

    let mut requeued = None;
    if let Some(mission) = active
        .iter_mut()
        .find(|m| m.assigned_worker == Some(victim))
    {
        mission.assigned_worker = None;
        mission.status = MissionStatus::Queued;
        requeued = Some(mission.id);
    }

    roster.remove(victim);
    Some(LostWorker { name, requeued })
}
