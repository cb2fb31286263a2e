use hecs::Entity;

use crate::ecs::world::Roster;
use crate::game::missions::Mission;
use crate::protocol::{MissionId, MissionStatus};

/// The result of one scheduler pass.
pub struct AssignmentResult {
    pub assigned: Vec<(MissionId, Entity)>,
    pub log_entries: Vec<String>,
}

/// Matches idle workers to queued active missions.
///
/// Missions are served highest tier first; ties keep queue order. Each mission
/// takes an idle worker whose specialty matches its category if there is one,
/// otherwise the longest-serving idle worker. Missions a player has started
/// clicking are left to the player.
pub fn assignment_system(active: &mut [Mission], roster: &mut Roster) -> AssignmentResult {
    let mut assigned = Vec::new();
    let mut log_entries = Vec::new();

    let mut idle = roster.idle_workers();
    if idle.is_empty() {
        return AssignmentResult {
            assigned,
            log_entries,
        };
    }

    let mut queued: Vec<usize> = active
        .iter()
        .enumerate()
        .filter(|(_, m)| m.status == MissionStatus::Queued && !m.is_assigned())
        .map(|(i, _)| i)
        .collect();
    // Stable sort, so equal tiers stay in queue order.
    queued.sort_by(|a, b| active[*b].tier.cmp(&active[*a].tier));

    for index in queued {
        if idle.is_empty() {
            break;
        }
        let mission = &mut active[index];
        let category = mission.category();
        let pick = idle
            .iter()
            .position(|worker| roster.specialty(*worker) == Some(category))
            .unwrap_or(0);
        let worker = idle.remove(pick);

        mission.assigned_worker = Some(worker);
        mission.status = MissionStatus::InProgress;
        roster.assign(worker, mission.id);

        if let Some(name) = roster.name(worker) {
            log_entries.push(format!("[{}] assigned to {}", name, mission.template.name));
        }
        assigned.push((mission.id, worker));
    }

    AssignmentResult {
        assigned,
        log_entries,
    }
}
