use std::collections::HashSet;

use hecs::{Entity, World};

use crate::protocol::{MissionCategory, MissionId, WorkerId, WorkerSnapshot, WorkerStatusKind};

use super::components::{
    Appearance, Assignment, HireOrder, Specialty, Worker, WorkerName, WorkerState, WorkerStats,
    WorkerXP,
};

/// Everything rolled for a new hire before it becomes an entity.
#[derive(Debug, Clone)]
pub struct Recruit {
    pub name: String,
    pub appearance: Appearance,
    pub stats: WorkerStats,
    pub specialty: MissionCategory,
}

/// The worker roster: an ECS world holding one entity per hired worker.
pub struct Roster {
    world: World,
    /// Name-bank indices handed out since the bank last wrapped.
    pub used_names: HashSet<usize>,
    next_hire: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            used_names: HashSet::new(),
            next_hire: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub fn len(&self) -> usize {
        self.world.query::<&Worker>().iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spawns an idle worker at level 1.
    pub fn spawn(&mut self, recruit: Recruit) -> Entity {
        let order = HireOrder(self.next_hire);
        self.next_hire += 1;

        self.world.spawn((
            Worker,
            order,
            WorkerName { name: recruit.name },
            recruit.appearance,
            recruit.stats,
            Specialty {
                category: recruit.specialty,
            },
            WorkerState {
                state: WorkerStatusKind::Idle,
            },
            WorkerXP { xp: 0 },
            Assignment { mission: None },
        ))
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn remove(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity).is_ok()
    }

    /// All workers in hire order.
    pub fn workers(&self) -> Vec<Entity> {
        self.sorted(|_| true)
    }

    /// Idle workers in hire order.
    pub fn idle_workers(&self) -> Vec<Entity> {
        self.sorted(|state| state.state == WorkerStatusKind::Idle)
    }

    pub fn working_workers(&self) -> Vec<Entity> {
        self.sorted(|state| state.state == WorkerStatusKind::Working)
    }

    fn sorted(&self, keep: impl Fn(&WorkerState) -> bool) -> Vec<Entity> {
        let mut found: Vec<(HireOrder, Entity)> = self
            .world
            .query::<hecs::With<(&HireOrder, &WorkerState), &Worker>>()
            .iter()
            .filter(|(_entity, (_order, state))| keep(*state))
            .map(|(entity, (order, _state))| (*order, entity))
            .collect();
        found.sort_by_key(|(order, _)| *order);
        found.into_iter().map(|(_, entity)| entity).collect()
    }

    pub fn name(&self, entity: Entity) -> Option<String> {
        self.world
            .get::<&WorkerName>(entity)
            .ok()
            .map(|n| n.name.clone())
    }

    pub fn specialty(&self, entity: Entity) -> Option<MissionCategory> {
        self.world
            .get::<&Specialty>(entity)
            .ok()
            .map(|s| s.category)
    }

    pub fn assignment(&self, entity: Entity) -> Option<MissionId> {
        self.world
            .get::<&Assignment>(entity)
            .ok()
            .and_then(|a| a.mission)
    }

    pub fn stats(&self, entity: Entity) -> Option<(WorkerStats, u32)> {
        let mut query = self
            .world
            .query_one::<(&WorkerStats, &WorkerXP)>(entity)
            .ok()?;
        query.get().map(|(stats, xp)| (stats.clone(), xp.level()))
    }

    /// Flips a worker to working on `mission`.
    pub fn assign(&mut self, entity: Entity, mission: MissionId) {
        if let Ok((state, assignment)) = self
            .world
            .query_one_mut::<(&mut WorkerState, &mut Assignment)>(entity)
        {
            state.state = WorkerStatusKind::Working;
            assignment.mission = Some(mission);
        }
    }

    /// Flips a worker back to idle.
    pub fn release(&mut self, entity: Entity) {
        if let Ok((state, assignment)) = self
            .world
            .query_one_mut::<(&mut WorkerState, &mut Assignment)>(entity)
        {
            state.state = WorkerStatusKind::Idle;
            assignment.mission = None;
        }
    }

    /// Adds XP and returns `(name, new level)` if the worker levelled up.
    pub fn grant_xp(&mut self, entity: Entity, amount: u64) -> Option<(String, u32)> {
        let (name, xp) = self
            .world
            .query_one_mut::<(&WorkerName, &mut WorkerXP)>(entity)
            .ok()?;
        let before = xp.level();
        xp.xp = xp.xp.saturating_add(amount);
        let after = xp.level();
        (after > before).then(|| (name.name.clone(), after))
    }

    pub fn snapshot(&self) -> Vec<WorkerSnapshot> {
        self.workers()
            .into_iter()
            .filter_map(|entity| self.worker_snapshot(entity))
            .collect()
    }

    fn worker_snapshot(&self, entity: Entity) -> Option<WorkerSnapshot> {
        let mut query = self
            .world
            .query_one::<(
                &WorkerName,
                &Appearance,
                &WorkerState,
                &Assignment,
                &WorkerStats,
                &Specialty,
                &WorkerXP,
            )>(entity)
            .ok()?;
        let (name, appearance, state, assignment, stats, specialty, xp) = query.get()?;

        Some(WorkerSnapshot {
            id: worker_id(entity),
            name: name.name.clone(),
            color: appearance.color.clone(),
            accessory: appearance.accessory,
            status: state.state,
            assigned_mission: assignment.mission,
            speed: stats.speed,
            efficiency: stats.efficiency,
            specialty: specialty.category,
            xp: xp.xp,
            level: xp.level(),
        })
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable external id for a worker entity.
pub fn worker_id(entity: Entity) -> WorkerId {
    entity.to_bits().get()
}
