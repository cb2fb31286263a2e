use hecs::Entity;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::ecs::systems::assignment::assignment_system;
use crate::ecs::systems::board::{
    active_capacity, board_capacity, fill_board, prune_expired_bonus_ops, refill_interval,
};
use crate::ecs::systems::mission_progress::{expire_stale_queued, mission_progress_system};
use crate::ecs::systems::raid::raid_system;
use crate::ecs::world::{worker_id, Roster};
use crate::error::{CommandError, Target};
use crate::game::departments::{available_tiers, Departments};
use crate::game::economy::Ledger;
use crate::game::missions::{GenerationContext, Mission};
use crate::game::notifications::NotificationLog;
use crate::game::notoriety::{
    mission_notoriety, Notoriety, RaidOutcome, RaidState, BRIBE_REDUCTION, COVER_OP_REDUCTION,
    MAX_NOTORIETY,
};
use crate::game::progression::{villain_level, villain_title};
use crate::game::upgrades::{all_upgrades, get_upgrade, UpgradeId, UpgradeState};
use crate::game::workers::{self, effective_efficiency, hire_cost, recruit_worker};
use crate::protocol::{
    DepartmentSnapshot, EngineSnapshot, MissionCategory, MissionId, MissionStatus,
    NotificationId, NotificationKind, NotificationSnapshot, NotorietySnapshot, ThreatLevel, Tick,
    UpgradeSnapshot, WorkerId, WorkerSnapshot,
};

/// What one call to [`Engine::tick`] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    /// Missions finished by workers this tick.
    pub completed: Vec<MissionId>,
    /// Board missions generated by a refill this tick.
    pub posted: Vec<MissionId>,
    pub assigned: Vec<(MissionId, WorkerId)>,
    pub raid: Option<RaidOutcome>,
}

/// The simulation: one explicit value that owns every piece of session state.
///
/// Commands return `Err` without touching anything when they are rejected.
/// All randomness is drawn from the injected `R`.
pub struct Engine<R: Rng = StdRng> {
    config: EngineConfig,
    rng: R,
    tick: Tick,
    ledger: Ledger,
    roster: Roster,
    board: Vec<Mission>,
    active: Vec<Mission>,
    upgrades: UpgradeState,
    departments: Departments,
    notoriety: Notoriety,
    notifications: NotificationLog,
    next_mission_id: MissionId,
    last_refill: Tick,
}

impl Engine<StdRng> {
    /// Seeds from `config.seed`, or from entropy when there is none.
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        let mut engine = Self {
            config,
            rng,
            tick: 0,
            ledger: Ledger::default(),
            roster: Roster::new(),
            board: Vec::new(),
            active: Vec::new(),
            upgrades: UpgradeState::new(),
            departments: Departments::new(),
            notoriety: Notoriety::new(),
            notifications: NotificationLog::new(),
            next_mission_id: 0,
            last_refill: 0,
        };
        engine.initialize();
        engine
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Puts the session back to its starting state and posts a full board.
    ///
    /// The random stream and the id counters carry on, so ids handed out
    /// before a reset never come back.
    pub fn initialize(&mut self) {
        self.tick = 0;
        self.last_refill = 0;
        self.ledger = Ledger::default();
        self.roster = Roster::new();
        self.board.clear();
        self.active.clear();
        self.upgrades = UpgradeState::new();
        self.departments = Departments::new();
        self.notoriety = Notoriety::new();
        self.notifications.clear();

        let posted = self.refill_board();
        info!("Engine initialized with {} board missions", posted.len());
    }

    pub fn reset(&mut self) {
        info!("Engine reset requested");
        self.initialize();
    }

    // ── Tick ────────────────────────────────────────────────────────

    /// Advances the simulation one step.
    ///
    /// Order: worker progress, completion cleanup, bonus-op expiry, board
    /// refill, assignment, raid, notification pruning. A worker freed by a
    /// completion can be reassigned in the same tick.
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        let now = self.tick;
        let mut report = TickReport {
            tick: now,
            ..TickReport::default()
        };

        // ── 1. Worker progress ──────────────────────────────────────
        let progress = mission_progress_system(&mut self.active, &self.roster, &self.upgrades);
        for entry in &progress.log_entries {
            debug!("{}", entry);
        }

        // ── 2. Completion cleanup ───────────────────────────────────
        let (done, remaining): (Vec<Mission>, Vec<Mission>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|m| m.status == MissionStatus::Complete);
        self.active = remaining;
        for mission in done {
            let worker = mission.assigned_worker;
            self.settle(mission, worker);
        }
        report.completed = progress.completed;

        if let Some(ttl) = self.config.queued_expiry_ticks {
            for mission in expire_stale_queued(&mut self.active, now, ttl) {
                debug!("Mission {} went stale in the queue", mission.id);
                self.notify(
                    format!("{} fell through: nobody got to it", mission.template.name),
                    NotificationKind::Task,
                );
            }
        }

        // ── 3. Bonus-op expiry ──────────────────────────────────────
        let expired = prune_expired_bonus_ops(&mut self.board, now);
        if !expired.is_empty() {
            debug!("Expired bonus ops: {:?}", expired);
        }

        // ── 4. Board refill ─────────────────────────────────────────
        if now.saturating_sub(self.last_refill) >= refill_interval(&self.config, &self.upgrades) {
            report.posted = self.refill_board();
        }

        // ── 5. Assignment ───────────────────────────────────────────
        let assignment = assignment_system(&mut self.active, &mut self.roster);
        for entry in &assignment.log_entries {
            debug!("{}", entry);
        }
        report.assigned = assignment
            .assigned
            .iter()
            .map(|(mission, worker)| (*mission, worker_id(*worker)))
            .collect();

        // ── 6. Raid ─────────────────────────────────────────────────
        let threat_before = self.notoriety.threat();
        let raid = raid_system(
            &mut self.notoriety,
            &mut self.roster,
            &mut self.active,
            &self.config,
            &mut self.rng,
        );
        for entry in &raid.log_entries {
            info!("{}", entry);
        }
        match raid.outcome {
            Some(RaidOutcome::Started) => {
                self.notify(
                    format!(
                        "The authorities are raiding the lair! Defend within {} ticks",
                        self.config.raid_countdown.max(1)
                    ),
                    NotificationKind::Raid,
                );
            }
            Some(RaidOutcome::TimedOut) => {
                let message = match &raid.lost {
                    Some(lost) => format!("The raid succeeded. {} was captured", lost.name),
                    None => "The raid succeeded, but the lair was empty".to_string(),
                };
                self.notify(message, NotificationKind::Raid);
            }
            _ => {}
        }
        self.note_threat_change(threat_before);
        report.raid = raid.outcome;

        // ── 7. Notification pruning ─────────────────────────────────
        self.notifications
            .prune(now, self.config.notification_ttl_ticks);

        report
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Moves a board mission into the active queue.
    pub fn accept_mission(&mut self, mission_id: MissionId) -> Result<(), CommandError> {
        let index = self
            .board
            .iter()
            .position(|m| m.id == mission_id)
            .ok_or(CommandError::NotFound(Target::Mission(mission_id)))?;

        let capacity = self.active_capacity();
        if self.active.len() >= capacity {
            return Err(CommandError::CapacityExceeded { capacity });
        }

        let mission = self.board.remove(index).accepted(self.tick);
        debug!("Accepted mission {} ({})", mission.id, mission.template.name);
        self.active.push(mission);
        Ok(())
    }

    /// One manual click at the current click power. Returns `true` if the
    /// click finished the mission.
    pub fn click_mission(&mut self, mission_id: MissionId) -> Result<bool, CommandError> {
        let power = self.click_power();
        let index = self
            .active
            .iter()
            .position(|m| m.id == mission_id)
            .ok_or(CommandError::NotFound(Target::Mission(mission_id)))?;

        let mission = &mut self.active[index];
        if mission.is_assigned() {
            return Err(CommandError::InvalidTransition(
                "mission is being worked by a minion",
            ));
        }
        if mission.status == MissionStatus::Complete {
            return Err(CommandError::InvalidTransition("mission is already complete"));
        }

        if !mission.apply_clicks(power) {
            return Ok(false);
        }
        let mission = self.active.remove(index);
        self.settle(mission, None);
        Ok(true)
    }

    pub fn hire_worker(&mut self) -> Result<WorkerId, CommandError> {
        let cost = self.next_hire_cost();
        let entity = recruit_worker(&mut self.roster, &mut self.rng, &mut self.ledger, cost)?;
        let name = self.roster.name(entity).unwrap_or_default();

        info!("Hired {} for {} gold", name, cost);
        self.notify(format!("{} joined the crew", name), NotificationKind::Minion);
        Ok(worker_id(entity))
    }

    /// Buys one level of an upgrade. Returns the new level.
    pub fn purchase_upgrade(&mut self, upgrade_id: UpgradeId) -> Result<u32, CommandError> {
        let level = self.upgrades.purchase(upgrade_id, &mut self.ledger)?;
        let def = get_upgrade(upgrade_id);

        info!("Purchased {} level {}", def.name, level);
        self.notify(
            format!("{} upgraded to level {}", def.name, level),
            NotificationKind::Upgrade,
        );
        Ok(level)
    }

    /// Pays off the authorities. Returns what it cost.
    pub fn pay_bribe(&mut self) -> Result<u64, CommandError> {
        if self.notoriety.value() <= 0.0 {
            return Err(CommandError::InvalidTransition("nobody is looking for you"));
        }
        let cost = self.notoriety.bribe_cost();
        self.ledger.debit(cost)?;

        let threat_before = self.notoriety.threat();
        self.notoriety.decrease(BRIBE_REDUCTION);
        info!("Paid a {} gold bribe", cost);
        self.notify(
            format!("Bribe paid: {} gold, -{} notoriety", cost, BRIBE_REDUCTION),
            NotificationKind::Notoriety,
        );
        self.note_threat_change(threat_before);
        Ok(cost)
    }

    /// Pushes back an active raid by one step.
    pub fn defend_raid(&mut self) -> Result<RaidOutcome, CommandError> {
        let threat_before = self.notoriety.threat();
        let outcome = self.notoriety.defend()?;
        if outcome == RaidOutcome::Repelled {
            info!("Raid repelled");
            self.notify("Raid repelled! The lair is safe", NotificationKind::Raid);
            self.note_threat_change(threat_before);
        }
        Ok(outcome)
    }

    pub fn dismiss_notification(&mut self, notification_id: NotificationId) -> Result<(), CommandError> {
        self.notifications.dismiss(notification_id)
    }

    /// Debug grant. Does not count toward lifetime earnings.
    pub fn add_currency(&mut self, amount: u64) {
        debug!("Debug grant of {} gold", amount);
        self.ledger.credit_unearned(amount);
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn currency(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn lifetime_earned(&self) -> u64 {
        self.ledger.lifetime_earned()
    }

    pub fn completed_count(&self) -> u64 {
        self.ledger.completed()
    }

    pub fn workers(&self) -> Vec<WorkerSnapshot> {
        self.roster.snapshot()
    }

    pub fn board(&self) -> &[Mission] {
        &self.board
    }

    pub fn active_missions(&self) -> &[Mission] {
        &self.active
    }

    pub fn notifications(&self) -> Vec<NotificationSnapshot> {
        self.notifications.snapshot()
    }

    pub fn departments(&self) -> &Departments {
        &self.departments
    }

    pub fn upgrades(&self) -> &UpgradeState {
        &self.upgrades
    }

    pub fn notoriety(&self) -> f64 {
        self.notoriety.value()
    }

    pub fn raid_state(&self) -> RaidState {
        self.notoriety.raid()
    }

    pub fn threat_level(&self) -> ThreatLevel {
        self.notoriety.threat()
    }

    /// Gold penalty as a percentage, 0 to 30.
    pub fn gold_penalty_pct(&self) -> f64 {
        self.notoriety.gold_penalty() * 100.0
    }

    pub fn next_hire_cost(&self) -> u64 {
        hire_cost(
            self.config.hire_base_cost,
            self.config.hire_cost_scale,
            self.roster.len(),
            self.upgrades.hire_discount(),
        )
    }

    pub fn board_capacity(&self) -> usize {
        board_capacity(&self.config, self.roster.len(), &self.upgrades)
    }

    pub fn active_capacity(&self) -> usize {
        active_capacity(&self.config, self.roster.len(), &self.upgrades)
    }

    pub fn click_power(&self) -> u32 {
        self.upgrades.click_power()
    }

    pub fn villain_level(&self) -> u32 {
        villain_level(self.ledger.completed())
    }

    pub fn villain_title(&self) -> &'static str {
        villain_title(self.villain_level())
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let departments = self
            .departments
            .iter()
            .map(|d| DepartmentSnapshot {
                category: d.category,
                xp: d.xp(),
                level: d.level(),
                next_level_xp: d.next_level_xp(),
                unlocked_tiers: available_tiers(d.level()),
            })
            .collect();

        let upgrades = all_upgrades()
            .iter()
            .map(|def| UpgradeSnapshot {
                id: def.id,
                name: def.name.to_string(),
                description: def.description.to_string(),
                category: def.category,
                current_level: self.upgrades.level(def.id),
                max_level: def.max_level,
                next_cost: self.upgrades.next_cost(def.id),
            })
            .collect();

        let threat = self.notoriety.threat();
        EngineSnapshot {
            tick: self.tick,
            currency: self.currency(),
            lifetime_earned: self.lifetime_earned(),
            completed_count: self.completed_count(),
            villain_level: self.villain_level(),
            villain_title: self.villain_title().to_string(),
            next_hire_cost: self.next_hire_cost(),
            click_power: self.click_power(),
            board_capacity: self.board_capacity(),
            active_capacity: self.active_capacity(),
            workers: self.workers(),
            board: self.board.iter().map(Mission::snapshot).collect(),
            active: self.active.iter().map(Mission::snapshot).collect(),
            departments,
            upgrades,
            notoriety: NotorietySnapshot {
                value: self.notoriety.value(),
                max: MAX_NOTORIETY,
                threat,
                threat_label: threat.label().to_string(),
                gold_penalty_pct: self.gold_penalty_pct(),
                bribe_cost: self.notoriety.bribe_cost(),
                raid: self.notoriety.raid().into(),
            },
            notifications: self.notifications(),
        }
    }

    // ── Internals ───────────────────────────────────────────────────

    fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.notifications.push(message, kind, self.tick);
    }

    fn note_threat_change(&mut self, before: ThreatLevel) {
        let after = self.notoriety.threat();
        if after > before {
            self.notify(
                format!("Threat level rose to {}", after.label()),
                NotificationKind::Notoriety,
            );
        }
    }

    fn refill_board(&mut self) -> Vec<MissionId> {
        let capacity = self.board_capacity();
        let ctx = GenerationContext {
            villain_level: self.villain_level(),
            departments: &self.departments,
            notoriety: self.notoriety.value(),
            now: self.tick,
            config: &self.config,
        };
        let result = fill_board(
            &mut self.board,
            capacity,
            &mut self.rng,
            &mut self.next_mission_id,
            &ctx,
        );
        for entry in &result.log_entries {
            debug!("{}", entry);
        }
        self.last_refill = self.tick;
        result.added
    }

    /// Resolves one completed mission, removed from the queue by the caller.
    /// `worker` is `Some` on the worker path and `None` for a manual finish.
    fn settle(&mut self, mission: Mission, worker: Option<Entity>) {
        let category = mission.category();
        let threat_before = self.notoriety.threat();
        let villain_before = self.villain_level();

        if mission.is_risk_reduction_op {
            self.notoriety.decrease(COVER_OP_REDUCTION);
            self.notify(
                format!("{} done: -{} notoriety", mission.template.name, COVER_OP_REDUCTION),
                NotificationKind::Notoriety,
            );
        } else {
            let multiplier = match worker {
                Some(entity) => self.worker_efficiency(entity, category),
                None => self.upgrades.click_gold_multiplier(),
            };
            let gold = self
                .notoriety
                .apply_penalty(mission.gold_reward as f64 * multiplier);
            self.ledger.credit_earned(gold);
            self.notoriety.increase(mission_notoriety(
                mission.tier,
                self.departments.level(MissionCategory::Research),
            ));
            self.notify(
                format!("{} complete: +{} gold", mission.template.name, gold),
                NotificationKind::Gold,
            );
        }
        self.ledger.record_completion();

        let dept_xp = Departments::xp_award(mission.tier, self.upgrades.department_xp_bonus());
        if let Some(level) = self.departments.get_mut(category).add_xp(dept_xp) {
            info!("{} department reached level {}", category.label(), level);
            self.notify(
                format!("{} department reached level {}", category.label(), level),
                NotificationKind::Department,
            );
        }

        if let Some(entity) = worker {
            let xp = workers::xp_award(mission.tier, &self.upgrades);
            if let Some((name, level)) = self.roster.grant_xp(entity, xp) {
                self.notify(
                    format!("{} reached level {}", name, level),
                    NotificationKind::Minion,
                );
            }
            self.roster.release(entity);
        }

        let villain_after = self.villain_level();
        if villain_after > villain_before {
            info!("Villain level {}", villain_after);
            self.notify(
                format!("You are now a {}", villain_title(villain_after)),
                NotificationKind::Task,
            );
        }
        self.note_threat_change(threat_before);

        debug!(
            "Mission {} settled by {}",
            mission.id,
            if worker.is_some() { "worker" } else { "hand" }
        );
    }

    fn worker_efficiency(&self, entity: Entity, category: MissionCategory) -> f64 {
        match (self.roster.stats(entity), self.roster.specialty(entity)) {
            (Some((stats, level)), Some(specialty)) => {
                effective_efficiency(&stats, level, specialty, category, &self.upgrades)
            }
            _ => 1.0,
        }
    }
}
