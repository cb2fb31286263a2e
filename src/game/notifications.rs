use crate::error::{CommandError, Target};
use crate::protocol::{NotificationId, NotificationKind, NotificationSnapshot, Tick};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Tick,
}

/// Transient player-facing event feed. Entries age out after a fixed TTL or
/// are dismissed by id.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Vec<Notification>,
    next_id: NotificationId,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind, now: Tick) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notification {
            id,
            message: message.into(),
            kind,
            created_at: now,
        });
        id
    }

    pub fn dismiss(&mut self, id: NotificationId) -> Result<(), CommandError> {
        let index = self
            .entries
            .iter()
            .position(|n| n.id == id)
            .ok_or(CommandError::NotFound(Target::Notification(id)))?;
        self.entries.remove(index);
        Ok(())
    }

    /// Drops entries at least `ttl` ticks old. Returns how many went.
    pub fn prune(&mut self, now: Tick, ttl: u64) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|n| now.saturating_sub(n.created_at) < ttl);
        before - self.entries.len()
    }

    /// Empties the feed. Ids keep counting so a stale dismiss can never hit a
    /// newer entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn snapshot(&self) -> Vec<NotificationSnapshot> {
        self.entries
            .iter()
            .map(|n| NotificationSnapshot {
                id: n.id,
                message: n.message.clone(),
                kind: n.kind,
                created_at: n.created_at,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_increasing_ids() {
        let mut log = NotificationLog::new();
        let a = log.push("Hired Grim", NotificationKind::Minion, 0);
        let b = log.push("+5 gold", NotificationKind::Gold, 0);
        assert!(b > a);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn dismiss_twice_is_not_found() {
        let mut log = NotificationLog::new();
        let id = log.push("Hired Grim", NotificationKind::Minion, 0);
        assert_eq!(log.dismiss(id), Ok(()));
        assert_eq!(
            log.dismiss(id),
            Err(CommandError::NotFound(Target::Notification(id)))
        );
        assert!(log.is_empty());
    }

    #[test]
    fn prune_drops_entries_at_ttl() {
        let mut log = NotificationLog::new();
        log.push("old", NotificationKind::Task, 1);
        log.push("new", NotificationKind::Task, 3);
        assert_eq!(log.prune(4, 4), 0);
        assert_eq!(log.prune(5, 4), 1);
        assert_eq!(log.iter().next().map(|n| n.message.as_str()), Some("new"));
    }

    #[test]
    fn ids_survive_clear() {
        let mut log = NotificationLog::new();
        let first = log.push("a", NotificationKind::Raid, 0);
        log.clear();
        let second = log.push("b", NotificationKind::Raid, 0);
        assert_ne!(first, second);
    }
}
