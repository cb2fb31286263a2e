use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::game::upgrades::UpgradeId;
use crate::protocol::{MissionId, NotificationId};

/// Why a command was rejected. A rejected command never mutates the engine,
/// so callers that ignore the error observe a plain no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("active queue is full ({capacity} slots)")]
    CapacityExceeded { capacity: usize },
    #[error("{0} not found")]
    NotFound(Target),
    #[error("invalid transition: {0}")]
    InvalidTransition(&'static str),
}

/// The thing a command referred to that no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Mission(MissionId),
    Upgrade(UpgradeId),
    Notification(NotificationId),
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Mission(id) => write!(f, "mission {}", id),
            Target::Upgrade(id) => write!(f, "upgrade {:?}", id),
            Target::Notification(id) => write!(f, "notification {}", id),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read engine config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to accept a client: {0}")]
    Accept(#[source] io::Error),
    #[error("websocket handshake failed: {0}")]
    Handshake(#[from] tokio_tungstenite::tungstenite::Error),
}
