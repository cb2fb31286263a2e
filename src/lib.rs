//! Tick-driven simulation engine for a villain-lair management game.
//!
//! The [`Engine`] owns all session state. Callers drive it with
//! [`Engine::tick`] and the command methods, and read it back through
//! queries or a full [`protocol::EngineSnapshot`].

pub mod config;
pub mod ecs;
pub mod engine;
pub mod error;
pub mod game;
pub mod network;
pub mod protocol;

pub use config::EngineConfig;
pub use engine::{Engine, TickReport};
pub use error::{CommandError, ConfigError};
