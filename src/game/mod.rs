pub mod catalog;
pub mod departments;
pub mod economy;
pub mod missions;
pub mod notifications;
pub mod notoriety;
pub mod progression;
pub mod upgrades;
pub mod workers;
