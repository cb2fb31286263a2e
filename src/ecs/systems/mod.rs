pub mod assignment;
pub mod board;
pub mod mission_progress;
pub mod raid;
