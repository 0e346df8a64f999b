pub mod config;
pub mod done;
pub mod habit;
pub mod streaks;
pub mod summary;
pub mod watch;
