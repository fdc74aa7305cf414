//! Recurring job scheduling.

pub mod daemon;
pub mod jobs;

pub use daemon::run_scheduler;
pub use jobs::{default_jobs, JobKind, JobRegistry, ScheduledJob};
