//! # mundosolar-worker
//!
//! Background work for MundoSolar: a database-backed job queue, the
//! executor that dispatches jobs to registered handlers, the polling
//! runner, and the cron scheduler that enqueues periodic work (Growatt
//! cache refresh and cleanup tasks).

pub mod executor;
pub mod jobs;
pub mod queue;
pub mod runner;
pub mod scheduler;

pub use executor::{JobExecutionError, JobExecutor, JobHandler};
pub use queue::{JobCreateParams, JobQueue};
pub use runner::WorkerRunner;
pub use scheduler::CronScheduler;
