//! Submission judging engine
//!
//! The engine admits submissions, schedules them onto a bounded pool of
//! judge workers, executes them in isolated sandboxes and publishes status
//! transitions through the persistence collaborator:
//!
//! - `scheduler`: admission, fairness, cancellation
//! - `worker`: the per-submission judging state machine
//! - `sandbox` / `container`: isolated execution (Docker-backed)
//! - `languages`: per-language compile and invocation recipes
//! - `comparator`: output checking

pub mod comparator;
pub mod container;
pub mod languages;
pub mod sandbox;
pub mod scheduler;
pub mod worker;

#[cfg(test)]
pub(crate) mod testutil;

pub use container::DockerSandbox;
pub use scheduler::JudgeEngine;
pub use worker::{AdhocReport, JudgeWorker};
