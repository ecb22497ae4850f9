//! Domain models

pub mod problem;
pub mod submission;
pub mod test_case;

pub use problem::{ExecutionLimits, ScoringPolicy};
pub use submission::{ErrorKind, Status, Submission, TestOutcome};
pub use test_case::TestCase;
