//! Collaborator interfaces
//!
//! The engine treats problems and submissions as opaque records reached
//! through these narrow traits. The problem side is read-only; the
//! submission side accepts only status transitions and outcomes.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::judge::comparator::ComparisonMode;
use crate::models::submission::AggregateStats;
use crate::models::{ExecutionLimits, ScoringPolicy, Status, Submission, TestCase, TestOutcome};

pub use memory::{InMemoryProblemStore, InMemorySubmissionStore};

/// Problem collaborator: supplies test cases, limits and judging parameters
#[async_trait]
pub trait ProblemStore: Send + Sync {
    async fn get_test_cases(&self, problem_id: Uuid) -> AppResult<Vec<TestCase>>;

    async fn get_limits(&self, problem_id: Uuid) -> AppResult<ExecutionLimits>;

    async fn get_scoring_policy(&self, problem_id: Uuid) -> AppResult<ScoringPolicy>;

    async fn get_comparison_mode(&self, problem_id: Uuid) -> AppResult<ComparisonMode>;
}

/// Persistence collaborator: records submissions and their state transitions
///
/// `fetch` doubles as the read model behind the polling status query.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a newly admitted submission
    async fn create(&self, submission: Submission) -> AppResult<()>;

    /// Record a state transition. Refused once the submission is terminal.
    async fn set_status(&self, id: Uuid, status: Status) -> AppResult<()>;

    /// Append one test outcome, in test case declaration order
    async fn append_outcome(&self, id: Uuid, outcome: TestOutcome) -> AppResult<()>;

    /// Attach compiler diagnostics for user display
    async fn set_compilation_output(&self, id: Uuid, diagnostics: String) -> AppResult<()>;

    /// Write the terminal result and aggregate statistics
    async fn finalize(
        &self,
        id: Uuid,
        result: Status,
        score: Option<u32>,
        stats: AggregateStats,
    ) -> AppResult<()>;

    /// Drop partially recorded outcomes; used when a submission is cancelled
    async fn discard_outcomes(&self, id: Uuid) -> AppResult<()>;

    /// Read the current record; safe to poll repeatedly
    async fn fetch(&self, id: Uuid) -> AppResult<Option<Submission>>;
}
