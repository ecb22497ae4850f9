//! Submission model and status state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::judge::languages::Language;

/// Submission status
///
/// `Queued` is the only initial state. The terminal states are everything
/// except `Queued`, `Compiling` and `Running`; once a submission reaches a
/// terminal state it is never mutated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Queued,
    Compiling,
    Running,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompilationError,
    InternalError,
    Cancelled,
}

impl Status {
    /// Get status as string
    pub fn as_str(&self) -> &'static str {
        use crate::constants::statuses;
        match self {
            Self::Queued => statuses::QUEUED,
            Self::Compiling => statuses::COMPILING,
            Self::Running => statuses::RUNNING,
            Self::Accepted => statuses::ACCEPTED,
            Self::WrongAnswer => statuses::WRONG_ANSWER,
            Self::TimeLimitExceeded => statuses::TIME_LIMIT_EXCEEDED,
            Self::MemoryLimitExceeded => statuses::MEMORY_LIMIT_EXCEEDED,
            Self::RuntimeError => statuses::RUNTIME_ERROR,
            Self::CompilationError => statuses::COMPILATION_ERROR,
            Self::InternalError => statuses::INTERNAL_ERROR,
            Self::Cancelled => statuses::CANCELLED,
        }
    }

    /// Check if this is a terminal status (judging complete)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Queued | Self::Compiling | Self::Running)
    }

    /// Check if this status means the solution was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure classification for one test case
///
/// A comparison mismatch is not an error kind: a `TestOutcome` with
/// `passed = false` and no `error_kind` is a wrong answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    InternalError,
}

impl ErrorKind {
    /// Map to the submission status this error kind produces
    pub fn to_status(self) -> Status {
        match self {
            Self::TimeLimitExceeded => Status::TimeLimitExceeded,
            Self::MemoryLimitExceeded => Status::MemoryLimitExceeded,
            Self::RuntimeError => Status::RuntimeError,
            Self::InternalError => Status::InternalError,
        }
    }

    /// Severity rank used to pick the overall result under partial credit.
    /// Higher is worse.
    pub fn severity(self) -> u8 {
        match self {
            Self::TimeLimitExceeded => 1,
            Self::MemoryLimitExceeded => 2,
            Self::RuntimeError => 3,
            Self::InternalError => 4,
        }
    }
}

/// Recorded result of running one test case
///
/// Created exactly once per test case per judged submission, appended in
/// test case declaration order and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Zero-based index of the test case this outcome belongs to
    pub test_index: usize,
    pub passed: bool,
    pub actual_output: String,
    pub execution_time_ms: u64,
    pub memory_used_kb: u64,
    pub error_kind: Option<ErrorKind>,
}

/// Aggregate execution statistics for a submission.
///
/// Times and memory are the maximum observed across executed test cases,
/// the binding constraint for user-facing performance reporting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AggregateStats {
    pub execution_time_ms: u64,
    pub memory_used_kb: u64,
}

/// Submission record
///
/// Owned by the persistence collaborator; the engine holds a transient
/// working copy during judging and writes back status transitions and
/// outcomes only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub language: Language,
    #[serde(skip_serializing)]
    pub source_code: String,
    pub status: Status,
    pub score: Option<u32>,
    pub compilation_output: Option<String>,
    pub execution_time_ms: Option<u64>,
    pub memory_used_kb: Option<u64>,
    pub outcomes: Vec<TestOutcome>,
    pub submitted_at: DateTime<Utc>,
    pub judged_at: Option<DateTime<Utc>>,
}

impl Submission {
    /// Create a freshly admitted submission in the `Queued` state
    pub fn new(user_id: Uuid, problem_id: Uuid, language: Language, source_code: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            problem_id,
            language,
            source_code,
            status: Status::Queued,
            score: None,
            compilation_output: None,
            execution_time_ms: None,
            memory_used_kb: None,
            outcomes: Vec::new(),
            submitted_at: Utc::now(),
            judged_at: None,
        }
    }
}
