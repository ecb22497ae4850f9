//! In-memory store implementations
//!
//! Back the default binary and the test suite. A production deployment
//! swaps these for database-backed collaborators behind the same traits.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::judge::comparator::ComparisonMode;
use crate::models::submission::AggregateStats;
use crate::models::{ExecutionLimits, ScoringPolicy, Status, Submission, TestCase, TestOutcome};
use crate::store::{ProblemStore, SubmissionStore};

/// Everything the engine needs to know about one problem
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemFixture {
    pub id: Uuid,
    pub limits: ExecutionLimits,
    pub scoring_policy: ScoringPolicy,
    #[serde(default)]
    pub comparison: ComparisonMode,
    pub test_cases: Vec<TestCase>,
}

/// Problem collaborator backed by a map of fixtures
#[derive(Default)]
pub struct InMemoryProblemStore {
    problems: RwLock<HashMap<Uuid, ProblemFixture>>,
}

impl InMemoryProblemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a problem fixture
    pub fn insert(&self, fixture: ProblemFixture) {
        self.problems
            .write()
            .expect("problem store lock poisoned")
            .insert(fixture.id, fixture);
    }

    /// Load every `*.json` fixture in a directory
    pub fn load_dir(&self, dir: &Path) -> AppResult<usize> {
        let mut loaded = 0;
        let entries = std::fs::read_dir(dir).map_err(|e| {
            AppError::Configuration(format!("Cannot read problems dir {}: {}", dir.display(), e))
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| AppError::Configuration(e.to_string()))?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| AppError::Configuration(format!("{}: {}", path.display(), e)))?;
            let fixture: ProblemFixture = serde_json::from_str(&raw)
                .map_err(|e| AppError::Configuration(format!("{}: {}", path.display(), e)))?;
            fixture.limits.validate()?;
            self.insert(fixture);
            loaded += 1;
        }

        Ok(loaded)
    }

    fn with_problem<T>(
        &self,
        problem_id: Uuid,
        f: impl FnOnce(&ProblemFixture) -> T,
    ) -> AppResult<T> {
        let problems = self.problems.read().expect("problem store lock poisoned");
        problems
            .get(&problem_id)
            .map(f)
            .ok_or_else(|| AppError::NotFound(format!("Problem {problem_id} not found")))
    }
}

#[async_trait]
impl ProblemStore for InMemoryProblemStore {
    async fn get_test_cases(&self, problem_id: Uuid) -> AppResult<Vec<TestCase>> {
        self.with_problem(problem_id, |p| p.test_cases.clone())
    }

    async fn get_limits(&self, problem_id: Uuid) -> AppResult<ExecutionLimits> {
        self.with_problem(problem_id, |p| p.limits)
    }

    async fn get_scoring_policy(&self, problem_id: Uuid) -> AppResult<ScoringPolicy> {
        self.with_problem(problem_id, |p| p.scoring_policy)
    }

    async fn get_comparison_mode(&self, problem_id: Uuid) -> AppResult<ComparisonMode> {
        self.with_problem(problem_id, |p| p.comparison)
    }
}

/// Submission persistence backed by a map
#[derive(Default)]
pub struct InMemorySubmissionStore {
    submissions: RwLock<HashMap<Uuid, Submission>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut Submission) -> AppResult<T>) -> AppResult<T> {
        let mut submissions = self
            .submissions
            .write()
            .expect("submission store lock poisoned");
        let submission = submissions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Submission {id} not found")))?;
        f(submission)
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn create(&self, submission: Submission) -> AppResult<()> {
        let mut submissions = self
            .submissions
            .write()
            .expect("submission store lock poisoned");
        if submissions.contains_key(&submission.id) {
            return Err(AppError::Conflict(format!(
                "Submission {} already exists",
                submission.id
            )));
        }
        submissions.insert(submission.id, submission);
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: Status) -> AppResult<()> {
        self.update(id, |s| {
            // Terminal submissions are immutable
            if s.status.is_terminal() {
                return Err(AppError::Conflict(format!(
                    "Submission {id} already finalized as {}",
                    s.status
                )));
            }
            s.status = status;
            if status.is_terminal() {
                s.judged_at = Some(Utc::now());
            }
            Ok(())
        })
    }

    async fn append_outcome(&self, id: Uuid, outcome: TestOutcome) -> AppResult<()> {
        self.update(id, |s| {
            s.outcomes.push(outcome);
            Ok(())
        })
    }

    async fn set_compilation_output(&self, id: Uuid, diagnostics: String) -> AppResult<()> {
        self.update(id, |s| {
            s.compilation_output = Some(diagnostics);
            Ok(())
        })
    }

    async fn finalize(
        &self,
        id: Uuid,
        result: Status,
        score: Option<u32>,
        stats: AggregateStats,
    ) -> AppResult<()> {
        self.update(id, |s| {
            if s.status.is_terminal() {
                return Err(AppError::Conflict(format!(
                    "Submission {id} already finalized as {}",
                    s.status
                )));
            }
            s.status = result;
            s.score = score;
            s.execution_time_ms = Some(stats.execution_time_ms);
            s.memory_used_kb = Some(stats.memory_used_kb);
            s.judged_at = Some(Utc::now());
            Ok(())
        })
    }

    async fn discard_outcomes(&self, id: Uuid) -> AppResult<()> {
        self.update(id, |s| {
            s.outcomes.clear();
            Ok(())
        })
    }

    async fn fetch(&self, id: Uuid) -> AppResult<Option<Submission>> {
        let submissions = self
            .submissions
            .read()
            .expect("submission store lock poisoned");
        Ok(submissions.get(&id).cloned())
    }
}
