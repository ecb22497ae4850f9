//! Scheduler/queue: admission, fairness and cancellation
//!
//! Submissions are accepted synchronously, validated, then judged
//! asynchronously on a fixed pool of worker slots. Global ordering is FIFO
//! by arrival, subject to two caps: the slot pool bound and a per-user
//! in-flight bound. A submission waiting on the per-user cap never blocks
//! other users' submissions from being dispatched ahead of it.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tokio::sync::{Notify, Semaphore};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::constants::{
    DEFAULT_ADHOC_MEMORY_LIMIT_KB, DEFAULT_ADHOC_TIME_LIMIT_MS, MAX_ADHOC_TEST_CASES,
    MAX_SOURCE_CODE_SIZE,
};
use crate::error::{AppError, AppResult};
use crate::judge::comparator::ComparisonMode;
use crate::judge::languages::Language;
use crate::judge::sandbox::Sandbox;
use crate::judge::worker::{AdhocReport, JudgeWorker};
use crate::models::submission::AggregateStats;
use crate::models::{ExecutionLimits, Status, Submission, TestCase};
use crate::store::{ProblemStore, SubmissionStore};

/// One admitted, not yet dispatched submission
struct QueueEntry {
    submission: Submission,
    token: CancellationToken,
}

/// Shared scheduler accounting. The only mutable state shared across
/// concurrent workers, always touched under this one lock.
#[derive(Default)]
struct SchedulerState {
    pending: VecDeque<QueueEntry>,
    active_per_user: HashMap<Uuid, usize>,
    running_tokens: HashMap<Uuid, CancellationToken>,
}

impl SchedulerState {
    /// Pop the first pending entry whose user is under the in-flight cap.
    /// Head-of-line blocking is scoped per user: capped users are skipped.
    fn pop_admissible(&mut self, per_user_limit: usize) -> Option<QueueEntry> {
        let index = self.pending.iter().position(|entry| {
            self.active_per_user
                .get(&entry.submission.user_id)
                .copied()
                .unwrap_or(0)
                < per_user_limit
        })?;
        let entry = self.pending.remove(index)?;
        *self
            .active_per_user
            .entry(entry.submission.user_id)
            .or_insert(0) += 1;
        self.running_tokens
            .insert(entry.submission.id, entry.token.clone());
        Some(entry)
    }

    /// Remove a still-queued entry, if present
    fn remove_pending(&mut self, id: Uuid) -> Option<QueueEntry> {
        let index = self.pending.iter().position(|e| e.submission.id == id)?;
        self.pending.remove(index)
    }

    /// Release a finished submission's user slot and token
    fn release(&mut self, user_id: Uuid, id: Uuid) {
        self.running_tokens.remove(&id);
        if let Some(count) = self.active_per_user.get_mut(&user_id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.active_per_user.remove(&user_id);
            }
        }
    }
}

/// Engine facade: admission, dispatch, cancellation and status queries
pub struct JudgeEngine {
    worker: Arc<JudgeWorker>,
    problems: Arc<dyn ProblemStore>,
    submissions: Arc<dyn SubmissionStore>,
    config: EngineConfig,
    state: Arc<Mutex<SchedulerState>>,
    wakeup: Arc<Notify>,
    slots: Arc<Semaphore>,
}

impl JudgeEngine {
    /// Build the engine and start its dispatch loop
    pub fn start(
        sandbox: Arc<dyn Sandbox>,
        problems: Arc<dyn ProblemStore>,
        submissions: Arc<dyn SubmissionStore>,
        config: EngineConfig,
    ) -> Arc<Self> {
        let engine = Arc::new(Self {
            worker: Arc::new(JudgeWorker::new(
                sandbox,
                problems.clone(),
                submissions.clone(),
            )),
            problems,
            submissions,
            slots: Arc::new(Semaphore::new(config.worker_slots)),
            config,
            state: Arc::new(Mutex::new(SchedulerState::default())),
            wakeup: Arc::new(Notify::new()),
        });

        tokio::spawn(dispatch_loop(engine.clone()));

        engine
    }

    /// Admit a submission. Malformed submissions are rejected here,
    /// synchronously, before any state is created.
    pub async fn submit(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        language: &str,
        source_code: String,
    ) -> AppResult<Uuid> {
        let language = Language::parse(language)
            .ok_or_else(|| AppError::UnsupportedLanguage(language.to_string()))?;

        validate_source(&source_code)?;

        // A problem without limits cannot be judged
        let limits = self.problems.get_limits(problem_id).await?;
        limits.validate()?;

        {
            let state = self.state.lock().expect("scheduler lock poisoned");
            if state.pending.len() >= self.config.queue_capacity {
                return Err(AppError::QueueFull);
            }
        }

        let submission = Submission::new(user_id, problem_id, language, source_code);
        let id = submission.id;
        self.submissions.create(submission.clone()).await?;

        {
            let mut state = self.state.lock().expect("scheduler lock poisoned");
            self.state_push(&mut state, submission);
        }
        self.wakeup.notify_one();

        tracing::info!(submission = %id, user = %user_id, problem = %problem_id, "submission admitted");
        Ok(id)
    }

    fn state_push(&self, state: &mut SchedulerState, submission: Submission) {
        state.pending.push_back(QueueEntry {
            submission,
            token: CancellationToken::new(),
        });
    }

    /// Best-effort cancellation.
    ///
    /// A queued submission is removed without cost; a running one has its
    /// in-flight execution terminated and its partial outcomes discarded.
    pub async fn cancel(&self, id: Uuid) -> AppResult<()> {
        let removed = {
            let mut state = self.state.lock().expect("scheduler lock poisoned");
            state.remove_pending(id)
        };
        if removed.is_some() {
            tracing::info!(submission = %id, "cancelled while queued");
            return self.submissions.set_status(id, Status::Cancelled).await;
        }

        let token = {
            let state = self.state.lock().expect("scheduler lock poisoned");
            state.running_tokens.get(&id).cloned()
        };
        if let Some(token) = token {
            tracing::info!(submission = %id, "cancelling in-flight judging");
            token.cancel();
            return Ok(());
        }

        // Already terminal, or never admitted
        match self.submissions.fetch(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Submission {id} not found"))),
        }
    }

    /// Read the current submission record; safe to poll repeatedly
    pub async fn status(&self, id: Uuid) -> AppResult<Submission> {
        self.submissions
            .fetch(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Submission {id} not found")))
    }

    /// Fetch a problem's test cases, for building redacted result views
    pub async fn problem_test_cases(&self, problem_id: Uuid) -> AppResult<Vec<TestCase>> {
        self.problems.get_test_cases(problem_id).await
    }

    /// Judge ad-hoc code against caller-supplied test cases, synchronously.
    /// Nothing is persisted.
    pub async fn run_adhoc(
        &self,
        language: &str,
        source_code: &str,
        test_cases: Vec<TestCase>,
    ) -> AppResult<AdhocReport> {
        let language = Language::parse(language)
            .ok_or_else(|| AppError::UnsupportedLanguage(language.to_string()))?;

        validate_source(source_code)?;

        if test_cases.is_empty() {
            return Err(AppError::InvalidInput(
                "At least one test case is required".to_string(),
            ));
        }
        if test_cases.len() > MAX_ADHOC_TEST_CASES {
            return Err(AppError::InvalidInput(format!(
                "At most {MAX_ADHOC_TEST_CASES} ad-hoc test cases are allowed"
            )));
        }

        let limits = ExecutionLimits {
            time_limit_ms: DEFAULT_ADHOC_TIME_LIMIT_MS,
            memory_limit_kb: DEFAULT_ADHOC_MEMORY_LIMIT_KB,
        };

        self.worker
            .run_adhoc(
                language,
                source_code,
                &test_cases,
                &limits,
                ComparisonMode::default(),
            )
            .await
    }
}

fn validate_source(source_code: &str) -> AppResult<()> {
    if source_code.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Source code must not be empty".to_string(),
        ));
    }
    if source_code.len() > MAX_SOURCE_CODE_SIZE {
        return Err(AppError::InvalidInput(format!(
            "Source code exceeds the maximum size of {MAX_SOURCE_CODE_SIZE} bytes"
        )));
    }
    Ok(())
}

/// Dispatch loop: assigns admissible queued submissions to free worker slots
async fn dispatch_loop(engine: Arc<JudgeEngine>) {
    loop {
        let entry = {
            let mut state = engine.state.lock().expect("scheduler lock poisoned");
            state.pop_admissible(engine.config.per_user_limit)
        };

        let Some(entry) = entry else {
            engine.wakeup.notified().await;
            continue;
        };

        // Blocks only while no slot is free
        let permit = engine
            .slots
            .clone()
            .acquire_owned()
            .await
            .expect("slot semaphore closed");

        let engine = engine.clone();
        tokio::spawn(async move {
            let id = entry.submission.id;
            let user_id = entry.submission.user_id;

            if let Err(e) = engine.worker.process(&entry.submission, entry.token).await {
                tracing::error!(submission = %id, error = %e, "judging failed");
                let _ = engine
                    .submissions
                    .finalize(id, Status::InternalError, None, AggregateStats::default())
                    .await;
            }

            drop(permit);
            {
                let mut state = engine.state.lock().expect("scheduler lock poisoned");
                state.release(user_id, id);
            }
            engine.wakeup.notify_one();
        });
    }
}
