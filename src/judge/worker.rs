//! Judge worker: drives one submission end-to-end
//!
//! Compile once, run the artifact against each test case in declaration
//! order, compare outputs, fold per-test results into a final verdict.
//! Test-case-level failures never escape this module as errors; they are
//! captured in `TestOutcome::error_kind` and aggregated.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::time::{Duration, sleep};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::constants::{DEFAULT_TEST_CASE_POINTS, RETRY_BACKOFF_MS};
use crate::error::AppResult;
use crate::judge::comparator::{ComparisonMode, compare};
use crate::judge::languages::Language;
use crate::judge::sandbox::{
    Artifact, CompileOutput, ExecOutcome, Sandbox, SandboxError, SandboxHandle,
};
use crate::models::submission::AggregateStats;
use crate::models::{
    ErrorKind, ExecutionLimits, ScoringPolicy, Status, Submission, TestCase, TestOutcome,
};
use crate::store::{ProblemStore, SubmissionStore};

/// Result of judging source code without a persisted submission record
#[derive(Debug, Clone)]
pub struct AdhocReport {
    pub overall: Status,
    pub score: Option<u32>,
    pub outcomes: Vec<TestOutcome>,
    pub stats: AggregateStats,
    pub compilation_output: Option<String>,
}

/// Summary of one pass over a submission's test cases
struct TestRunSummary {
    overall: Status,
    score: Option<u32>,
    stats: AggregateStats,
    outcomes: Vec<TestOutcome>,
}

/// Orchestrates judging of one submission at a time
pub struct JudgeWorker {
    sandbox: Arc<dyn Sandbox>,
    problems: Arc<dyn ProblemStore>,
    submissions: Arc<dyn SubmissionStore>,
}

impl JudgeWorker {
    pub fn new(
        sandbox: Arc<dyn Sandbox>,
        problems: Arc<dyn ProblemStore>,
        submissions: Arc<dyn SubmissionStore>,
    ) -> Self {
        Self {
            sandbox,
            problems,
            submissions,
        }
    }

    /// Judge a persisted submission to a terminal state.
    ///
    /// Every exit path disposes the sandbox environment and leaves the
    /// submission in a terminal status.
    pub async fn process(&self, submission: &Submission, token: CancellationToken) -> AppResult<()> {
        let id = submission.id;
        tracing::info!(submission = %id, language = %submission.language, "judging submission");

        self.submissions.set_status(id, Status::Compiling).await?;

        let limits = self.problems.get_limits(submission.problem_id).await?;
        limits.validate()?;
        let test_cases = self.problems.get_test_cases(submission.problem_id).await?;
        let policy = self
            .problems
            .get_scoring_policy(submission.problem_id)
            .await?;
        let comparison = self
            .problems
            .get_comparison_mode(submission.problem_id)
            .await?;

        // One infrastructure retry for the whole submission
        let mut retry_used = false;

        let toolchain = submission.language.toolchain();
        let handle = match with_retry(&mut retry_used, || {
            self.sandbox.provision(&toolchain, &limits).boxed()
        })
        .await
        {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(submission = %id, error = %e, "sandbox provisioning failed");
                self.submissions
                    .finalize(id, Status::InternalError, None, AggregateStats::default())
                    .await?;
                return Ok(());
            }
        };

        let result = self
            .judge_in_sandbox(
                id,
                &handle,
                submission,
                &test_cases,
                &limits,
                policy,
                comparison,
                &mut retry_used,
                &token,
            )
            .await;

        if let Err(e) = self.sandbox.dispose(handle).await {
            tracing::warn!(submission = %id, error = %e, "failed to dispose sandbox");
        }

        result
    }

    /// Everything between provisioning and disposal
    #[allow(clippy::too_many_arguments)]
    async fn judge_in_sandbox(
        &self,
        id: Uuid,
        handle: &SandboxHandle,
        submission: &Submission,
        test_cases: &[TestCase],
        limits: &ExecutionLimits,
        policy: ScoringPolicy,
        comparison: ComparisonMode,
        retry_used: &mut bool,
        token: &CancellationToken,
    ) -> AppResult<()> {
        let toolchain = submission.language.toolchain();

        let compiled = tokio::select! {
            biased;
            _ = token.cancelled() => return self.mark_cancelled(id).await,
            r = with_retry(retry_used, || {
                self.sandbox
                    .compile(handle, &toolchain, &submission.source_code)
                    .boxed()
            }) => r,
        };

        let artifact = match compiled {
            Ok(CompileOutput::Success(artifact)) => artifact,
            Ok(CompileOutput::Failure { diagnostics }) => {
                // Short-circuit: no test cases run, zero outcomes recorded
                self.submissions
                    .set_compilation_output(id, diagnostics)
                    .await?;
                self.submissions
                    .finalize(id, Status::CompilationError, None, AggregateStats::default())
                    .await?;
                return Ok(());
            }
            Err(e) => {
                tracing::error!(submission = %id, error = %e, "compilation infrastructure failure");
                self.submissions
                    .finalize(id, Status::InternalError, None, AggregateStats::default())
                    .await?;
                return Ok(());
            }
        };

        self.submissions.set_status(id, Status::Running).await?;

        let summary = tokio::select! {
            biased;
            _ = token.cancelled() => return self.mark_cancelled(id).await,
            r = self.run_test_cases(
                handle,
                &artifact,
                test_cases,
                limits,
                policy,
                comparison,
                retry_used,
                Some(id),
            ) => r?,
        };

        tracing::info!(
            submission = %id,
            result = %summary.overall,
            tests = summary.outcomes.len(),
            "judging finished"
        );

        self.submissions
            .finalize(id, summary.overall, summary.score, summary.stats)
            .await
    }

    /// Judge ad-hoc source against caller-supplied test cases.
    ///
    /// Same worker logic with partial-credit-style per-test reporting and
    /// no submission record.
    pub async fn run_adhoc(
        &self,
        language: Language,
        source_code: &str,
        test_cases: &[TestCase],
        limits: &ExecutionLimits,
        comparison: ComparisonMode,
    ) -> AppResult<AdhocReport> {
        limits.validate()?;

        let toolchain = language.toolchain();
        let mut retry_used = false;

        let handle = with_retry(&mut retry_used, || {
            self.sandbox.provision(&toolchain, limits).boxed()
        })
        .await
        .map_err(internal_error)?;

        let compiled = with_retry(&mut retry_used, || {
            self.sandbox.compile(&handle, &toolchain, source_code).boxed()
        })
        .await;

        let report = match compiled {
            Ok(CompileOutput::Success(artifact)) => {
                let summary = self
                    .run_test_cases(
                        &handle,
                        &artifact,
                        test_cases,
                        limits,
                        ScoringPolicy::PartialCredit,
                        comparison,
                        &mut retry_used,
                        None,
                    )
                    .await;
                summary.map(|s| AdhocReport {
                    overall: s.overall,
                    score: s.score,
                    outcomes: s.outcomes,
                    stats: s.stats,
                    compilation_output: None,
                })
            }
            Ok(CompileOutput::Failure { diagnostics }) => Ok(AdhocReport {
                overall: Status::CompilationError,
                score: None,
                outcomes: Vec::new(),
                stats: AggregateStats::default(),
                compilation_output: Some(diagnostics),
            }),
            Err(e) => Err(internal_error(e)),
        };

        if let Err(e) = self.sandbox.dispose(handle).await {
            tracing::warn!(error = %e, "failed to dispose ad-hoc sandbox");
        }

        report
    }

    /// Iterate test cases in declaration order and aggregate the verdict
    #[allow(clippy::too_many_arguments)]
    async fn run_test_cases(
        &self,
        handle: &SandboxHandle,
        artifact: &Artifact,
        test_cases: &[TestCase],
        limits: &ExecutionLimits,
        policy: ScoringPolicy,
        comparison: ComparisonMode,
        retry_used: &mut bool,
        persist_to: Option<Uuid>,
    ) -> AppResult<TestRunSummary> {
        let mut outcomes: Vec<TestOutcome> = Vec::with_capacity(test_cases.len());
        let mut stats = AggregateStats::default();
        let mut earned_points = 0u32;
        let mut worst_error: Option<ErrorKind> = None;

        for (index, test_case) in test_cases.iter().enumerate() {
            let executed = with_retry(retry_used, || {
                self.sandbox
                    .execute(handle, artifact, &test_case.input, limits)
                    .boxed()
            })
            .await;

            let outcome = match executed {
                Ok(report) => {
                    // Aggregates are the maximum across executed tests
                    stats.execution_time_ms = stats.execution_time_ms.max(report.wall_time_ms);
                    stats.memory_used_kb = stats.memory_used_kb.max(report.peak_memory_kb);

                    let error_kind = match report.outcome {
                        ExecOutcome::Completed => None,
                        ExecOutcome::TimedOut => Some(ErrorKind::TimeLimitExceeded),
                        ExecOutcome::MemoryExceeded => Some(ErrorKind::MemoryLimitExceeded),
                        ExecOutcome::Crashed => Some(ErrorKind::RuntimeError),
                    };
                    let passed = error_kind.is_none()
                        && compare(&test_case.expected_output, &report.stdout, comparison);

                    TestOutcome {
                        test_index: index,
                        passed,
                        actual_output: report.stdout,
                        execution_time_ms: report.wall_time_ms,
                        memory_used_kb: report.peak_memory_kb,
                        error_kind,
                    }
                }
                Err(e) => {
                    tracing::error!(test = index, error = %e, "sandbox failed twice, giving up");
                    TestOutcome {
                        test_index: index,
                        passed: false,
                        actual_output: String::new(),
                        execution_time_ms: 0,
                        memory_used_kb: 0,
                        error_kind: Some(ErrorKind::InternalError),
                    }
                }
            };

            if outcome.passed {
                earned_points += test_case.points.unwrap_or(DEFAULT_TEST_CASE_POINTS);
            } else if let Some(kind) = outcome.error_kind {
                if worst_error.is_none_or(|w| kind.severity() > w.severity()) {
                    worst_error = Some(kind);
                }
            }

            let failed = !outcome.passed;
            let internal = outcome.error_kind == Some(ErrorKind::InternalError);

            if let Some(id) = persist_to {
                self.submissions.append_outcome(id, outcome.clone()).await?;
            }
            outcomes.push(outcome);

            // A second infrastructure failure is terminal under either policy;
            // all-or-nothing additionally stops at the first failing test.
            if internal || (failed && policy == ScoringPolicy::AllOrNothing) {
                break;
            }
        }

        let all_passed = outcomes.len() == test_cases.len() && outcomes.iter().all(|o| o.passed);
        let overall = if all_passed {
            Status::Accepted
        } else if let Some(kind) = worst_error {
            kind.to_status()
        } else {
            Status::WrongAnswer
        };

        let score = match policy {
            ScoringPolicy::AllOrNothing => None,
            ScoringPolicy::PartialCredit => Some(earned_points),
        };

        Ok(TestRunSummary {
            overall,
            score,
            stats,
            outcomes,
        })
    }

    /// Terminal bookkeeping for a cancelled submission: partial outcomes are
    /// discarded, never persisted.
    async fn mark_cancelled(&self, id: Uuid) -> AppResult<()> {
        tracing::info!(submission = %id, "submission cancelled mid-judging");
        self.submissions.discard_outcomes(id).await?;
        self.submissions.set_status(id, Status::Cancelled).await
    }
}

/// Bounded retry wrapper around sandbox operations.
///
/// Infrastructure failures get one retry per submission with a short
/// backoff; the second failure is returned to the caller.
async fn with_retry<'a, T>(
    retry_used: &mut bool,
    op: impl Fn() -> BoxFuture<'a, Result<T, SandboxError>>,
) -> Result<T, SandboxError> {
    match op().await {
        Ok(value) => Ok(value),
        Err(first) => {
            if *retry_used {
                return Err(first);
            }
            *retry_used = true;
            tracing::warn!(error = %first, "sandbox infrastructure failure, retrying once");
            sleep(Duration::from_millis(RETRY_BACKOFF_MS)).await;
            op().await
        }
    }
}

fn internal_error(e: SandboxError) -> crate::error::AppError {
    crate::error::AppError::Internal(anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::sandbox::ExecutionReport;
    use crate::judge::testutil::{FakeSandbox, MockSandbox, completed, report};
    use crate::store::{InMemoryProblemStore, InMemorySubmissionStore, memory::ProblemFixture};

    fn limits() -> ExecutionLimits {
        ExecutionLimits {
            time_limit_ms: 2000,
            memory_limit_kb: 65536,
        }
    }

    fn case(expected: &str) -> TestCase {
        TestCase {
            input: "10".to_string(),
            expected_output: expected.to_string(),
            hidden: false,
            points: Some(10),
        }
    }

    fn fixture(policy: ScoringPolicy, cases: Vec<TestCase>) -> ProblemFixture {
        ProblemFixture {
            id: Uuid::new_v4(),
            limits: limits(),
            scoring_policy: policy,
            comparison: ComparisonMode::default(),
            test_cases: cases,
        }
    }

    struct Env {
        worker: JudgeWorker,
        problems: Arc<InMemoryProblemStore>,
        submissions: Arc<InMemorySubmissionStore>,
    }

    fn env(sandbox: Arc<dyn Sandbox>) -> Env {
        let problems = Arc::new(InMemoryProblemStore::new());
        let submissions = Arc::new(InMemorySubmissionStore::new());
        Env {
            worker: JudgeWorker::new(sandbox, problems.clone(), submissions.clone()),
            problems,
            submissions,
        }
    }

    async fn judge(env: &Env, fixture: ProblemFixture) -> Submission {
        let problem_id = fixture.id;
        env.problems.insert(fixture);
        let submission = Submission::new(
            Uuid::new_v4(),
            problem_id,
            Language::Python,
            "print(fib(10))".to_string(),
        );
        let id = submission.id;
        env.submissions.create(submission.clone()).await.unwrap();
        env.worker
            .process(&submission, CancellationToken::new())
            .await
            .unwrap();
        env.submissions.fetch(id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn accepted_when_every_test_passes() {
        let sandbox = FakeSandbox::new();
        sandbox.push_execution(Ok(completed("55\n")));
        let env = env(Arc::new(sandbox));

        let judged = judge(&env, fixture(ScoringPolicy::AllOrNothing, vec![case("55")])).await;

        assert_eq!(judged.status, Status::Accepted);
        assert_eq!(judged.outcomes.len(), 1);
        assert!(judged.outcomes[0].passed);
        assert!(judged.judged_at.is_some());
    }

    #[tokio::test]
    async fn all_or_nothing_stops_at_first_wrong_answer() {
        let sandbox = FakeSandbox::new();
        sandbox.push_execution(Ok(completed("1")));
        sandbox.push_execution(Ok(completed("6"))); // expected 5
        sandbox.push_execution(Ok(completed("3")));
        let env = env(Arc::new(sandbox));

        let judged = judge(
            &env,
            fixture(
                ScoringPolicy::AllOrNothing,
                vec![case("1"), case("5"), case("3")],
            ),
        )
        .await;

        // Exactly 2 outcomes: test 3 never runs
        assert_eq!(judged.status, Status::WrongAnswer);
        assert_eq!(judged.outcomes.len(), 2);
        assert!(judged.outcomes[0].passed);
        assert!(!judged.outcomes[1].passed);
        assert_eq!(judged.outcomes[1].error_kind, None);
        assert_eq!(judged.score, None);
    }

    #[tokio::test]
    async fn partial_credit_runs_every_test_and_scores() {
        let sandbox = FakeSandbox::new();
        sandbox.push_execution(Ok(completed("1")));
        sandbox.push_execution(Ok(completed("wrong")));
        sandbox.push_execution(Ok(completed("3")));
        let env = env(Arc::new(sandbox));

        let judged = judge(
            &env,
            fixture(
                ScoringPolicy::PartialCredit,
                vec![case("1"), case("2"), case("3")],
            ),
        )
        .await;

        assert_eq!(judged.status, Status::WrongAnswer);
        assert_eq!(judged.outcomes.len(), 3);
        assert_eq!(judged.score, Some(20));
    }

    #[tokio::test]
    async fn outcomes_follow_declaration_order() {
        let sandbox = FakeSandbox::new();
        for out in ["1", "2", "3", "4"] {
            sandbox.push_execution(Ok(completed(out)));
        }
        let env = env(Arc::new(sandbox));

        let judged = judge(
            &env,
            fixture(
                ScoringPolicy::PartialCredit,
                vec![case("1"), case("2"), case("3"), case("4")],
            ),
        )
        .await;

        let indices: Vec<usize> = judged.outcomes.iter().map(|o| o.test_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn sandbox_outcomes_map_to_statuses() {
        for (outcome, expected) in [
            (ExecOutcome::TimedOut, Status::TimeLimitExceeded),
            (ExecOutcome::MemoryExceeded, Status::MemoryLimitExceeded),
            (ExecOutcome::Crashed, Status::RuntimeError),
        ] {
            let sandbox = FakeSandbox::new();
            sandbox.push_execution(Ok(report(outcome, "")));
            let env = env(Arc::new(sandbox));

            let judged = judge(&env, fixture(ScoringPolicy::AllOrNothing, vec![case("1")])).await;
            assert_eq!(judged.status, expected, "{outcome:?}");
            assert_eq!(judged.outcomes.len(), 1);
        }
    }

    #[tokio::test]
    async fn partial_credit_reports_worst_severity_error() {
        let sandbox = FakeSandbox::new();
        sandbox.push_execution(Ok(report(ExecOutcome::TimedOut, "")));
        sandbox.push_execution(Ok(report(ExecOutcome::Crashed, "")));
        sandbox.push_execution(Ok(completed("3")));
        let env = env(Arc::new(sandbox));

        let judged = judge(
            &env,
            fixture(
                ScoringPolicy::PartialCredit,
                vec![case("1"), case("2"), case("3")],
            ),
        )
        .await;

        assert_eq!(judged.status, Status::RuntimeError);
        assert_eq!(judged.outcomes.len(), 3);
        assert_eq!(judged.score, Some(10));
    }

    #[tokio::test]
    async fn compilation_error_short_circuits() {
        let sandbox = FakeSandbox::new();
        sandbox.set_compile(Ok(CompileOutput::Failure {
            diagnostics: "SyntaxError: invalid syntax".to_string(),
        }));
        let env = env(Arc::new(sandbox));

        let judged = judge(
            &env,
            fixture(ScoringPolicy::AllOrNothing, vec![case("1"), case("2")]),
        )
        .await;

        assert_eq!(judged.status, Status::CompilationError);
        assert!(judged.outcomes.is_empty());
        assert!(
            judged
                .compilation_output
                .as_deref()
                .unwrap()
                .contains("SyntaxError")
        );
    }

    #[tokio::test]
    async fn infrastructure_failure_is_retried_once_then_succeeds() {
        let sandbox = FakeSandbox::new();
        sandbox.push_execution(Err(SandboxError::Infrastructure("exec died".to_string())));
        sandbox.push_execution(Ok(completed("55")));
        let env = env(Arc::new(sandbox));

        let judged = judge(&env, fixture(ScoringPolicy::AllOrNothing, vec![case("55")])).await;

        assert_eq!(judged.status, Status::Accepted);
        assert_eq!(judged.outcomes.len(), 1);
    }

    #[tokio::test]
    async fn second_infrastructure_failure_is_terminal_internal_error() {
        let sandbox = FakeSandbox::new();
        sandbox.push_execution(Err(SandboxError::Infrastructure("exec died".to_string())));
        sandbox.push_execution(Err(SandboxError::Infrastructure("still dead".to_string())));
        let env = env(Arc::new(sandbox));

        let judged = judge(
            &env,
            fixture(ScoringPolicy::PartialCredit, vec![case("1"), case("2")]),
        )
        .await;

        // Never silently converted into another verdict, and the run stops
        assert_eq!(judged.status, Status::InternalError);
        assert_eq!(judged.outcomes.len(), 1);
        assert_eq!(
            judged.outcomes[0].error_kind,
            Some(ErrorKind::InternalError)
        );
    }

    #[tokio::test]
    async fn aggregates_are_maxima_not_sums() {
        let sandbox = FakeSandbox::new();
        sandbox.push_execution(Ok(ExecutionReport {
            wall_time_ms: 120,
            peak_memory_kb: 4096,
            ..completed("1")
        }));
        sandbox.push_execution(Ok(ExecutionReport {
            wall_time_ms: 80,
            peak_memory_kb: 9000,
            ..completed("2")
        }));
        let env = env(Arc::new(sandbox));

        let judged = judge(
            &env,
            fixture(ScoringPolicy::PartialCredit, vec![case("1"), case("2")]),
        )
        .await;

        assert_eq!(judged.execution_time_ms, Some(120));
        assert_eq!(judged.memory_used_kb, Some(9000));
    }

    #[tokio::test]
    async fn sandbox_is_disposed_on_every_path() {
        for compile in [
            Ok(CompileOutput::Failure {
                diagnostics: "boom".to_string(),
            }),
            Err(SandboxError::Infrastructure("no compiler".to_string())),
        ] {
            let sandbox = Arc::new(FakeSandbox::new());
            sandbox.set_compile(compile);
            sandbox.set_compile_retry(Err(SandboxError::Infrastructure(
                "no compiler".to_string(),
            )));
            let env = env(sandbox.clone());

            judge(&env, fixture(ScoringPolicy::AllOrNothing, vec![case("1")])).await;
            assert_eq!(sandbox.provisions(), sandbox.disposals());
        }
    }

    #[tokio::test]
    async fn cancellation_discards_partial_outcomes() {
        let sandbox = Arc::new(FakeSandbox::new());
        sandbox.push_execution(Ok(completed("1")));
        sandbox.block_next_execution();
        let env = env(sandbox.clone());

        let problem = fixture(ScoringPolicy::AllOrNothing, vec![case("1"), case("2")]);
        let problem_id = problem.id;
        env.problems.insert(problem);

        let submission = Submission::new(
            Uuid::new_v4(),
            problem_id,
            Language::Python,
            "while True: pass".to_string(),
        );
        let id = submission.id;
        env.submissions.create(submission.clone()).await.unwrap();

        let token = CancellationToken::new();
        let cancel = token.clone();
        let worker_task = {
            let worker = JudgeWorker::new(
                sandbox.clone(),
                env.problems.clone(),
                env.submissions.clone(),
            );
            tokio::spawn(async move { worker.process(&submission, token).await })
        };

        // Let the first test finish and the second block, then cancel
        sandbox.wait_for_blocked().await;
        cancel.cancel();
        worker_task.await.unwrap().unwrap();

        let judged = env.submissions.fetch(id).await.unwrap().unwrap();
        assert_eq!(judged.status, Status::Cancelled);
        assert!(judged.outcomes.is_empty());
        assert_eq!(sandbox.provisions(), sandbox.disposals());
    }

    #[tokio::test]
    async fn adhoc_run_reports_per_test_without_persisting() {
        let sandbox = FakeSandbox::new();
        sandbox.push_execution(Ok(completed("55")));
        sandbox.push_execution(Ok(completed("nope")));
        let env = env(Arc::new(sandbox));

        let cases = vec![case("55"), case("89")];
        let report = env
            .worker
            .run_adhoc(
                Language::Python,
                "print(fib(int(input())))",
                &cases,
                &limits(),
                ComparisonMode::default(),
            )
            .await
            .unwrap();

        assert_eq!(report.overall, Status::WrongAnswer);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.score, Some(10));
    }

    #[tokio::test]
    async fn compile_happens_at_most_once_per_submission() {
        let mut mock = MockSandbox::new();
        mock.expect_provision()
            .times(1)
            .returning(|_, _| Ok(SandboxHandle { id: "s".to_string() }));
        mock.expect_compile().times(1).returning(|_, _, _| {
            Ok(CompileOutput::Success(Artifact {
                run_command: "python3 solution.py".to_string(),
            }))
        });
        mock.expect_execute()
            .times(3)
            .returning(|_, _, _, _| Ok(completed("ok")));
        mock.expect_dispose().times(1).returning(|_| Ok(()));

        let env = env(Arc::new(mock));
        let judged = judge(
            &env,
            fixture(
                ScoringPolicy::PartialCredit,
                vec![case("ok"), case("ok"), case("ok")],
            ),
        )
        .await;
        assert_eq!(judged.status, Status::Accepted);
    }

    #[tokio::test]
    async fn determinism_identical_runs_agree() {
        for _ in 0..2 {
            let sandbox = FakeSandbox::new();
            sandbox.push_execution(Ok(completed("55\n")));
            let env = env(Arc::new(sandbox));
            let judged =
                judge(&env, fixture(ScoringPolicy::AllOrNothing, vec![case("55")])).await;
            assert_eq!(judged.status, Status::Accepted);
            assert!(judged.outcomes[0].passed);
        }
    }
}
