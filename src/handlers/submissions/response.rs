//! Submission response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::constants::MAX_PREVIEW_LENGTH;
use crate::models::test_case::truncate;
use crate::models::{Submission, TestCase};

/// Create submission response
#[derive(Debug, Serialize)]
pub struct CreateSubmissionResponse {
    pub id: Uuid,
    pub message: String,
    pub status: String,
}

/// Cancel submission response
#[derive(Debug, Serialize)]
pub struct CancelSubmissionResponse {
    pub id: Uuid,
    pub message: String,
}

/// Submission status response
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub language: String,
    pub status: String,
    pub score: Option<u32>,
    pub compilation_output: Option<String>,
    pub execution_time_ms: Option<u64>,
    pub memory_used_kb: Option<u64>,
    pub test_results: Vec<TestCaseResult>,
    pub submitted_at: DateTime<Utc>,
    pub judged_at: Option<DateTime<Utc>>,
}

/// Result for a single test case
#[derive(Debug, Serialize)]
pub struct TestCaseResult {
    pub test_index: usize,
    pub passed: bool,
    pub execution_time_ms: u64,
    pub memory_used_kb: u64,
    pub error: Option<String>,
    /// Only shown for non-hidden test cases
    pub input_preview: Option<String>,
    pub expected_output_preview: Option<String>,
    /// Only shown for failing non-hidden test cases
    pub actual_output_preview: Option<String>,
}

impl SubmissionResponse {
    /// Build the status view, redacting hidden test case data
    pub fn from_submission(submission: &Submission, test_cases: &[TestCase]) -> Self {
        let test_results = submission
            .outcomes
            .iter()
            .map(|outcome| {
                let case = test_cases.get(outcome.test_index);
                let (input_preview, expected_output_preview, actual_output_preview) = match case {
                    Some(case) if !case.hidden => (
                        Some(case.input_preview(MAX_PREVIEW_LENGTH)),
                        Some(case.output_preview(MAX_PREVIEW_LENGTH)),
                        (!outcome.passed)
                            .then(|| truncate(&outcome.actual_output, MAX_PREVIEW_LENGTH)),
                    ),
                    _ => (None, None, None),
                };

                TestCaseResult {
                    test_index: outcome.test_index,
                    passed: outcome.passed,
                    execution_time_ms: outcome.execution_time_ms,
                    memory_used_kb: outcome.memory_used_kb,
                    error: outcome
                        .error_kind
                        .map(|kind| kind.to_status().as_str().to_string()),
                    input_preview,
                    expected_output_preview,
                    actual_output_preview,
                }
            })
            .collect();

        Self {
            id: submission.id,
            user_id: submission.user_id,
            problem_id: submission.problem_id,
            language: submission.language.to_string(),
            status: submission.status.to_string(),
            score: submission.score,
            compilation_output: submission.compilation_output.clone(),
            execution_time_ms: submission.execution_time_ms,
            memory_used_kb: submission.memory_used_kb,
            test_results,
            submitted_at: submission.submitted_at,
            judged_at: submission.judged_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::languages::Language;
    use crate::models::{Status, TestOutcome};

    fn case(hidden: bool) -> TestCase {
        TestCase {
            input: "10".to_string(),
            expected_output: "55".to_string(),
            hidden,
            points: None,
        }
    }

    fn failing_outcome(index: usize) -> TestOutcome {
        TestOutcome {
            test_index: index,
            passed: false,
            actual_output: "54".to_string(),
            execution_time_ms: 10,
            memory_used_kb: 1024,
            error_kind: None,
        }
    }

    #[test]
    fn hidden_test_cases_are_redacted() {
        let mut submission = Submission::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Language::Python,
            "print(54)".to_string(),
        );
        submission.status = Status::WrongAnswer;
        submission.outcomes = vec![failing_outcome(0), failing_outcome(1)];

        let response =
            SubmissionResponse::from_submission(&submission, &[case(false), case(true)]);

        let visible = &response.test_results[0];
        assert_eq!(visible.input_preview.as_deref(), Some("10"));
        assert_eq!(visible.expected_output_preview.as_deref(), Some("55"));
        assert_eq!(visible.actual_output_preview.as_deref(), Some("54"));

        let hidden = &response.test_results[1];
        assert!(hidden.input_preview.is_none());
        assert!(hidden.expected_output_preview.is_none());
        assert!(hidden.actual_output_preview.is_none());
        // Verdict and metrics remain visible even for hidden tests
        assert!(!hidden.passed);
        assert_eq!(hidden.execution_time_ms, 10);
    }

    #[test]
    fn passing_tests_omit_actual_output() {
        let mut submission = Submission::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Language::Python,
            "print(55)".to_string(),
        );
        submission.status = Status::Accepted;
        submission.outcomes = vec![TestOutcome {
            passed: true,
            ..failing_outcome(0)
        }];

        let response = SubmissionResponse::from_submission(&submission, &[case(false)]);
        assert!(response.test_results[0].actual_output_preview.is_none());
        assert!(response.test_results[0].input_preview.is_some());
    }
}
