//! Ad-hoc run handler
//!
//! Judges source code against caller-supplied test cases synchronously,
//! without creating a submission record.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::models::TestCase;
use crate::state::AppState;

/// Ad-hoc run request
#[derive(Debug, Deserialize, Validate)]
pub struct RunRequest {
    /// Programming language
    #[validate(length(min = 1, max = 20))]
    pub language: String,

    /// Source code
    #[validate(length(min = 1, max = 1048576))] // 1MB max
    pub source_code: String,

    /// Test cases to run against
    #[validate(length(min = 1, max = 20))]
    pub test_cases: Vec<RunTestCase>,
}

/// One caller-supplied test case. Serialize is needed for the length
/// validation on `RunRequest::test_cases`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunTestCase {
    #[serde(default)]
    pub input: String,
    pub expected_output: String,
}

/// Ad-hoc run response
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub status: String,
    pub score: Option<u32>,
    pub compilation_output: Option<String>,
    pub execution_time_ms: u64,
    pub memory_used_kb: u64,
    pub test_results: Vec<RunTestResult>,
}

/// Per-test result of an ad-hoc run. The caller supplied the test cases,
/// so nothing is redacted.
#[derive(Debug, Serialize)]
pub struct RunTestResult {
    pub test_index: usize,
    pub passed: bool,
    pub actual_output: String,
    pub execution_time_ms: u64,
    pub memory_used_kb: u64,
    pub error: Option<String>,
}

/// Run ad-hoc code and wait for the verdict
async fn run_code(
    State(state): State<AppState>,
    Json(payload): Json<RunRequest>,
) -> AppResult<Json<RunResponse>> {
    payload.validate()?;

    let test_cases: Vec<TestCase> = payload
        .test_cases
        .into_iter()
        .map(|case| TestCase {
            input: case.input,
            expected_output: case.expected_output,
            hidden: false,
            points: None,
        })
        .collect();

    let report = state
        .engine()
        .run_adhoc(&payload.language, &payload.source_code, test_cases)
        .await?;

    let test_results = report
        .outcomes
        .into_iter()
        .map(|outcome| RunTestResult {
            test_index: outcome.test_index,
            passed: outcome.passed,
            actual_output: outcome.actual_output,
            execution_time_ms: outcome.execution_time_ms,
            memory_used_kb: outcome.memory_used_kb,
            error: outcome
                .error_kind
                .map(|kind| kind.to_status().as_str().to_string()),
        })
        .collect();

    Ok(Json(RunResponse {
        status: report.overall.to_string(),
        score: report.score,
        compilation_output: report.compilation_output,
        execution_time_ms: report.stats.execution_time_ms,
        memory_used_kb: report.stats.memory_used_kb,
        test_results,
    }))
}

/// Ad-hoc run routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/run", post(run_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(cases: usize) -> RunRequest {
        RunRequest {
            language: "python".to_string(),
            source_code: "print(55)".to_string(),
            test_cases: (0..cases)
                .map(|i| RunTestCase {
                    input: i.to_string(),
                    expected_output: "55".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_case_count_is_validated() {
        assert!(request(1).validate().is_ok());
        assert!(request(20).validate().is_ok());
        assert!(request(0).validate().is_err());
        assert!(request(21).validate().is_err());
    }
}
