//! Problem-side judging parameters
//!
//! The engine does not own problems. These types are what it reads from the
//! problem collaborator: resource limits and the scoring policy attached to
//! a problem.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_MEMORY_LIMIT_KB, MAX_TIME_LIMIT_MS};
use crate::error::{AppError, AppResult};

/// Per-execution resource ceilings derived from the problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionLimits {
    pub time_limit_ms: u64,
    pub memory_limit_kb: u64,
}

impl ExecutionLimits {
    /// Reject limits a problem must never declare: zero or absurdly large.
    pub fn validate(&self) -> AppResult<()> {
        if self.time_limit_ms == 0 || self.memory_limit_kb == 0 {
            return Err(AppError::Validation(
                "Problem declares no execution limits".to_string(),
            ));
        }
        if self.time_limit_ms > MAX_TIME_LIMIT_MS {
            return Err(AppError::Validation(format!(
                "Time limit {}ms exceeds the maximum of {}ms",
                self.time_limit_ms, MAX_TIME_LIMIT_MS
            )));
        }
        if self.memory_limit_kb > MAX_MEMORY_LIMIT_KB {
            return Err(AppError::Validation(format!(
                "Memory limit {}kb exceeds the maximum of {}kb",
                self.memory_limit_kb, MAX_MEMORY_LIMIT_KB
            )));
        }
        Ok(())
    }
}

/// How per-test results combine into an overall result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// ICPC-style: the first failing test stops the run, no partial credit
    AllOrNothing,
    /// IOI-style: all tests run, each passed test contributes its points
    PartialCredit,
}
