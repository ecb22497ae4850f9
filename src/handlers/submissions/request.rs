//! Submission request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create submission request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    /// Submitting user
    pub user_id: Uuid,

    /// Problem ID to submit for
    pub problem_id: Uuid,

    /// Programming language
    #[validate(length(min = 1, max = 20))]
    pub language: String,

    /// Source code
    #[validate(length(min = 1, max = 1048576))] // 1MB max
    pub source_code: String,
}
