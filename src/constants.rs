//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// ENGINE DEFAULTS
// =============================================================================

/// Default number of concurrent judge worker slots
pub const DEFAULT_WORKER_SLOTS: usize = 4;

/// Default maximum number of submissions one user may have in flight
pub const DEFAULT_PER_USER_LIMIT: usize = 2;

/// Default bound on the admission queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Wall-clock kill ceiling as a multiple of the problem's time limit
pub const WALL_TIME_MULTIPLIER: u64 = 3;

/// Scheduling jitter absorbed before wall time over the limit counts as a
/// timeout, in milliseconds
pub const WALL_TIME_JITTER_MS: u64 = 500;

/// Backoff before the single infrastructure retry
pub const RETRY_BACKOFF_MS: u64 = 250;

/// Timeout for a compilation step in milliseconds
pub const COMPILE_TIMEOUT_MS: u64 = 30_000;

/// Extra container memory headroom over the problem limit, in kilobytes.
/// Interpreters need room for their own runtime before the program allocates.
pub const MEMORY_HEADROOM_KB: u64 = 16 * 1024;

// =============================================================================
// LIMITS & VALIDATION
// =============================================================================

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: usize = 1024 * 1024;

/// Maximum captured stdout/stderr per execution, in bytes
pub const MAX_OUTPUT_CAPTURE_BYTES: usize = 1024 * 1024;

/// Maximum length of compiler diagnostics shown to the user
pub const MAX_DIAGNOSTICS_LENGTH: usize = 16 * 1024;

/// Maximum length of test case previews in status responses
pub const MAX_PREVIEW_LENGTH: usize = 1000;

/// Maximum time limit a problem may declare, in milliseconds
pub const MAX_TIME_LIMIT_MS: u64 = 30_000;

/// Maximum memory limit a problem may declare, in kilobytes
pub const MAX_MEMORY_LIMIT_KB: u64 = 1024 * 1024;

/// Maximum number of ad-hoc test cases accepted by the run endpoint
pub const MAX_ADHOC_TEST_CASES: usize = 20;

/// Time limit applied to ad-hoc runs, in milliseconds
pub const DEFAULT_ADHOC_TIME_LIMIT_MS: u64 = 2_000;

/// Memory limit applied to ad-hoc runs, in kilobytes (256 MB)
pub const DEFAULT_ADHOC_MEMORY_LIMIT_KB: u64 = 256 * 1024;

/// Default points for a test case that does not declare any
pub const DEFAULT_TEST_CASE_POINTS: u32 = 100;

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers as they appear on the wire
pub mod languages {
    pub const C: &str = "c";
    pub const CPP: &str = "cpp";
    pub const RUST: &str = "rust";
    pub const GO: &str = "go";
    pub const ZIG: &str = "zig";
    pub const PYTHON: &str = "python";

    /// All supported language identifiers
    pub const ALL: &[&str] = &[C, CPP, RUST, GO, ZIG, PYTHON];
}

/// Container images for each language
pub mod container_images {
    pub const C: &str = "codejudge/c:latest";
    pub const CPP: &str = "codejudge/cpp:latest";
    pub const RUST: &str = "codejudge/rust:latest";
    pub const GO: &str = "codejudge/go:latest";
    pub const ZIG: &str = "codejudge/zig:latest";
    pub const PYTHON: &str = "codejudge/python:latest";
}

// =============================================================================
// SUBMISSION STATUSES
// =============================================================================

/// Submission status strings as persisted and served
pub mod statuses {
    pub const QUEUED: &str = "queued";
    pub const COMPILING: &str = "compiling";
    pub const RUNNING: &str = "running";
    pub const ACCEPTED: &str = "accepted";
    pub const WRONG_ANSWER: &str = "wrong_answer";
    pub const TIME_LIMIT_EXCEEDED: &str = "time_limit_exceeded";
    pub const MEMORY_LIMIT_EXCEEDED: &str = "memory_limit_exceeded";
    pub const RUNTIME_ERROR: &str = "runtime_error";
    pub const COMPILATION_ERROR: &str = "compilation_error";
    pub const INTERNAL_ERROR: &str = "internal_error";
    pub const CANCELLED: &str = "cancelled";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";
