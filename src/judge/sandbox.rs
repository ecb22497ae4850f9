//! Sandbox contract: isolated execution of one program against one input
//!
//! The sandbox knows nothing about problems or verdicts. It enforces hard
//! CPU-time, wall-time and memory ceilings and reports raw observations;
//! interpreting those into a verdict is the worker's job.

use async_trait::async_trait;

use crate::judge::languages::Toolchain;
use crate::models::ExecutionLimits;

/// Handle to one provisioned sandbox environment
///
/// All side effects of compilation and execution are confined to the
/// environment behind this handle and vanish when it is disposed.
#[derive(Debug, Clone)]
pub struct SandboxHandle {
    pub id: String,
}

/// A compiled (or syntax-checked) program ready for repeated execution
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Command the sandbox invokes for one execution
    pub run_command: String,
}

/// Result of a compilation attempt
#[derive(Debug, Clone)]
pub enum CompileOutput {
    /// The artifact is reusable across all test case executions
    Success(Artifact),
    /// The user's code failed to build; diagnostics are shown verbatim
    Failure { diagnostics: String },
}

/// What happened to one sandboxed execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Ran to completion within all limits
    Completed,
    /// Exceeded the time limit or was killed at the wall-clock ceiling
    TimedOut,
    /// Exceeded the memory cap
    MemoryExceeded,
    /// Exited non-zero or was killed by a signal
    Crashed,
}

/// Raw observations from one sandboxed execution
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub wall_time_ms: u64,
    pub peak_memory_kb: u64,
    pub outcome: ExecOutcome,
}

/// Sandbox failure, distinct from failures of the program under test
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// The sandbox itself could not do its job: container creation failed,
    /// exec setup failed, resource allocation failed. Retried once by the
    /// worker before surfacing as an internal judging error.
    #[error("sandbox infrastructure failure: {0}")]
    Infrastructure(String),
}

impl From<bollard::errors::Error> for SandboxError {
    fn from(err: bollard::errors::Error) -> Self {
        SandboxError::Infrastructure(err.to_string())
    }
}

/// Isolated execution backend
#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Provision an isolated environment for one submission.
    ///
    /// The environment must isolate filesystem, network and process
    /// namespace from the host and from other concurrent environments.
    async fn provision(
        &self,
        toolchain: &Toolchain,
        limits: &ExecutionLimits,
    ) -> Result<SandboxHandle, SandboxError>;

    /// Compile the source inside the environment. Happens at most once per
    /// submission; the artifact is reused across all test cases.
    async fn compile(
        &self,
        handle: &SandboxHandle,
        toolchain: &Toolchain,
        source_code: &str,
    ) -> Result<CompileOutput, SandboxError>;

    /// Execute the artifact against one input under the given limits.
    async fn execute(
        &self,
        handle: &SandboxHandle,
        artifact: &Artifact,
        input: &str,
        limits: &ExecutionLimits,
    ) -> Result<ExecutionReport, SandboxError>;

    /// Tear the environment down. Called on every exit path, including
    /// cancellation; disposal terminates any still-running execution.
    async fn dispose(&self, handle: SandboxHandle) -> Result<(), SandboxError>;
}
