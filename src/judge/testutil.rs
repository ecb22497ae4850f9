//! Test doubles for the sandbox
//!
//! `FakeSandbox` replays scripted compile/execute responses so worker and
//! scheduler behavior can be tested without Docker. `MockSandbox` is a
//! mockall mock for call-count expectations.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::judge::languages::Toolchain;
use crate::judge::sandbox::{
    Artifact, CompileOutput, ExecOutcome, ExecutionReport, Sandbox, SandboxError, SandboxHandle,
};
use crate::models::ExecutionLimits;

/// A successfully completed execution producing `stdout`
pub fn completed(stdout: &str) -> ExecutionReport {
    ExecutionReport {
        stdout: stdout.to_string(),
        stderr: String::new(),
        exit_code: 0,
        wall_time_ms: 10,
        peak_memory_kb: 1024,
        outcome: ExecOutcome::Completed,
    }
}

/// An execution that ended with the given outcome
pub fn report(outcome: ExecOutcome, stdout: &str) -> ExecutionReport {
    let exit_code = match outcome {
        ExecOutcome::Completed => 0,
        ExecOutcome::TimedOut => 124,
        ExecOutcome::MemoryExceeded => 137,
        ExecOutcome::Crashed => 1,
    };
    ExecutionReport {
        stdout: stdout.to_string(),
        stderr: String::new(),
        exit_code,
        wall_time_ms: 10,
        peak_memory_kb: 1024,
        outcome,
    }
}

enum ScriptedExecution {
    Respond(Result<ExecutionReport, SandboxError>),
    /// Notify waiters, then hang until the future is dropped
    Block,
}

/// Scripted sandbox double
#[derive(Default)]
pub struct FakeSandbox {
    compile_queue: Mutex<VecDeque<Result<CompileOutput, SandboxError>>>,
    execution_queue: Mutex<VecDeque<ScriptedExecution>>,
    provisions: AtomicUsize,
    disposals: AtomicUsize,
    blocked: Notify,
}

impl FakeSandbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next compile response. Defaults to success when empty.
    pub fn set_compile(&self, result: Result<CompileOutput, SandboxError>) {
        self.compile_queue.lock().unwrap().push_back(result);
    }

    /// Queue the response handed to a compile retry
    pub fn set_compile_retry(&self, result: Result<CompileOutput, SandboxError>) {
        self.set_compile(result);
    }

    /// Queue the next execution response. Defaults to an empty completed
    /// run when the queue is exhausted.
    pub fn push_execution(&self, result: Result<ExecutionReport, SandboxError>) {
        self.execution_queue
            .lock()
            .unwrap()
            .push_back(ScriptedExecution::Respond(result));
    }

    /// Make the next execution hang until cancelled
    pub fn block_next_execution(&self) {
        self.execution_queue
            .lock()
            .unwrap()
            .push_back(ScriptedExecution::Block);
    }

    /// Wait until a blocked execution has started
    pub async fn wait_for_blocked(&self) {
        self.blocked.notified().await;
    }

    pub fn provisions(&self) -> usize {
        self.provisions.load(Ordering::SeqCst)
    }

    pub fn disposals(&self) -> usize {
        self.disposals.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Sandbox for FakeSandbox {
    async fn provision(
        &self,
        _toolchain: &Toolchain,
        _limits: &ExecutionLimits,
    ) -> Result<SandboxHandle, SandboxError> {
        self.provisions.fetch_add(1, Ordering::SeqCst);
        Ok(SandboxHandle {
            id: format!("fake-{}", self.provisions()),
        })
    }

    async fn compile(
        &self,
        _handle: &SandboxHandle,
        toolchain: &Toolchain,
        _source_code: &str,
    ) -> Result<CompileOutput, SandboxError> {
        let scripted = self.compile_queue.lock().unwrap().pop_front();
        match scripted {
            Some(result) => result,
            None => Ok(CompileOutput::Success(Artifact {
                run_command: toolchain.run_command.to_string(),
            })),
        }
    }

    async fn execute(
        &self,
        _handle: &SandboxHandle,
        _artifact: &Artifact,
        _input: &str,
        _limits: &ExecutionLimits,
    ) -> Result<ExecutionReport, SandboxError> {
        let scripted = self.execution_queue.lock().unwrap().pop_front();
        match scripted {
            Some(ScriptedExecution::Respond(result)) => result,
            Some(ScriptedExecution::Block) => {
                self.blocked.notify_one();
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Ok(completed("")),
        }
    }

    async fn dispose(&self, _handle: SandboxHandle) -> Result<(), SandboxError> {
        self.disposals.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

mockall::mock! {
    pub Sandbox {}

    #[async_trait]
    impl Sandbox for Sandbox {
        async fn provision(
            &self,
            toolchain: &Toolchain,
            limits: &ExecutionLimits,
        ) -> Result<SandboxHandle, SandboxError>;

        async fn compile(
            &self,
            handle: &SandboxHandle,
            toolchain: &Toolchain,
            source_code: &str,
        ) -> Result<CompileOutput, SandboxError>;

        async fn execute(
            &self,
            handle: &SandboxHandle,
            artifact: &Artifact,
            input: &str,
            limits: &ExecutionLimits,
        ) -> Result<ExecutionReport, SandboxError>;

        async fn dispose(&self, handle: SandboxHandle) -> Result<(), SandboxError>;
    }
}
