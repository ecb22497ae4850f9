//! Docker-backed sandbox
//!
//! One container per judged submission: no network, a pids cap, a hard
//! memory cap and a single CPU. The container is the disposable working
//! directory; removing it erases every side effect of the run.

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use base64::Engine;
use bollard::{
    Docker,
    container::LogOutput,
    exec::{CreateExecOptions, StartExecResults},
    models::ContainerCreateBody,
    query_parameters::{CreateContainerOptionsBuilder, RemoveContainerOptionsBuilder},
};
use futures::StreamExt;
use uuid::Uuid;

use crate::constants::{
    COMPILE_TIMEOUT_MS, MAX_DIAGNOSTICS_LENGTH, MAX_OUTPUT_CAPTURE_BYTES, MEMORY_HEADROOM_KB,
    WALL_TIME_JITTER_MS, WALL_TIME_MULTIPLIER,
};
use crate::judge::languages::Toolchain;
use crate::models::test_case::truncate;
use crate::judge::sandbox::{
    Artifact, CompileOutput, ExecOutcome, ExecutionReport, Sandbox, SandboxError, SandboxHandle,
};
use crate::models::ExecutionLimits;

/// Sandbox implementation on top of the Docker Engine API
pub struct DockerSandbox {
    docker: Docker,
}

impl DockerSandbox {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// Write a file into the container workspace.
    /// Content goes through base64 so arbitrary bytes survive the shell.
    async fn write_file(
        &self,
        container_id: &str,
        path: &str,
        content: &str,
    ) -> Result<(), SandboxError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(content);
        let cmd = format!("echo '{}' | base64 -d > {}", encoded, path);
        self.exec_command(container_id, &cmd).await?;
        Ok(())
    }

    /// Execute a shell command in the container, collecting output and exit code
    async fn exec_command(&self, container_id: &str, cmd: &str) -> Result<ExecResult, SandboxError> {
        let exec = self
            .docker
            .create_exec(
                container_id,
                CreateExecOptions {
                    cmd: Some(vec!["/bin/sh", "-c", cmd]),
                    attach_stdout: Some(true),
                    attach_stderr: Some(true),
                    ..Default::default()
                },
            )
            .await?;

        let output = self.docker.start_exec(&exec.id, None).await?;

        let mut stdout = String::new();
        let mut stderr = String::new();

        if let StartExecResults::Attached { mut output, .. } = output {
            while let Some(msg) = output.next().await {
                match msg? {
                    LogOutput::StdOut { message } => {
                        stdout.push_str(&String::from_utf8_lossy(&message));
                    }
                    LogOutput::StdErr { message } => {
                        stderr.push_str(&String::from_utf8_lossy(&message));
                    }
                    _ => {}
                }
            }
        }

        let inspect = self.docker.inspect_exec(&exec.id).await?;
        let exit_code = inspect.exit_code.unwrap_or(-1) as i32;

        Ok(ExecResult {
            stdout,
            stderr,
            exit_code,
        })
    }

    /// Read a workspace file back out, capped at `max_bytes`
    async fn read_file(
        &self,
        container_id: &str,
        path: &str,
        max_bytes: usize,
    ) -> Result<String, SandboxError> {
        let cmd = format!("head -c {} {} 2>/dev/null || true", max_bytes, path);
        let result = self.exec_command(container_id, &cmd).await?;
        Ok(result.stdout)
    }

    /// Parse peak RSS in kilobytes from `/usr/bin/time -v` output
    fn parse_memory_usage(time_output: &str) -> u64 {
        for line in time_output.lines() {
            if line.contains("Maximum resident set size") {
                if let Some(kb_str) = line.split(':').nth(1) {
                    if let Ok(kb) = kb_str.trim().parse::<u64>() {
                        return kb;
                    }
                }
            }
        }
        0
    }

    /// Parse combined user+system CPU time in milliseconds from `/usr/bin/time -v`
    fn parse_cpu_time(time_output: &str) -> u64 {
        let mut user_time = 0.0f64;
        let mut sys_time = 0.0f64;

        for line in time_output.lines() {
            if line.contains("User time (seconds)") {
                if let Some(s) = line.split(':').nth(1) {
                    user_time = s.trim().parse().unwrap_or(0.0);
                }
            } else if line.contains("System time (seconds)") {
                if let Some(s) = line.split(':').nth(1) {
                    sys_time = s.trim().parse().unwrap_or(0.0);
                }
            }
        }

        ((user_time + sys_time) * 1000.0) as u64
    }

    /// Classify one run from its raw observations.
    ///
    /// Wall time over the limit counts as a timeout even when the process
    /// exited on its own (a sleeping or I/O-blocked program consumes no
    /// CPU); the jitter margin absorbs container scheduling noise. The
    /// 3x multiplier remains the hard kill ceiling only.
    fn classify(
        exit_code: i32,
        cpu_time_ms: u64,
        wall_time_ms: u64,
        peak_memory_kb: u64,
        limits: &ExecutionLimits,
    ) -> ExecOutcome {
        let timed_out = exit_code == 124
            || cpu_time_ms > limits.time_limit_ms
            || wall_time_ms > limits.time_limit_ms + WALL_TIME_JITTER_MS;

        if timed_out {
            ExecOutcome::TimedOut
        } else if peak_memory_kb > limits.memory_limit_kb {
            ExecOutcome::MemoryExceeded
        } else if exit_code != 0 {
            ExecOutcome::Crashed
        } else {
            ExecOutcome::Completed
        }
    }
}

/// Raw result of one `exec` in the container
struct ExecResult {
    stdout: String,
    stderr: String,
    exit_code: i32,
}

#[async_trait]
impl Sandbox for DockerSandbox {
    async fn provision(
        &self,
        toolchain: &Toolchain,
        limits: &ExecutionLimits,
    ) -> Result<SandboxHandle, SandboxError> {
        let container_name = format!("codejudge-{}", Uuid::new_v4());

        let options = CreateContainerOptionsBuilder::default()
            .name(&container_name)
            .build();

        let memory_bytes = ((limits.memory_limit_kb + MEMORY_HEADROOM_KB) * 1024) as i64;

        let host_config = bollard::models::HostConfig {
            memory: Some(memory_bytes),
            memory_swap: Some(memory_bytes),
            cpu_period: Some(100000),
            cpu_quota: Some(100000), // 1 CPU
            network_mode: Some("none".to_string()),
            pids_limit: Some(64),
            ..Default::default()
        };

        let config = ContainerCreateBody {
            image: Some(toolchain.image.to_string()),
            tty: Some(true),
            open_stdin: Some(true),
            host_config: Some(host_config),
            working_dir: Some("/workspace".to_string()),
            env: Some(vec!["LANG=C.UTF-8".to_string()]),
            labels: Some({
                let mut labels = HashMap::new();
                labels.insert("codejudge.sandbox".to_string(), container_name.clone());
                labels
            }),
            ..Default::default()
        };

        let container = self.docker.create_container(Some(options), config).await?;

        self.docker
            .start_container(
                &container.id,
                None::<bollard::query_parameters::StartContainerOptions>,
            )
            .await?;

        Ok(SandboxHandle { id: container.id })
    }

    async fn compile(
        &self,
        handle: &SandboxHandle,
        toolchain: &Toolchain,
        source_code: &str,
    ) -> Result<CompileOutput, SandboxError> {
        let source_path = format!("/workspace/{}", toolchain.source_file);
        self.write_file(&handle.id, &source_path, source_code)
            .await?;

        if let Some(compile_cmd) = toolchain.compile_command {
            let cmd = format!(
                "timeout {:.1}s {} 2>&1",
                COMPILE_TIMEOUT_MS as f64 / 1000.0,
                compile_cmd
            );
            let result = self.exec_command(&handle.id, &cmd).await?;

            if result.exit_code != 0 {
                let mut diagnostics = result.stdout;
                diagnostics.push_str(&result.stderr);
                // Compiler output is full of multibyte quote characters;
                // clip at a char boundary
                return Ok(CompileOutput::Failure {
                    diagnostics: truncate(&diagnostics, MAX_DIAGNOSTICS_LENGTH),
                });
            }
        }

        Ok(CompileOutput::Success(Artifact {
            run_command: toolchain.run_command.to_string(),
        }))
    }

    async fn execute(
        &self,
        handle: &SandboxHandle,
        artifact: &Artifact,
        input: &str,
        limits: &ExecutionLimits,
    ) -> Result<ExecutionReport, SandboxError> {
        self.write_file(&handle.id, "/workspace/input.txt", input)
            .await?;

        // Wall-clock kill ceiling, strictly above the CPU limit to tolerate
        // scheduling jitter. CPU is capped separately via ulimit.
        let hard_wall_secs =
            (limits.time_limit_ms * WALL_TIME_MULTIPLIER) as f64 / 1000.0;
        let cpu_limit_secs = limits.time_limit_ms.div_ceil(1000) + 1;

        let run_cmd = format!(
            "timeout {:.1}s /usr/bin/time -v -o /workspace/.time.txt sh -c \
             'ulimit -t {}; {} < /workspace/input.txt > /workspace/stdout.txt 2> /workspace/stderr.txt'",
            hard_wall_secs, cpu_limit_secs, artifact.run_command
        );

        let start = Instant::now();
        let result = self.exec_command(&handle.id, &run_cmd).await?;
        let wall_time_ms = start.elapsed().as_millis() as u64;

        let stdout = self
            .read_file(&handle.id, "/workspace/stdout.txt", MAX_OUTPUT_CAPTURE_BYTES)
            .await?;
        let stderr = self
            .read_file(&handle.id, "/workspace/stderr.txt", MAX_OUTPUT_CAPTURE_BYTES)
            .await?;
        let time_output = self
            .read_file(&handle.id, "/workspace/.time.txt", 64 * 1024)
            .await?;

        let peak_memory_kb = Self::parse_memory_usage(&time_output);
        let cpu_time_ms = Self::parse_cpu_time(&time_output);

        let outcome = Self::classify(
            result.exit_code,
            cpu_time_ms,
            wall_time_ms,
            peak_memory_kb,
            limits,
        );

        Ok(ExecutionReport {
            stdout,
            stderr,
            exit_code: result.exit_code,
            wall_time_ms,
            peak_memory_kb,
            outcome,
        })
    }

    async fn dispose(&self, handle: SandboxHandle) -> Result<(), SandboxError> {
        let options = RemoveContainerOptionsBuilder::default().force(true).build();

        self.docker
            .remove_container(&handle.id, Some(options))
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIME_V_OUTPUT: &str = "\tCommand being timed: \"./solution\"\n\
        \tUser time (seconds): 0.42\n\
        \tSystem time (seconds): 0.08\n\
        \tMaximum resident set size (kbytes): 10240\n";

    #[test]
    fn parses_peak_rss() {
        assert_eq!(DockerSandbox::parse_memory_usage(TIME_V_OUTPUT), 10240);
        assert_eq!(DockerSandbox::parse_memory_usage(""), 0);
    }

    #[test]
    fn parses_cpu_time_as_user_plus_system() {
        assert_eq!(DockerSandbox::parse_cpu_time(TIME_V_OUTPUT), 500);
        assert_eq!(DockerSandbox::parse_cpu_time("garbage"), 0);
    }

    fn limits() -> ExecutionLimits {
        ExecutionLimits {
            time_limit_ms: 2000,
            memory_limit_kb: 65536,
        }
    }

    #[test]
    fn wall_clock_heavy_run_is_a_timeout_even_on_clean_exit() {
        // A sleeping program: exits 0, near-zero CPU, wall time 2x the limit
        let outcome = DockerSandbox::classify(0, 5, 4000, 1024, &limits());
        assert_eq!(outcome, ExecOutcome::TimedOut);
    }

    #[test]
    fn wall_time_within_jitter_margin_completes() {
        let outcome = DockerSandbox::classify(0, 1800, 2400, 1024, &limits());
        assert_eq!(outcome, ExecOutcome::Completed);
    }

    #[test]
    fn classification_covers_every_outcome() {
        let l = limits();
        assert_eq!(DockerSandbox::classify(124, 0, 6100, 0, &l), ExecOutcome::TimedOut);
        assert_eq!(DockerSandbox::classify(0, 2100, 2100, 0, &l), ExecOutcome::TimedOut);
        assert_eq!(
            DockerSandbox::classify(137, 100, 200, 70000, &l),
            ExecOutcome::MemoryExceeded
        );
        assert_eq!(DockerSandbox::classify(1, 100, 200, 1024, &l), ExecOutcome::Crashed);
        assert_eq!(DockerSandbox::classify(0, 100, 200, 1024, &l), ExecOutcome::Completed);
    }

    #[test]
    fn diagnostics_clip_never_splits_a_multibyte_char() {
        // Three-byte quote character straddling the clip boundary: it
        // occupies bytes MAX-1 .. MAX+2, so the boundary falls inside it
        let mut diagnostics = "a".repeat(MAX_DIAGNOSTICS_LENGTH - 1);
        diagnostics.push_str("\u{2018}expected ;\u{2019} before token");
        assert!(!diagnostics.is_char_boundary(MAX_DIAGNOSTICS_LENGTH));

        let clipped = truncate(&diagnostics, MAX_DIAGNOSTICS_LENGTH);
        assert!(clipped.ends_with("..."));
        assert!(clipped.len() <= MAX_DIAGNOSTICS_LENGTH + 3);
    }
}
