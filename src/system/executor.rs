// src/system/executor.rs

use crate::constants::{COMSPEC_FLAGS, POSIX_SHELL};
use crate::models::{ProcessOutcome, SpawnFailure, SpawnOptions, SpawnPlan, SpawnRequest};
use crate::system::planner;
use crate::system::platform::{HostContext, HostPlatform};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Command '{command}' could not be started: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("spawn {command} ENOENT")]
    CommandNotFound { command: String, args: Vec<String> },
    #[error("{}", exit_message(.command, .code, .signal))]
    ExitFailure {
        command: String,
        code: Option<i32>,
        signal: Option<String>,
    },
}

fn exit_message(command: &str, code: &Option<i32>, signal: &Option<String>) -> String {
    match (code, signal) {
        (Some(code), Some(signal)) => format!("{} exit code: {} signal: {}", command, code, signal),
        (Some(code), None) => format!("{} exit code: {}", command, code),
        (None, Some(signal)) => format!("{} terminated by signal: {}", command, signal),
        (None, None) => format!("{} exited abnormally", command),
    }
}

impl ProcessOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Converts the outcome into the error reported for `original`.
    pub fn into_result(self, original: &SpawnRequest) -> Result<(), RunError> {
        let command = original.command.clone();
        match self {
            Self::Success => Ok(()),
            Self::ExitFailure { code, signal } => Err(RunError::ExitFailure {
                command,
                code,
                signal,
            }),
            Self::SpawnError {
                reason: SpawnFailure::CommandNotFound,
            } => Err(RunError::CommandNotFound {
                command,
                args: original.args.clone(),
            }),
            Self::SpawnError {
                reason: SpawnFailure::Io(source),
            } => Err(RunError::Spawn { command, source }),
        }
    }
}

/// Maps a finished process to its outcome.
///
/// `cmd.exe` exits with a bare 1 when it cannot find a program. On Windows, if
/// planning never resolved an executable, that exit is reported as a missing
/// command instead of an ordinary failure.
pub fn classify_exit(
    platform: HostPlatform,
    code: Option<i32>,
    signal: Option<String>,
    was_resolved: bool,
) -> ProcessOutcome {
    if platform.is_windows() && code == Some(1) && !was_resolved {
        return ProcessOutcome::SpawnError {
            reason: SpawnFailure::CommandNotFound,
        };
    }
    match (code, signal) {
        (Some(0), None) => ProcessOutcome::Success,
        (code, signal) => ProcessOutcome::ExitFailure { code, signal },
    }
}

/// Runs `command` with `args` in `dir`, inheriting standard I/O, and waits for it.
pub async fn run(
    host: &HostContext,
    command: &str,
    args: &[String],
    dir: &Path,
) -> Result<(), RunError> {
    let request = SpawnRequest::new(command, args.iter().cloned())
        .with_options(SpawnOptions::default().with_cwd(dir));
    spawn(request, host).await
}

/// Plans and executes a request, returning its terminal state as a `Result`.
pub async fn spawn(request: SpawnRequest, host: &HostContext) -> Result<(), RunError> {
    let plan = planner::plan(request, host);
    execute(&plan, host).await.into_result(&plan.original)
}

/// Executes an already planned spawn. Exactly one child is started and awaited.
pub async fn execute(plan: &SpawnPlan, host: &HostContext) -> ProcessOutcome {
    let mut command = build_command(plan, host);
    log::debug!("Spawning '{}' with args {:?}", plan.command, plan.args);

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            log::debug!("Spawning '{}' failed: {}", plan.command, e);
            return ProcessOutcome::SpawnError {
                reason: SpawnFailure::Io(e),
            };
        }
    };

    match child.wait().await {
        Ok(status) => {
            let outcome = classify_exit(
                host.platform,
                status.code(),
                signal_name(&status),
                plan.was_resolved(),
            );
            log::debug!("'{}' finished with {:?} -> {:?}", plan.command, status, outcome);
            outcome
        }
        Err(e) => ProcessOutcome::SpawnError {
            reason: SpawnFailure::Io(e),
        },
    }
}

fn build_command(plan: &SpawnPlan, host: &HostContext) -> Command {
    let (program, args, verbatim) = if plan.options.shell {
        shell_invocation(plan, host)
    } else {
        (plan.command.clone(), plan.args.clone(), plan.verbatim_args)
    };

    let mut command = Command::new(&program);
    push_args(&mut command, &args, verbatim);

    if let Some(dir) = &plan.options.cwd {
        let dir = host.cwd.join(dir);
        command.current_dir(dunce::simplified(&dir));
    }
    if let Some(env) = &plan.options.env {
        command.env_clear().envs(env);
    }

    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    command
}

/// Joins the plan into one line for the host shell, without further quoting.
fn shell_invocation(plan: &SpawnPlan, host: &HostContext) -> (String, Vec<String>, bool) {
    let line = std::iter::once(plan.command.as_str())
        .chain(plan.args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");

    if host.platform.is_windows() {
        let mut args: Vec<String> = COMSPEC_FLAGS.iter().map(|flag| flag.to_string()).collect();
        args.push(format!("\"{}\"", line));
        (host.comspec().to_string(), args, true)
    } else {
        (POSIX_SHELL.to_string(), vec!["-c".to_string(), line], false)
    }
}

#[cfg(windows)]
fn push_args(command: &mut Command, args: &[String], verbatim: bool) {
    if verbatim {
        for arg in args {
            command.raw_arg(arg);
        }
    } else {
        command.args(args);
    }
}

#[cfg(not(windows))]
fn push_args(command: &mut Command, args: &[String], _verbatim: bool) {
    command.args(args);
}

#[cfg(unix)]
fn signal_name(status: &ExitStatus) -> Option<String> {
    use nix::sys::signal::Signal;
    use std::os::unix::process::ExitStatusExt;

    status.signal().map(|raw| {
        Signal::try_from(raw)
            .map(|signal| signal.as_str().to_string())
            .unwrap_or_else(|_| raw.to_string())
    })
}

#[cfg(not(unix))]
fn signal_name(_status: &ExitStatus) -> Option<String> {
    None
}
