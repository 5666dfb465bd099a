//! Timeout-bounded execution of external commands
//!
//! Every external program gover starts goes through [`run`].
//! A command that outlives its timeout is killed and reported as
//! [`GoverError::Timeout`].

use crate::error::{GoverError, GoverResult};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::debug;

/// Max number of output lines to include in error messages.
const ERROR_TAIL_LINES: usize = 50;

/// What to do with the child's standard streams
#[derive(Clone, Copy)]
pub enum Output<'a> {
    /// Share this process's stdin, stdout and stderr
    Inherit,
    /// Collect stdout and stderr
    Capture,
    /// Hand each stdout/stderr line to the callback as it arrives
    Stream(&'a (dyn Fn(String) + Send + Sync)),
}

/// An external command to run
#[derive(Debug, Clone)]
pub struct CommandSpec {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    env: Vec<(OsString, OsString)>,
    env_removed: Vec<OsString>,
    timeout: Option<Duration>,
}

impl CommandSpec {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            env_removed: Vec::new(),
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.env
            .push((key.as_ref().to_owned(), value.as_ref().to_owned()));
        self
    }

    /// Keep `key` out of the child's environment, inherited or not
    pub fn env_remove(mut self, key: impl AsRef<OsStr>) -> Self {
        self.env_removed.push(key.as_ref().to_owned());
        self
    }

    pub fn timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    /// Shell-like rendering for logs and error messages
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of a command that ran to completion
#[derive(Debug, Clone, Default)]
pub struct Finished {
    /// Exit code; -1 if the child was terminated by a signal
    pub code: i32,
    /// Captured stdout (`Output::Capture` only)
    pub stdout: String,
    /// Captured stderr (`Output::Capture` only)
    pub stderr: String,
    /// Streamed lines (`Output::Stream` only)
    pub lines: Vec<String>,
}

impl Finished {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// The useful tail of the output for error diagnostics
    pub fn error_output(&self) -> String {
        let lines: Vec<&str> = if self.lines.is_empty() {
            self.stdout.lines().chain(self.stderr.lines()).collect()
        } else {
            self.lines.iter().map(String::as_str).collect()
        };
        let start = lines.len().saturating_sub(ERROR_TAIL_LINES);
        lines[start..].join("\n")
    }
}

/// Run a command to completion.
///
/// A non-zero exit is not an error here; callers inspect [`Finished::code`].
pub async fn run(spec: &CommandSpec, output: Output<'_>) -> GoverResult<Finished> {
    let command_line = spec.display();

    let mut command = Command::new(&spec.program);
    command.args(&spec.args).kill_on_drop(true);
    if let Some(ref cwd) = spec.cwd {
        command.current_dir(cwd);
    }
    for (key, value) in &spec.env {
        command.env(key, value);
    }
    for key in &spec.env_removed {
        command.env_remove(key);
    }
    match output {
        Output::Inherit => {
            command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }
        Output::Capture | Output::Stream(_) => {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        }
    }

    debug!("Executing: {}", command_line);
    let mut child = command
        .spawn()
        .map_err(|e| GoverError::command_failed(command_line.clone(), e))?;

    let work = async {
        let failed = |e| GoverError::command_failed(command_line.clone(), e);
        match output {
            Output::Inherit => {
                let status = child.wait().await.map_err(failed)?;
                Ok(Finished {
                    code: status.code().unwrap_or(-1),
                    ..Finished::default()
                })
            }
            Output::Capture => {
                let out = child.wait_with_output().await.map_err(failed)?;
                Ok(Finished {
                    code: out.status.code().unwrap_or(-1),
                    stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                    lines: Vec::new(),
                })
            }
            Output::Stream(on_line) => {
                let lines = stream_child_output(&mut child, on_line).await;
                let status = child.wait().await.map_err(failed)?;
                Ok(Finished {
                    code: status.code().unwrap_or(-1),
                    lines,
                    ..Finished::default()
                })
            }
        }
    };

    match spec.timeout {
        // Dropping `work` drops the child, which kills it
        Some(limit) => tokio::time::timeout(limit, work)
            .await
            .map_err(|_| GoverError::Timeout {
                command: command_line.clone(),
                secs: limit.as_secs(),
            })?,
        None => work.await,
    }
}

/// Stream stdout+stderr from a child process, calling `on_output` for each line.
///
/// Returns all collected output lines for error reporting.
async fn stream_child_output(
    child: &mut Child,
    on_output: &(dyn Fn(String) + Send + Sync),
) -> Vec<String> {
    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return Vec::new();
    };

    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut stdout_reader = BufReader::new(stdout).lines();

    let mut all_output = Vec::new();
    let mut stderr_done = false;
    let mut stdout_done = false;

    while !stderr_done || !stdout_done {
        tokio::select! {
            line = stderr_reader.next_line(), if !stderr_done => {
                match line {
                    Ok(Some(line)) => {
                        on_output(line.clone());
                        all_output.push(line);
                    }
                    _ => stderr_done = true,
                }
            }
            line = stdout_reader.next_line(), if !stdout_done => {
                match line {
                    Ok(Some(line)) => {
                        on_output(line.clone());
                        all_output.push(line);
                    }
                    _ => stdout_done = true,
                }
            }
        }
    }

    all_output
}
