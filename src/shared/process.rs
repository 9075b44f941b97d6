//! External process execution for `git` and `gh`.
//!
//! Every invocation goes through [`CommandRunner`] so that the git-flow and
//! pull request logic can be exercised against a scripted runner in tests.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Upper bound for a single external invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` failed with {}: {stderr}", describe_exit(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("`{command}` did not finish within {timeout:?}")]
    TimedOut { command: String, timeout: Duration },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    }
}

/// Trait for executing external commands (git, gh).
/// Enables dependency injection for testing without touching a real repository.
pub trait CommandRunner {
    /// Runs `program` with `args` and returns its trimmed standard output.
    /// A non-zero exit status is reported as [`ProcessError::Failed`].
    async fn run(&self, program: &str, args: &[&str]) -> Result<String, ProcessError>;

    async fn run_git(&self, args: &[&str]) -> Result<String, ProcessError> {
        self.run("git", args).await
    }

    async fn run_gh(&self, args: &[&str]) -> Result<String, ProcessError> {
        self.run("gh", args).await
    }

    /// Runs `program` attached to the terminal (stdin, stdout and stderr
    /// inherited) so that it can prompt the user. Only the exit status is
    /// reported.
    async fn run_interactive(&self, program: &str, args: &[&str]) -> Result<(), ProcessError>;
}

/// Production implementation that spawns real processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
    current_dir: Option<PathBuf>,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            current_dir: None,
        }
    }

    /// Run every command from `dir` instead of the process working directory.
    #[cfg_attr(not(test), expect(dead_code, reason = "used by repository tests"))]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl ProcessRunner {
    fn command(&self, program: &str, args: &[&str]) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args).kill_on_drop(true);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    async fn bounded<T>(
        &self,
        command: &str,
        task: impl Future<Output = std::io::Result<T>>,
    ) -> Result<T, ProcessError> {
        match tokio::time::timeout(self.timeout, task).await {
            Ok(result) => result.map_err(|source| ProcessError::Spawn {
                command: command.to_string(),
                source,
            }),
            Err(_) => Err(ProcessError::TimedOut {
                command: command.to_string(),
                timeout: self.timeout,
            }),
        }
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String, ProcessError> {
        let command = command_line(program, args);
        debug!(%command, "Running process");

        let mut cmd = self.command(program, args);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let output = self.bounded(&command, cmd.output()).await?;

        if !output.status.success() {
            return Err(ProcessError::Failed {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(%command, %stdout, "Process finished");
        Ok(stdout)
    }

    async fn run_interactive(&self, program: &str, args: &[&str]) -> Result<(), ProcessError> {
        let command = command_line(program, args);
        debug!(%command, "Running interactive process");

        let mut cmd = self.command(program, args);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        let status = self.bounded(&command, cmd.status()).await?;

        if !status.success() {
            return Err(ProcessError::Failed {
                command,
                code: status.code(),
                stderr: String::new(),
            });
        }
        Ok(())
    }
}

/// Render a command line for logs and error messages, quoting where needed.
pub fn command_line(program: &str, args: &[&str]) -> String {
    let words = std::iter::once(program).chain(args.iter().copied());
    shlex::try_join(words).unwrap_or_else(|_| format!("{program} {}", args.join(" ")))
}


/// Test utilities for mocking command execution.
#[cfg(test)]
pub mod test_utils {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    enum MockResponse {
        Success(String),
        Failure(String),
    }

    /// Splits a shell-style command line (`gh pr create --title 'Release: 2.0'`)
    /// into the argv it stands for.
    pub fn argv(command: &str) -> Vec<String> {
        shlex::split(command).unwrap_or_else(|| panic!("unbalanced quotes in {command:?}"))
    }

    fn record(program: &str, args: &[&str]) -> Vec<String> {
        std::iter::once(program)
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    /// Mock implementation of CommandRunner for testing.
    /// Returns pre-configured responses keyed by the exact argv and records
    /// every invocation. Commands without a scripted response succeed with
    /// empty output.
    #[derive(Debug, Default)]
    pub struct MockCommandRunner {
        responses: HashMap<Vec<String>, MockResponse>,
        calls: Mutex<Vec<Vec<String>>>,
        interactive: Mutex<Vec<Vec<String>>>,
    }

    impl MockCommandRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Script a successful response for `command`, written as a shell
        /// command line (e.g. "git branch").
        pub fn on(mut self, command: &str, stdout: &str) -> Self {
            self.responses.insert(
                argv(command),
                MockResponse::Success(stdout.trim().to_string()),
            );
            self
        }

        /// Script a non-zero exit for `command`, with `stderr` as the message.
        pub fn fail(mut self, command: &str, stderr: &str) -> Self {
            self.responses
                .insert(argv(command), MockResponse::Failure(stderr.to_string()));
            self
        }

        /// Every command run so far, in order, rendered as command lines.
        pub fn calls(&self) -> Vec<String> {
            self.argv_calls()
                .iter()
                .map(|call| {
                    let args: Vec<&str> = call[1..].iter().map(String::as_str).collect();
                    command_line(&call[0], &args)
                })
                .collect()
        }

        /// Every command run so far, in order, as argv.
        pub fn argv_calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }

        pub fn was_called(&self, command: &str) -> bool {
            self.argv_calls().contains(&argv(command))
        }

        /// Whether `command` was run through [`CommandRunner::run_interactive`].
        pub fn was_run_interactively(&self, command: &str) -> bool {
            self.interactive.lock().unwrap().contains(&argv(command))
        }

        /// Calls whose leading argv entries equal the words of `prefix`.
        pub fn calls_starting_with(&self, prefix: &str) -> Vec<Vec<String>> {
            let prefix = argv(prefix);
            self.argv_calls()
                .into_iter()
                .filter(|call| call.starts_with(&prefix))
                .collect()
        }

        fn respond(&self, call: Vec<String>) -> Result<String, ProcessError> {
            let response = self.responses.get(&call).cloned();
            let command = call.join(" ");
            self.calls.lock().unwrap().push(call);

            match response {
                Some(MockResponse::Success(stdout)) => Ok(stdout),
                Some(MockResponse::Failure(stderr)) => Err(ProcessError::Failed {
                    command,
                    code: Some(1),
                    stderr,
                }),
                None => Ok(String::new()),
            }
        }
    }

    impl CommandRunner for MockCommandRunner {
        async fn run(&self, program: &str, args: &[&str]) -> Result<String, ProcessError> {
            self.respond(record(program, args))
        }

        async fn run_interactive(&self, program: &str, args: &[&str]) -> Result<(), ProcessError> {
            let call = record(program, args);
            self.interactive.lock().unwrap().push(call.clone());
            self.respond(call).map(|_| ())
        }
    }
}
