use std::ffi::OsString;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use log::debug;

use crate::error::ExecutionError;

/// A single child process to run.
pub struct Invocation<'a> {
    program: &'a Path,
    args: Vec<OsString>,
    sudo: Option<&'a Path>,
    env: &'a [(&'a str, &'a str)],
    verbose: bool,
    capture_stdout: bool,
}

impl<'a> Invocation<'a> {
    pub fn new<I, S>(program: &'a Path, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program,
            args: args.into_iter().map(Into::into).collect(),
            sudo: None,
            env: &[],
            verbose: false,
            capture_stdout: false,
        }
    }

    pub fn sudo(mut self, sudo: Option<&'a Path>) -> Self {
        self.sudo = sudo;
        self
    }

    pub fn env(mut self, env: &'a [(&'a str, &'a str)]) -> Self {
        self.env = env;
        self
    }

    /// Let the child write straight to the terminal.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn capture_stdout(mut self) -> Self {
        self.capture_stdout = true;
        self
    }

    fn command_line(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(sudo) = self.sudo {
            parts.push(sudo.to_string_lossy().into_owned());
            parts.push("--".to_string());
        }
        parts.push(self.program.to_string_lossy().into_owned());
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts
    }

    /// Run the child to completion. Only a failure to start it is an error.
    pub fn run(&self) -> Result<Completion, ExecutionError> {
        let (launcher, mut command) = match self.sudo {
            Some(sudo) => {
                let mut command = Command::new(sudo);
                command.arg("--").arg(self.program);
                (sudo, command)
            }
            None => (self.program, Command::new(self.program)),
        };
        command.args(&self.args);
        for (key, value) in self.env {
            command.env(key, value);
        }

        let stdout = if self.capture_stdout {
            Stdio::piped()
        } else if self.verbose {
            Stdio::inherit()
        } else {
            Stdio::null()
        };
        let stderr = if self.verbose {
            Stdio::inherit()
        } else {
            Stdio::piped()
        };
        command.stdin(Stdio::inherit()).stdout(stdout).stderr(stderr);

        debug!("executing: {}", shell_join(&self.command_line()));

        // output() waits for the child on every path, interrupted or not
        let output = command.output().map_err(|source| ExecutionError::Launch {
            program: launcher.to_string_lossy().into_owned(),
            source,
        })?;

        Ok(Completion {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Result of a child that was started and has exited.
#[derive(Debug)]
pub struct Completion {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Completion {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Human-readable reason for a non-zero exit, with the child's last error line.
    pub fn failure_detail(&self) -> String {
        let reason = match (self.status.code(), self.status.signal()) {
            (Some(code), _) => format!("exit status {}", code),
            (None, Some(signal)) => format!("terminated by signal {}", signal),
            (None, None) => "terminated abnormally".to_string(),
        };

        match last_line(&self.stderr) {
            Some(line) => format!("{}: {}", reason, line),
            None => reason,
        }
    }
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().rev().map(str::trim).find(|l| !l.is_empty())
}

fn shell_join(parts: &[String]) -> String {
    parts
        .iter()
        .map(|p| {
            if !p.is_empty() && !p.contains(|c: char| c.is_whitespace() || "'\"$\\".contains(c)) {
                p.clone()
            } else {
                format!("'{}'", p.replace('\'', r"'\''"))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
