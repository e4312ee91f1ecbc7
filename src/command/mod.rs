//! Running external CLI clients.
//!
//! A [`CommandLine`] is handed to a [`CommandExecutor`], which produces the
//! captured [`RawOutput`]. The [`CommandRunner`] sits on top of an executor and
//! applies the rules every call shares: echo the command line, treat anything
//! on the error stream as a failure, and decode stdout as JSON or text.

pub mod process;

pub use process::ProcessExecutor;

use crate::error::{CommandError, IntegrationError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// A program plus its argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// True if `tokens` appear back to back somewhere in the arguments.
    pub fn contains_sequence(&self, tokens: &[&str]) -> bool {
        if tokens.is_empty() {
            return true;
        }
        self.args
            .windows(tokens.len())
            .any(|window| window.iter().zip(tokens).all(|(a, b)| a == b))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Bytes captured from a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl RawOutput {
    pub fn stdout(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    pub fn stderr(stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }
}

/// Executes a command line to completion and captures what it printed.
///
/// [`ProcessExecutor`] spawns real processes; tests plug in scripted stubs.
pub trait CommandExecutor {
    fn execute(
        &self,
        command: &CommandLine,
    ) -> impl Future<Output = Result<RawOutput, CommandError>>;
}

/// Runs commands through an executor and decodes their output.
pub struct CommandRunner<E> {
    executor: E,
    echo: bool,
}

impl<E: CommandExecutor> CommandRunner<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            echo: true,
        }
    }

    /// Controls whether command lines and their output are printed.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn echo(&self) -> bool {
        self.echo
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Runs a command whose stdout must be a JSON document.
    pub async fn run_json(&self, command: &CommandLine) -> Result<Value, CommandError> {
        let stdout = self.run(command).await?;
        let value: Value =
            serde_json::from_slice(&stdout).map_err(|source| CommandError::InvalidJson {
                command: command.to_string(),
                source,
            })?;
        if self.echo {
            println!("{}", pretty_json(&value));
        }
        Ok(value)
    }

    /// Runs a JSON command and decodes the document into an entity record.
    pub async fn run_as<T: DeserializeOwned>(
        &self,
        command: &CommandLine,
        entity: &'static str,
    ) -> Result<T, IntegrationError> {
        let value = self.run_json(command).await?;
        serde_json::from_value(value).map_err(|source| IntegrationError::UnexpectedEntity {
            entity,
            command: command.to_string(),
            source,
        })
    }

    /// Runs a command whose output is meant for a human and returns it as text.
    pub async fn run_text(&self, command: &CommandLine) -> Result<String, CommandError> {
        let stdout = self.run(command).await?;
        let text = String::from_utf8_lossy(&stdout).into_owned();
        if self.echo {
            print!("{}", text);
            if !text.is_empty() && !text.ends_with('\n') {
                println!();
            }
        }
        Ok(text)
    }

    async fn run(&self, command: &CommandLine) -> Result<Vec<u8>, CommandError> {
        if self.echo {
            println!("--> {}", command);
        }

        let started = Instant::now();
        let output = self.executor.execute(command).await?;
        debug!(command = %command, elapsed = ?started.elapsed(), "Command finished");

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            if self.echo {
                println!("{}", stderr);
            }
            return Err(CommandError::ErrorStream {
                command: command.to_string(),
                stderr: stderr.to_string(),
            });
        }

        Ok(output.stdout)
    }
}

/// Renders JSON with four-space indentation. Object keys come out sorted
/// because `serde_json::Map` is ordered by key.
pub fn pretty_json(value: &Value) -> String {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buffer).unwrap_or_else(|_| value.to_string())
}
