use crate::deploy::DeploymentState;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while running a single external command.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("Command '{command}' reported an error: {stderr}")]
    ErrorStream { command: String, stderr: String },

    #[error("Command '{command}' did not print valid JSON: {source}")]
    InvalidJson {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that stop an integration run.
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Command '{command}' returned a {entity} record that could not be used: {source}")]
    UnexpectedEntity {
        entity: &'static str,
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot {operation} while the deployment is {state}")]
    InvalidTransition {
        operation: &'static str,
        state: DeploymentState,
    },
}
