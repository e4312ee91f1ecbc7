//! Deploy/undeploy lifecycle driven through the orchestrator client.

use crate::command::{CommandExecutor, CommandLine, CommandRunner};
use crate::config::{Config, Endpoint};
use crate::error::IntegrationError;
use crate::model::{DeployedInstance, Inventory};
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Lifecycle of the single deployment a run manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentState {
    Undeployed,
    Deploying,
    Deployed,
    Undeploying,
}

impl fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeploymentState::Undeployed => "undeployed",
            DeploymentState::Deploying => "deploying",
            DeploymentState::Deployed => "deployed",
            DeploymentState::Undeploying => "undeploying",
        };
        f.write_str(name)
    }
}

pub struct DeploymentDriver<'a, E> {
    runner: &'a CommandRunner<E>,
    cli: PathBuf,
    endpoint: Endpoint,
    state: DeploymentState,
}

impl<'a, E: CommandExecutor> DeploymentDriver<'a, E> {
    pub fn new(runner: &'a CommandRunner<E>, cli: impl Into<PathBuf>, endpoint: Endpoint) -> Self {
        Self {
            runner,
            cli: cli.into(),
            endpoint,
            state: DeploymentState::Undeployed,
        }
    }

    pub fn from_config(runner: &'a CommandRunner<E>, config: &Config) -> Self {
        Self::new(runner, config.orchestrator_cli(), config.orchestrator().clone())
    }

    pub fn state(&self) -> DeploymentState {
        self.state
    }

    fn command<'s>(&self, args: impl IntoIterator<Item = &'s str>) -> CommandLine {
        CommandLine::new(&self.cli)
            .args(self.endpoint.to_args())
            .args(["orchestrator"])
            .args(args)
    }

    /// Deploys the seeded descriptor on the seeded network.
    pub async fn deploy(
        &mut self,
        inventory: &Inventory,
    ) -> Result<DeployedInstance, IntegrationError> {
        self.transition("deploy", DeploymentState::Undeployed, DeploymentState::Deploying)?;
        info!(descriptor = %inventory.descriptor.id, "Test deployment");

        let descriptor = &inventory.descriptor;
        let command = self.command([
            "deploy",
            inventory.network.id.as_str(),
            descriptor.id.as_str(),
            descriptor.label.as_str(),
            descriptor.name.as_str(),
        ]);

        match self.runner.run_as(&command, "deployed instance").await {
            Ok(instance) => {
                self.state = DeploymentState::Deployed;
                Ok(instance)
            }
            Err(e) => {
                self.state = DeploymentState::Undeployed;
                Err(e)
            }
        }
    }

    /// Removes an instance created by [`DeploymentDriver::deploy`].
    pub async fn undeploy(
        &mut self,
        inventory: &Inventory,
        instance: &DeployedInstance,
    ) -> Result<String, IntegrationError> {
        self.transition("undeploy", DeploymentState::Deployed, DeploymentState::Undeploying)?;
        info!(instance = %instance.deployed_id, "Test undeploy");

        let command = self.command([
            "undeploy",
            inventory.network.id.as_str(),
            instance.deployed_id.as_str(),
        ]);

        match self.runner.run_text(&command).await {
            Ok(output) => {
                self.state = DeploymentState::Undeployed;
                Ok(output)
            }
            Err(e) => {
                self.state = DeploymentState::Deployed;
                Err(e.into())
            }
        }
    }

    fn transition(
        &mut self,
        operation: &'static str,
        from: DeploymentState,
        to: DeploymentState,
    ) -> Result<(), IntegrationError> {
        if self.state != from {
            return Err(IntegrationError::InvalidTransition {
                operation,
                state: self.state,
            });
        }
        self.state = to;
        Ok(())
    }
}
