//! Application manager operations on the target node.
//!
//! All output is plain text meant for the operator; nothing here inspects it.

use crate::command::{CommandExecutor, CommandLine, CommandRunner};
use crate::config::{Config, Endpoint};
use crate::error::CommandError;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct PackageController<'a, E> {
    runner: &'a CommandRunner<E>,
    cli: PathBuf,
    node: Endpoint,
}

impl<'a, E: CommandExecutor> PackageController<'a, E> {
    pub fn new(runner: &'a CommandRunner<E>, cli: impl Into<PathBuf>, node: Endpoint) -> Self {
        Self {
            runner,
            cli: cli.into(),
            node,
        }
    }

    pub fn from_config(runner: &'a CommandRunner<E>, config: &Config) -> Self {
        Self::new(runner, config.appmgr_cli(), config.target_node().clone())
    }

    fn command<'s>(&self, args: impl IntoIterator<Item = &'s str>) -> CommandLine {
        CommandLine::new(&self.cli)
            .args(self.node.to_args())
            .args(args)
    }

    /// Uploads a package archive to the node's application manager.
    pub async fn upload(&self, package: &Path) -> Result<String, CommandError> {
        info!(package = %package.display(), node = %self.node, "Upload package");
        let command = self
            .command(["package", "upload"])
            .arg(package.to_string_lossy());
        self.runner.run_text(&command).await
    }

    pub async fn list_manifests(&self) -> Result<String, CommandError> {
        info!("Check available manifests");
        self.runner
            .run_text(&self.command(["manifest", "list"]))
            .await
    }

    pub async fn list_apps(&self) -> Result<String, CommandError> {
        info!("Check deployed instance");
        self.runner.run_text(&self.command(["app", "list"])).await
    }

    pub async fn stop_app(&self, name: &str) -> Result<String, CommandError> {
        info!(app = name, "Stop running instance");
        self.runner
            .run_text(&self.command(["app", "stop", name]))
            .await
    }
}
