use crate::command::{CommandExecutor, CommandRunner};
use crate::config::Config;
use crate::deploy::DeploymentDriver;
use crate::error::{CommandError, IntegrationError};
use crate::inventory::{InventoryClient, InventorySeeder};
use crate::model::{DeployedInstance, Inventory};
use crate::package::PackageController;
use serde::Serialize;
use tracing::{info, warn};

/// What a completed run created.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub inventory: Inventory,
    pub instance: DeployedInstance,
}

/// The fixed end-to-end sequence: upload the package, clear any running
/// instance, seed the inventory, then deploy and undeploy while checking the
/// node after each transition.
pub struct IntegrationRun<'a, E> {
    config: &'a Config,
    runner: &'a CommandRunner<E>,
}

impl<'a, E: CommandExecutor> IntegrationRun<'a, E> {
    pub fn new(config: &'a Config, runner: &'a CommandRunner<E>) -> Self {
        Self { config, runner }
    }

    pub async fn execute(&self) -> Result<RunReport, IntegrationError> {
        let packages = PackageController::from_config(self.runner, self.config);

        // Package manager calls only report on the node; later steps never
        // depend on their output.
        observe("upload", packages.upload(self.config.package_path()).await);
        observe("list manifests", packages.list_manifests().await);

        // Nothing may be running yet, so a failed stop is expected.
        if let Err(e) = packages.stop_app(self.config.stop_app_name()).await {
            warn!(app = self.config.stop_app_name(), error = %e, "Stop failed, continuing");
        }

        let client = InventoryClient::from_config(self.runner, self.config);
        let inventory = InventorySeeder::new(client, self.config.seed_plan())
            .seed()
            .await?;

        let mut driver = DeploymentDriver::from_config(self.runner, self.config);
        let instance = driver.deploy(&inventory).await?;
        info!(instance = %instance.deployed_id, "Tested");
        observe("check after deploy", packages.list_apps().await);

        driver.undeploy(&inventory, &instance).await?;
        info!("Tested");
        observe("check after undeploy", packages.list_apps().await);

        Ok(RunReport {
            inventory,
            instance,
        })
    }
}

fn observe<T>(step: &'static str, result: Result<T, CommandError>) {
    if let Err(e) = result {
        warn!(step, error = %e, "Package manager call failed, continuing");
    }
}
