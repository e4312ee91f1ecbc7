//! Inventory (system model) service client and the seeder that loads the
//! reference data a deployment needs.

pub mod plan;

pub use plan::{ClusterSpec, DEPLOYED_STATUS, DescriptorSpec, NodeSpec, SeedPlan};

use crate::command::{CommandExecutor, CommandLine, CommandRunner};
use crate::config::{Config, Endpoint};
use crate::error::IntegrationError;
use crate::model::{AppDescriptor, Cluster, ClusterType, Inventory, Network, Node};
use std::path::PathBuf;
use tracing::info;

/// Thin wrapper over the inventory CLI. Each call returns the entity the
/// service printed.
pub struct InventoryClient<'a, E> {
    runner: &'a CommandRunner<E>,
    cli: PathBuf,
    endpoint: Endpoint,
}

impl<'a, E: CommandExecutor> InventoryClient<'a, E> {
    pub fn new(runner: &'a CommandRunner<E>, cli: impl Into<PathBuf>, endpoint: Endpoint) -> Self {
        Self {
            runner,
            cli: cli.into(),
            endpoint,
        }
    }

    pub fn from_config(runner: &'a CommandRunner<E>, config: &Config) -> Self {
        Self::new(runner, config.inventory_cli(), config.inventory().clone())
    }

    fn command<'s>(&self, args: impl IntoIterator<Item = &'s str>) -> CommandLine {
        CommandLine::new(&self.cli)
            .args(self.endpoint.to_args())
            .args(args)
    }

    pub async fn add_network(&self, name: &str) -> Result<Network, IntegrationError> {
        let command = self.command(["network", "add", name]);
        self.runner.run_as(&command, "network").await
    }

    pub async fn add_cluster(
        &self,
        network_id: &str,
        name: &str,
        cluster_type: ClusterType,
    ) -> Result<Cluster, IntegrationError> {
        let command = self.command([
            "cluster",
            "add",
            network_id,
            name,
            cluster_type.as_str(),
        ]);
        self.runner.run_as(&command, "cluster").await
    }

    pub async fn update_cluster(
        &self,
        network_id: &str,
        cluster_id: &str,
        status: &str,
        cluster_type: ClusterType,
    ) -> Result<Cluster, IntegrationError> {
        let status = format!("--status={}", status);
        let cluster_type = format!("--type={}", cluster_type);
        let command = self.command([
            "cluster",
            "update",
            status.as_str(),
            cluster_type.as_str(),
            network_id,
            cluster_id,
        ]);
        self.runner.run_as(&command, "cluster").await
    }

    pub async fn add_node(
        &self,
        network_id: &str,
        cluster_id: &str,
        node: &NodeSpec,
    ) -> Result<Node, IntegrationError> {
        let mut command = self.command([
            "node",
            "add",
            network_id,
            cluster_id,
            node.name.as_str(),
            node.ip.as_str(),
            node.public_ip.as_str(),
            node.username.as_str(),
        ]);
        if node.installed {
            command = command.arg("--installed");
        }
        self.runner.run_as(&command, "node").await
    }

    pub async fn add_descriptor(
        &self,
        network_id: &str,
        descriptor: &DescriptorSpec,
    ) -> Result<AppDescriptor, IntegrationError> {
        let port = descriptor.port.to_string();
        let command = self.command([
            "application",
            "descriptor",
            "add",
            network_id,
            descriptor.label.as_str(),
            descriptor.name.as_str(),
            descriptor.version.as_str(),
            descriptor.cluster_type.as_str(),
            port.as_str(),
        ]);
        self.runner.run_as(&command, "descriptor").await
    }
}

/// Loads a [`SeedPlan`] into the inventory service.
///
/// Calls are made strictly in order and every identifier comes from the
/// response of the call that created the entity. The first failure stops the
/// sequence; entities created before it are left in place.
pub struct InventorySeeder<'a, E> {
    client: InventoryClient<'a, E>,
    plan: &'a SeedPlan,
}

impl<'a, E: CommandExecutor> InventorySeeder<'a, E> {
    pub fn new(client: InventoryClient<'a, E>, plan: &'a SeedPlan) -> Self {
        Self { client, plan }
    }

    pub async fn seed(&self) -> Result<Inventory, IntegrationError> {
        info!("Initialize system model");

        info!(name = %self.plan.network_name, "Create initial network");
        let network = self.client.add_network(&self.plan.network_name).await?;

        info!(count = self.plan.clusters.len(), "Create clusters");
        let mut clusters = Vec::with_capacity(self.plan.clusters.len());
        for spec in &self.plan.clusters {
            let created = self
                .client
                .add_cluster(&network.id, &spec.name, spec.cluster_type)
                .await?;
            let updated = self
                .client
                .update_cluster(
                    &network.id,
                    &created.id,
                    &self.plan.cluster_status,
                    spec.cluster_type,
                )
                .await?;
            clusters.push(updated);
        }

        info!("Add nodes");
        let mut nodes = Vec::with_capacity(self.plan.clusters.len());
        for (spec, cluster) in self.plan.clusters.iter().zip(&clusters) {
            let node = self
                .client
                .add_node(&network.id, &cluster.id, &spec.node)
                .await?;
            nodes.push(node);
        }

        info!(label = %self.plan.descriptor.label, "Add descriptor");
        let descriptor = self
            .client
            .add_descriptor(&network.id, &self.plan.descriptor)
            .await?;

        info!("Done");
        Ok(Inventory {
            network,
            clusters,
            nodes,
            descriptor,
        })
    }
}
