//! Records returned by the inventory service and the orchestrator.
//!
//! Only the identifiers the run threads into later calls are required; every
//! other field defaults so that extra or missing attributes in a client's
//! output never abort the run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of cluster a node or descriptor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterType {
    Cloud,
    Gateway,
    Edge,
}

impl ClusterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterType::Cloud => "cloud",
            ClusterType::Gateway => "gateway",
            ClusterType::Edge => "edge",
        }
    }
}

impl fmt::Display for ClusterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    #[serde(default)]
    pub network_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub cluster_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A node as the inventory service stores it.
///
/// The service reports addresses as `privateIP` and `publicIP`; `ip` is the
/// private address the node was registered with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub network_id: String,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "privateIP", alias = "ip")]
    pub ip: String,
    #[serde(default, rename = "publicIP")]
    pub public_ip: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub installed: bool,
}

/// Metadata of a deployable application.
///
/// The inventory service sends the version as `serviceVersion`. It does not
/// echo the target cluster type back, so `target_cluster_type` is only set by
/// services that do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    pub id: String,
    pub label: String,
    pub name: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default, alias = "serviceVersion")]
    pub version: String,
    #[serde(default, alias = "clusterType", skip_serializing_if = "Option::is_none")]
    pub target_cluster_type: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

/// Runtime instance created by a successful deploy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedInstance {
    pub deployed_id: String,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Everything the seeder created, in creation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inventory {
    pub network: Network,
    pub clusters: Vec<Cluster>,
    pub nodes: Vec<Node>,
    pub descriptor: AppDescriptor,
}
