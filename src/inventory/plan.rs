use crate::model::ClusterType;

/// Status every seeded cluster is moved to after creation.
pub const DEPLOYED_STATUS: &str = "DEPLOYED";

/// Declarative description of the reference data loaded into the inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPlan {
    pub network_name: String,
    pub cluster_status: String,
    pub clusters: Vec<ClusterSpec>,
    pub descriptor: DescriptorSpec,
}

/// A cluster plus the single node registered in it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSpec {
    pub name: String,
    pub cluster_type: ClusterType,
    pub node: NodeSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub name: String,
    pub ip: String,
    pub public_ip: String,
    pub username: String,
    pub installed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorSpec {
    pub label: String,
    pub name: String,
    pub version: String,
    pub cluster_type: ClusterType,
    pub port: u16,
}

impl NodeSpec {
    pub fn installed(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
            public_ip: "0.0.0.0".to_string(),
            username: "user".to_string(),
            installed: true,
        }
    }
}

impl ClusterSpec {
    pub fn new(name: impl Into<String>, cluster_type: ClusterType, node: NodeSpec) -> Self {
        Self {
            name: name.into(),
            cluster_type,
            node,
        }
    }
}

impl Default for SeedPlan {
    /// One cloud, one gateway and two edge clusters on the 172.28.128.0/24
    /// test nodes, plus the influxdb descriptor targeting gateways.
    fn default() -> Self {
        Self {
            network_name: "network1".to_string(),
            cluster_status: DEPLOYED_STATUS.to_string(),
            clusters: vec![
                ClusterSpec::new(
                    "cluster1",
                    ClusterType::Cloud,
                    NodeSpec::installed("node1", "172.28.128.4"),
                ),
                ClusterSpec::new(
                    "cluster2",
                    ClusterType::Gateway,
                    NodeSpec::installed("node2", "172.28.128.5"),
                ),
                ClusterSpec::new(
                    "cluster3",
                    ClusterType::Edge,
                    NodeSpec::installed("node3", "172.28.128.6"),
                ),
                // Shares the third node's address.
                ClusterSpec::new(
                    "cluster4",
                    ClusterType::Edge,
                    NodeSpec::installed("node4", "172.28.128.6"),
                ),
            ],
            descriptor: DescriptorSpec {
                label: "influxdb".to_string(),
                name: "influxdb".to_string(),
                version: "0.2.1".to_string(),
                cluster_type: ClusterType::Gateway,
                port: 8888,
            },
        }
    }
}
