use crate::inventory::SeedPlan;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default address of the inventory (system model) service.
pub const DEFAULT_INVENTORY_IP: &str = "127.0.0.1";
pub const DEFAULT_INVENTORY_PORT: u16 = 8800;
/// Default address of the orchestrator (conductor) service.
pub const DEFAULT_ORCHESTRATOR_IP: &str = "127.0.0.1";
pub const DEFAULT_ORCHESTRATOR_PORT: u16 = 9000;
/// Port every application manager listens on.
pub const DEFAULT_APPMGR_PORT: u16 = 30088;
/// Node that receives the package and is queried for running apps.
pub const DEFAULT_TARGET_NODE_IP: &str = "172.28.128.4";
pub const DEFAULT_STOP_APP_NAME: &str = "influxdb";
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(3 * 60);

/// Network location of a remote service, as passed to its CLI client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub ip: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(ip: impl Into<String>, port: u16) -> Self {
        Self {
            ip: ip.into(),
            port,
        }
    }

    /// The `--ip=... --port=...` prefix every client expects.
    pub fn to_args(&self) -> Vec<String> {
        vec![format!("--ip={}", self.ip), format!("--port={}", self.port)]
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

/// Immutable configuration for one integration run.
///
/// Built once at startup through [`Config::builder`] and then borrowed by
/// every component of the run.
#[derive(Debug, Clone)]
pub struct Config {
    basedir: PathBuf,
    appmgr_cli: PathBuf,
    package_path: PathBuf,
    inventory: Endpoint,
    orchestrator: Endpoint,
    target_node: Endpoint,
    stop_app_name: String,
    command_timeout: Duration,
    seed_plan: SeedPlan,
}

impl Config {
    /// Starts a configuration from the three values that have no default.
    pub fn builder(
        basedir: impl Into<PathBuf>,
        appmgr_cli: impl Into<PathBuf>,
        package_path: impl Into<PathBuf>,
    ) -> ConfigBuilder {
        ConfigBuilder::new(basedir.into(), appmgr_cli.into(), package_path.into())
    }

    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    pub fn appmgr_cli(&self) -> &Path {
        &self.appmgr_cli
    }

    pub fn package_path(&self) -> &Path {
        &self.package_path
    }

    pub fn inventory(&self) -> &Endpoint {
        &self.inventory
    }

    pub fn orchestrator(&self) -> &Endpoint {
        &self.orchestrator
    }

    /// Application manager of the node packages are uploaded to.
    pub fn target_node(&self) -> &Endpoint {
        &self.target_node
    }

    pub fn stop_app_name(&self) -> &str {
        &self.stop_app_name
    }

    pub fn command_timeout(&self) -> Duration {
        self.command_timeout
    }

    pub fn seed_plan(&self) -> &SeedPlan {
        &self.seed_plan
    }

    /// Location of the inventory service client inside `basedir`.
    pub fn inventory_cli(&self) -> PathBuf {
        self.basedir
            .join("system-model")
            .join("bazel-bin")
            .join("system-model-cli")
    }

    /// Location of the orchestrator client inside `basedir`.
    pub fn orchestrator_cli(&self) -> PathBuf {
        self.basedir
            .join("conductor")
            .join("bazel-bin")
            .join("conductor-cli")
    }
}

/// Builder for [`Config`]. Every setter is optional.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    fn new(basedir: PathBuf, appmgr_cli: PathBuf, package_path: PathBuf) -> Self {
        Self {
            config: Config {
                basedir,
                appmgr_cli,
                package_path,
                inventory: Endpoint::new(DEFAULT_INVENTORY_IP, DEFAULT_INVENTORY_PORT),
                orchestrator: Endpoint::new(DEFAULT_ORCHESTRATOR_IP, DEFAULT_ORCHESTRATOR_PORT),
                target_node: Endpoint::new(DEFAULT_TARGET_NODE_IP, DEFAULT_APPMGR_PORT),
                stop_app_name: DEFAULT_STOP_APP_NAME.to_string(),
                command_timeout: DEFAULT_COMMAND_TIMEOUT,
                seed_plan: SeedPlan::default(),
            },
        }
    }

    pub fn inventory(mut self, ip: impl Into<String>, port: u16) -> Self {
        self.config.inventory = Endpoint::new(ip, port);
        self
    }

    pub fn orchestrator(mut self, ip: impl Into<String>, port: u16) -> Self {
        self.config.orchestrator = Endpoint::new(ip, port);
        self
    }

    pub fn target_node_ip(mut self, ip: impl Into<String>) -> Self {
        self.config.target_node.ip = ip.into();
        self
    }

    pub fn appmgr_port(mut self, port: u16) -> Self {
        self.config.target_node.port = port;
        self
    }

    pub fn stop_app_name(mut self, name: impl Into<String>) -> Self {
        self.config.stop_app_name = name.into();
        self
    }

    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.config.command_timeout = timeout;
        self
    }

    pub fn seed_plan(mut self, plan: SeedPlan) -> Self {
        self.config.seed_plan = plan;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
