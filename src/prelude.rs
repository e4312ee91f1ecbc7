//! Prelude module for convenient imports
//!
//! Re-exports the types needed to configure and execute an integration run.
//!
//! # Example
//!
//! ```rust,no_run
//! use integration_driver::prelude::*;
//!
//! # async fn run_example() -> Result<RunReport> {
//! let config = Config::builder("/src/daisho", "/opt/appmgr/asmcli", "influxdb.tar.gz").build();
//! let runner = CommandRunner::new(ProcessExecutor::new(config.command_timeout()));
//! let report = IntegrationRun::new(&config, &runner).execute().await?;
//! # Ok(report)
//! # }
//! ```

// Running commands
pub use crate::command::{
    CommandExecutor, CommandLine, CommandRunner, ProcessExecutor, RawOutput,
};

// Components
pub use crate::config::{Config, ConfigBuilder, Endpoint};
pub use crate::deploy::{DeploymentDriver, DeploymentState};
pub use crate::inventory::{InventoryClient, InventorySeeder, SeedPlan};
pub use crate::package::PackageController;
pub use crate::pipeline::{IntegrationRun, RunReport};

// Entities
pub use crate::model::{
    AppDescriptor, Cluster, ClusterType, DeployedInstance, Inventory, Network, Node,
};

// Error types
pub use crate::error::{CommandError, IntegrationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, IntegrationError>;
