//! # Integration Driver
//!
//! Exercises the integration between the inventory (system model) service,
//! the conductor orchestrator and the per-node application manager by running
//! their command-line clients in a fixed order and threading the JSON they
//! print from one call into the next.
//!
//! ## Run Sequence
//!
//! 1.  **Upload**: push the application package to the target node and list
//!     its manifests.
//! 2.  **Stop**: stop any instance left over from a previous run. Failure is
//!     logged and ignored.
//! 3.  **Seed**: create a network, four clusters (moved to `DEPLOYED`), one
//!     node per cluster and an application descriptor.
//! 4.  **Deploy / Undeploy**: deploy the descriptor through the orchestrator,
//!     list running apps, undeploy the instance and list them again.
//!
//! Every step is awaited to completion before the next one starts, and the
//! first error ends the run. Entities created before the failure are not
//! cleaned up.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integration_driver::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::builder(
//!         "/home/dev/daisho",
//!         "/home/dev/appmgr/bazel-bin/asmcli/asmcli",
//!         "/home/dev/packages/influxdb-asm-package.tar.gz",
//!     )
//!     .inventory("127.0.0.1", 8800)
//!     .orchestrator("127.0.0.1", 9000)
//!     .command_timeout(Duration::from_secs(120))
//!     .build();
//!
//!     let runner = CommandRunner::new(ProcessExecutor::new(config.command_timeout()));
//!     let report = IntegrationRun::new(&config, &runner).execute().await?;
//!
//!     println!("Deployed and removed instance {}", report.instance.deployed_id);
//!     Ok(())
//! }
//! ```
//!
//! Tests swap [`command::ProcessExecutor`] for a scripted
//! [`command::CommandExecutor`] to check the exact calls a run makes.

pub mod command;
pub mod config;
pub mod deploy;
pub mod error;
pub mod inventory;
pub mod model;
pub mod package;
pub mod pipeline;
pub mod prelude;
