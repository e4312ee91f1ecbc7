use clap::Parser;
use integration_driver::command::pretty_json;
use integration_driver::config::{
    DEFAULT_APPMGR_PORT, DEFAULT_INVENTORY_IP, DEFAULT_INVENTORY_PORT, DEFAULT_ORCHESTRATOR_IP,
    DEFAULT_ORCHESTRATOR_PORT, DEFAULT_STOP_APP_NAME, DEFAULT_TARGET_NODE_IP,
};
use integration_driver::prelude::*;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const LONG_ABOUT: &str = "\
Test the integration between the system model, the conductor and the ASM client.

Loads a set of entries into the system model, uploads an application package to the
target node's application manager and then uses the conductor CLI to deploy and
undeploy the application, listing the node's apps after each step.

Example:

  integration-cli --basedir=$HOME/daisho/src/github.com/daishogroup \\
      --appmgr=$HOME/daisho/appmgr/bazel-bin/asmcli/asmcli \\
      --desc=$HOME/daisho/appdevkit/bazel-bin/packages/influxdb/influxdb-asm-package.tar.gz";

/// Sequential integration driver for the inventory, conductor and application manager CLIs
#[derive(Parser, Debug)]
#[command(version, about, long_about = LONG_ABOUT)]
struct Cli {
    /// Path where the system-model and conductor checkouts are available
    #[arg(long)]
    basedir: PathBuf,

    /// Path of the compiled application manager client
    #[arg(long)]
    appmgr: PathBuf,

    /// Path of the application package to upload
    #[arg(long)]
    desc: PathBuf,

    /// System model IP
    #[arg(long = "sm_ip", default_value = DEFAULT_INVENTORY_IP)]
    sm_ip: String,

    /// System model port
    #[arg(long = "sm_port", default_value_t = DEFAULT_INVENTORY_PORT)]
    sm_port: u16,

    /// Conductor IP
    #[arg(long = "conductor_ip", default_value = DEFAULT_ORCHESTRATOR_IP)]
    conductor_ip: String,

    /// Conductor port
    #[arg(long = "conductor_port", default_value_t = DEFAULT_ORCHESTRATOR_PORT)]
    conductor_port: u16,

    /// IP of the node whose application manager receives the package
    #[arg(long = "node_ip", default_value = DEFAULT_TARGET_NODE_IP)]
    node_ip: String,

    /// Application manager port on the target node
    #[arg(long = "appmgr_port", default_value_t = DEFAULT_APPMGR_PORT)]
    appmgr_port: u16,

    /// Application stopped on the target node before the run starts
    #[arg(long = "app_name", default_value = DEFAULT_STOP_APP_NAME)]
    app_name: String,

    /// Seconds to wait for each external command
    #[arg(long, default_value_t = 180, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Do not echo command lines and their output
    #[arg(short, long)]
    quiet: bool,

    /// Activate debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config::builder(self.basedir, self.appmgr, self.desc)
            .inventory(self.sm_ip, self.sm_port)
            .orchestrator(self.conductor_ip, self.conductor_port)
            .target_node_ip(self.node_ip)
            .appmgr_port(self.appmgr_port)
            .stop_app_name(self.app_name)
            .command_timeout(Duration::from_secs(self.timeout))
            .build()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    println!("{:?}", cli);
    let echo = !cli.quiet;
    let config = cli.into_config();
    println!(
        "System model client located at: {}",
        config.inventory_cli().display()
    );
    println!(
        "Conductor client located at: {}",
        config.orchestrator_cli().display()
    );

    let runner = CommandRunner::new(ProcessExecutor::new(config.command_timeout()))
        .with_echo(echo);

    match IntegrationRun::new(&config, &runner).execute().await {
        Ok(report) => {
            println!("\nIntegration Finished!");
            match serde_json::to_value(&report) {
                Ok(value) => println!("{}", pretty_json(&value)),
                Err(e) => exit_with_error(&format!("Failed to render run report: {}", e)),
            }
        }
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
