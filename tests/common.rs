//! Common test utilities: a scripted command executor and fixture builders.
use integration_driver::prelude::*;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

/// Canned reply for a scripted command.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Reply {
    Output(RawOutput),
    SpawnFailure,
}

struct Rule {
    tokens: Vec<String>,
    replies: VecDeque<Reply>,
}

/// A `CommandExecutor` that answers from queued replies and records every call.
///
/// Replies are matched by a token sequence that must appear in the command's
/// arguments. Queued replies are handed out in order and the last one is
/// repeated once the queue runs dry. Unmatched commands print nothing.
pub struct ScriptedExecutor {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<CommandLine>>,
}

#[allow(dead_code)]
impl ScriptedExecutor {
    pub fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(self, tokens: &[&str], reply: Reply) -> Self {
        {
            let mut rules = self.rules.lock().unwrap();
            match rules.iter_mut().find(|rule| rule.tokens == tokens) {
                Some(rule) => rule.replies.push_back(reply),
                None => rules.push(Rule {
                    tokens: tokens.iter().map(|t| t.to_string()).collect(),
                    replies: VecDeque::from([reply]),
                }),
            }
        }
        self
    }

    pub fn json(self, tokens: &[&str], value: Value) -> Self {
        self.reply(tokens, Reply::Output(RawOutput::stdout(value.to_string())))
    }

    pub fn text(self, tokens: &[&str], text: &str) -> Self {
        self.reply(tokens, Reply::Output(RawOutput::stdout(text)))
    }

    pub fn error(self, tokens: &[&str], stderr: &str) -> Self {
        self.reply(tokens, Reply::Output(RawOutput::stderr(stderr)))
    }

    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_matching(&self, tokens: &[&str]) -> Vec<CommandLine> {
        self.calls()
            .into_iter()
            .filter(|call| call.contains_sequence(tokens))
            .collect()
    }

    /// Index of the first call containing `tokens`.
    pub fn position(&self, tokens: &[&str]) -> Option<usize> {
        self.calls()
            .iter()
            .position(|call| call.contains_sequence(tokens))
    }
}

impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, command: &CommandLine) -> std::result::Result<RawOutput, CommandError> {
        self.calls.lock().unwrap().push(command.clone());

        let mut rules = self.rules.lock().unwrap();
        let reply = rules
            .iter_mut()
            .find(|rule| {
                let tokens: Vec<&str> = rule.tokens.iter().map(String::as_str).collect();
                command.contains_sequence(&tokens)
            })
            .and_then(|rule| {
                if rule.replies.len() > 1 {
                    rule.replies.pop_front()
                } else {
                    rule.replies.front().cloned()
                }
            });

        match reply {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::SpawnFailure) => Err(CommandError::Spawn {
                program: command.program().display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            }),
            None => Ok(RawOutput::default()),
        }
    }
}

/// Configuration pointing at fake client locations.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config::builder("/work/daisho", "/work/appmgr/asmcli", "/work/influxdb.tar.gz").build()
}

#[allow(dead_code)]
pub fn quiet_runner(executor: ScriptedExecutor) -> CommandRunner<ScriptedExecutor> {
    CommandRunner::new(executor).with_echo(false)
}

/// Private addresses the default seed plan registers, in node order.
#[allow(dead_code)]
pub const NODE_IPS: [&str; 4] = ["172.28.128.4", "172.28.128.5", "172.28.128.6", "172.28.128.6"];

/// Stubs for the complete happy path: network `net1`, clusters `c1..c4`,
/// nodes `n1..n4`, descriptor `d1` and deployed instance `inst1`.
#[allow(dead_code)]
pub fn happy_path_executor() -> ScriptedExecutor {
    with_happy_path_rules(ScriptedExecutor::new())
}

/// Queues the happy path replies behind whatever `executor` already holds, so
/// a reply registered first for the same tokens is served first.
#[allow(dead_code)]
pub fn with_happy_path_rules(executor: ScriptedExecutor) -> ScriptedExecutor {
    let types = ["cloud", "gateway", "edge", "edge"];
    let mut executor = executor
        .text(&["package", "upload"], "Package uploaded\n")
        .text(&["manifest", "list"], "influxdb 0.2.1\n")
        .text(&["app", "stop"], "Stopped influxdb\n")
        .json(&["network", "add"], json!({"id": "net1", "name": "network1"}));

    for (i, cluster_type) in types.iter().enumerate() {
        let id = format!("c{}", i + 1);
        executor = executor
            .json(
                &["cluster", "add"],
                json!({"id": id, "name": format!("cluster{}", i + 1), "type": cluster_type, "status": "CREATED"}),
            )
            .json(
                &["cluster", "update"],
                json!({"id": id, "name": format!("cluster{}", i + 1), "type": cluster_type, "status": "DEPLOYED"}),
            );
    }
    for i in 1..=4 {
        executor = executor.json(
            &["node", "add"],
            json!({
                "networkId": "net1", "clusterId": format!("c{}", i), "id": format!("n{}", i),
                "name": format!("node{}", i), "privateIP": NODE_IPS[i - 1], "publicIP": "0.0.0.0",
                "username": "user", "installed": true
            }),
        );
    }

    executor
        .json(
            &["application", "descriptor", "add"],
            json!({
                "networkId": "net1", "id": "d1", "label": "influxdb", "name": "influxdb",
                "serviceName": "", "serviceVersion": "0.2.1", "port": 8888
            }),
        )
        .json(
            &["orchestrator", "deploy"],
            json!({"deployedId": "inst1", "networkId": "net1"}),
        )
        .text(&["orchestrator", "undeploy"], "Application undeployed\n")
        .text(&["app", "list"], "influxdb RUNNING\n")
}

/// A seeded inventory as the happy path produces it.
#[allow(dead_code)]
pub fn sample_inventory() -> Inventory {
    let clusters = (1..=4)
        .map(|i| Cluster {
            id: format!("c{}", i),
            network_id: "net1".to_string(),
            name: format!("cluster{}", i),
            cluster_type: None,
            status: Some("DEPLOYED".to_string()),
        })
        .collect();
    let nodes = (1..=4)
        .map(|i| Node {
            id: format!("n{}", i),
            network_id: "net1".to_string(),
            cluster_id: format!("c{}", i),
            name: format!("node{}", i),
            ip: NODE_IPS[i - 1].to_string(),
            public_ip: "0.0.0.0".to_string(),
            username: "user".to_string(),
            installed: true,
        })
        .collect();

    Inventory {
        network: Network {
            id: "net1".to_string(),
            name: "network1".to_string(),
        },
        clusters,
        nodes,
        descriptor: AppDescriptor {
            id: "d1".to_string(),
            label: "influxdb".to_string(),
            name: "influxdb".to_string(),
            service_name: String::new(),
            version: "0.2.1".to_string(),
            target_cluster_type: None,
            port: Some(8888),
        },
    }
}
