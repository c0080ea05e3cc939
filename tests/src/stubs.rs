use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sitrep_common::error::{ContextError, ToolError};
use sitrep_common::exec::{CommandRunner, CommandSpec};
use sitrep_common::network::context::NetworkContext;
use sitrep_common::network::ipv4::Ipv4Address;
use sitrep_common::system::SystemRepository;

pub const PING: &str = "nmap -sn -PS -n 10.0.0.0/24";
pub const NETBIOS: &str = "nbtscan -q 10.0.0.0/24";
pub const ARP: &str = "arp-scan -q -I eth0 --localnet";

pub fn ip(s: &str) -> Ipv4Address {
    Ipv4Address::parse(s).unwrap()
}

pub fn context() -> NetworkContext {
    NetworkContext {
        interface: "eth0".into(),
        local_address: ip("10.0.0.50"),
        netmask: ip("255.255.255.0"),
        cidr: 24,
        network_address: ip("10.0.0.0"),
        gateway: Some(ip("10.0.0.1")),
        external_address: Some(ip("203.0.113.7")),
    }
}

/// A host whose interface either exists or does not.
pub struct StubSystem {
    pub context: Option<NetworkContext>,
    pub resolv_conf: Option<String>,
}

impl StubSystem {
    pub fn with_resolv_conf(resolv_conf: &str) -> Self {
        Self {
            context: Some(context()),
            resolv_conf: Some(resolv_conf.to_string()),
        }
    }
}

#[async_trait]
impl SystemRepository for StubSystem {
    async fn network_context(&self, interface: Option<&str>) -> Result<NetworkContext, ContextError> {
        self.context
            .clone()
            .ok_or_else(|| ContextError::NoSuchInterface(interface.unwrap_or("eth0").to_string()))
    }

    async fn resolver_config(&self) -> anyhow::Result<String> {
        self.resolv_conf
            .clone()
            .ok_or_else(|| anyhow::anyhow!("resolv.conf missing"))
    }
}

/// Replays canned stdout per command line and remembers every call.
///
/// Commands without an answer time out.
#[derive(Clone, Default)]
pub struct StubRunner {
    answers: HashMap<String, String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl StubRunner {
    pub fn answer(mut self, command: &str, stdout: &str) -> Self {
        self.answers.insert(command.to_string(), stdout.to_string());
        self
    }
}

#[async_trait]
impl CommandRunner for StubRunner {
    async fn run(&self, command: &CommandSpec) -> Result<String, ToolError> {
        let line = command.to_string();
        self.calls.lock().unwrap().push(line.clone());
        self.answers
            .get(&line)
            .cloned()
            .ok_or(ToolError::Timeout {
                command: line,
                timeout: Duration::from_secs(120),
            })
    }
}
