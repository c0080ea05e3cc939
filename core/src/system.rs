use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use tracing::{debug, warn};

use sitrep_common::config::Config;
use sitrep_common::error::ContextError;
use sitrep_common::network::context::NetworkContext;
use sitrep_common::network::ipv4::Ipv4Address;
use sitrep_common::system::SystemRepository;

const ROUTE_TABLE: &str = "/proc/net/route";
const EXTERNAL_IP_TIMEOUT: Duration = Duration::from_secs(10);

/// [`SystemRepository`] backed by the running host.
pub struct SystemRepo {
    resolv_conf: PathBuf,
    external_ip_url: Option<String>,
}

impl SystemRepo {
    pub fn new(cfg: &Config) -> Self {
        Self {
            resolv_conf: cfg.resolv_conf.clone(),
            external_ip_url: cfg.external_ip.then(|| cfg.external_ip_url.clone()),
        }
    }

    async fn external_address(&self) -> Option<Ipv4Address> {
        let url = self.external_ip_url.as_deref()?;
        debug!("Getting external IP from {url}");
        match fetch_external_address(url).await {
            Ok(body) => {
                let addr = Ipv4Address::parse(body.trim());
                if addr.is_none() {
                    warn!("{url} answered with something other than an IPv4 address");
                }
                addr
            }
            Err(e) => {
                warn!("External IP lookup failed: {e:#}");
                None
            }
        }
    }
}

#[async_trait]
impl SystemRepository for SystemRepo {
    async fn network_context(&self, interface: Option<&str>) -> Result<NetworkContext, ContextError> {
        let interfaces: Vec<NetworkInterface> = datalink::interfaces();
        let intf: &NetworkInterface = select_interface(&interfaces, interface)?;
        let net: Ipv4Network =
            ipv4_network(intf).ok_or_else(|| ContextError::NoIpv4Address(intf.name.clone()))?;

        let gateway = match tokio::fs::read_to_string(ROUTE_TABLE).await {
            Ok(table) => parse_default_gateway(&table, &intf.name),
            Err(e) => {
                debug!("Cannot read {ROUTE_TABLE}: {e}");
                None
            }
        };

        Ok(NetworkContext {
            interface: intf.name.clone(),
            local_address: net.ip().into(),
            netmask: net.mask().into(),
            cidr: net.prefix(),
            network_address: net.network().into(),
            gateway,
            external_address: self.external_address().await,
        })
    }

    async fn resolver_config(&self) -> anyhow::Result<String> {
        debug!("Reading {} for DNS servers and domains", self.resolv_conf.display());
        tokio::fs::read_to_string(&self.resolv_conf)
            .await
            .with_context(|| format!("reading {}", self.resolv_conf.display()))
    }
}

async fn fetch_external_address(url: &str) -> anyhow::Result<String> {
    let client = reqwest::Client::builder()
        .timeout(EXTERNAL_IP_TIMEOUT)
        .build()?;
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}

/// Picks `name` if given, otherwise the first usable interface with wired
/// (`e*`) names preferred.
pub fn select_interface<'a>(
    interfaces: &'a [NetworkInterface],
    name: Option<&str>,
) -> Result<&'a NetworkInterface, ContextError> {
    match name {
        Some(name) => interfaces
            .iter()
            .find(|intf| intf.name == name)
            .ok_or_else(|| ContextError::NoSuchInterface(name.to_string())),
        None => interfaces
            .iter()
            .filter(|intf| intf.is_up() && !intf.is_loopback() && ipv4_network(intf).is_some())
            .min_by_key(|intf| if intf.name.starts_with('e') { 0 } else { 1 })
            .ok_or(ContextError::NoUsableInterface),
    }
}

fn ipv4_network(intf: &NetworkInterface) -> Option<Ipv4Network> {
    intf.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) => Some(*v4),
        IpNetwork::V6(_) => None,
    })
}

/// Default gateway from the text of `/proc/net/route`.
///
/// Prefers the default route of `interface` and falls back to the first
/// default route of any interface. Addresses are little-endian hex.
pub fn parse_default_gateway(table: &str, interface: &str) -> Option<Ipv4Address> {
    let defaults: Vec<(&str, Ipv4Address)> = table
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [iface, "00000000", gateway, ..] => {
                    let raw = u32::from_str_radix(gateway, 16).ok()?;
                    (raw != 0).then(|| (*iface, Ipv4Address::from(Ipv4Addr::from(raw.to_le_bytes()))))
                }
                _ => None,
            }
        })
        .collect();

    defaults
        .iter()
        .find(|(iface, _)| *iface == interface)
        .or(defaults.first())
        .map(|(_, gateway)| *gateway)
}
