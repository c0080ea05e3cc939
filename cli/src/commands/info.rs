use anyhow::Context;
use sitrep_common::config::Config;
use sitrep_common::network::context::NetworkContext;
use sitrep_common::network::ipv4::Ipv4Address;
use sitrep_common::system::SystemRepository;
use sitrep_core::resolv::{self, ResolverConfig};
use sitrep_core::system::SystemRepo;
use tracing::warn;

use crate::terminal::print;

const NOT_FOUND: &str = "not found";

pub async fn info(cfg: &Config) -> anyhow::Result<()> {
    let system = SystemRepo::new(cfg);
    let context = system
        .network_context(cfg.interface.as_deref())
        .await
        .context("resolving the local network context")?;

    let resolver = match system.resolver_config().await {
        Ok(text) => resolv::parse_resolver_config(&text),
        Err(e) => {
            warn!("{e:#}");
            ResolverConfig::default()
        }
    };

    print_context(&context, &resolver);
    print::end_of_program();
    Ok(())
}

/// Key/value overview of the interface and resolver configuration.
pub fn print_context(context: &NetworkContext, resolver: &ResolverConfig) {
    print::aligned_line("Interface", context.interface.as_str());
    print::aligned_line("IP Address", context.local_address.to_string());
    print::aligned_line("Net Mask", context.netmask.to_string());
    print::aligned_line("CIDR", context.cidr.to_string());
    print::aligned_line("Network Address", context.network_address.to_string());
    print::aligned_line("Gateway IP", or_not_found(context.gateway));
    print::aligned_line("External IP", or_not_found(context.external_address));
    print::aligned_line("DNS Servers", joined(&resolver.nameservers));
    print::aligned_line("Domain Names", joined(&resolver.search_domains));
}

fn or_not_found(addr: Option<Ipv4Address>) -> String {
    addr.map_or_else(|| NOT_FOUND.to_string(), |a| a.to_string())
}

fn joined<T: ToString>(items: &[T]) -> String {
    if items.is_empty() {
        return NOT_FOUND.to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}
