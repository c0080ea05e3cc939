use sitrep_common::network::ipv4::Ipv4Address;
use tracing::{debug, trace};

/// Nameservers and search suffixes taken from a resolver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// IPv4 nameservers in file order. Duplicates are kept.
    pub nameservers: Vec<Ipv4Address>,
    pub search_domains: Vec<String>,
}

/// Parses `resolv.conf` style text.
///
/// Only the first value after `nameserver` or `search` is used. Lines with
/// fewer than two fields, comments, unknown keywords and nameservers that
/// are not IPv4 addresses are skipped.
pub fn parse_resolver_config(text: &str) -> ResolverConfig {
    let mut config = ResolverConfig::default();

    for line in text.lines() {
        let mut fields = line.split_whitespace();
        let (Some(keyword), Some(value)) = (fields.next(), fields.next()) else {
            continue;
        };

        match keyword {
            "nameserver" => match Ipv4Address::parse(value) {
                Some(addr) => config.nameservers.push(addr),
                None => trace!("ignoring nameserver {value}"),
            },
            "search" => config.search_domains.push(value.to_string()),
            _ => {}
        }
    }

    debug!(
        nameservers = config.nameservers.len(),
        domains = ?config.search_domains,
        "parsed resolver configuration"
    );
    config
}
