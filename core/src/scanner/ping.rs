use sitrep_common::exec::CommandSpec;
use sitrep_common::network::context::NetworkContext;
use sitrep_common::network::ipv4::Ipv4Address;
use tracing::trace;

use super::ScanTechnique;
use crate::inventory::HostSet;

const REPORT_PREFIX: &str = "Nmap scan";

/// TCP SYN ping sweep of the local subnet with `nmap`, without reverse DNS.
pub struct PingSweep;

impl ScanTechnique for PingSweep {
    fn name(&self) -> &'static str {
        "nmap ping sweep"
    }

    fn command(&self, ctx: &NetworkContext) -> CommandSpec {
        CommandSpec::new("nmap")
            .arg("-sn")
            .arg("-PS")
            .arg("-n")
            .arg(ctx.subnet())
    }

    fn parse(&self, output: &str) -> HostSet {
        output
            .lines()
            .filter(|line| line.starts_with(REPORT_PREFIX))
            .filter_map(report_address)
            .collect()
    }
}

/// Address from a `Nmap scan report for <addr>` line.
///
/// The `for <name> (<addr>)` form nmap prints when names are resolved is
/// accepted too. Anything else is skipped.
fn report_address(line: &str) -> Option<Ipv4Address> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let token = match fields.as_slice() {
        [_, _, _, _, addr] => *addr,
        [_, _, _, _, _name, addr] => addr.strip_prefix('(')?.strip_suffix(')')?,
        _ => {
            trace!("unexpected nmap report line {line:?}");
            return None;
        }
    };
    Ipv4Address::parse(token)
}
