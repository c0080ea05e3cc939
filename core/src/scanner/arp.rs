use sitrep_common::exec::CommandSpec;
use sitrep_common::network::context::NetworkContext;

use super::ScanTechnique;
use crate::inventory::HostSet;

/// ARP sweep of the local segment with `arp-scan`.
pub struct ArpScan;

impl ScanTechnique for ArpScan {
    fn name(&self) -> &'static str {
        "arp-scan"
    }

    fn command(&self, ctx: &NetworkContext) -> CommandSpec {
        CommandSpec::new("arp-scan")
            .arg("-q")
            .arg("-I")
            .arg(ctx.interface.as_str())
            .arg("--localnet")
    }

    fn parse(&self, output: &str) -> HostSet {
        super::first_column_addresses(output)
    }

    fn requires_root(&self) -> bool {
        true
    }
}
