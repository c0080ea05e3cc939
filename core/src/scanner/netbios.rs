use sitrep_common::exec::CommandSpec;
use sitrep_common::network::context::NetworkContext;

use super::ScanTechnique;
use crate::inventory::HostSet;

/// NetBIOS name service sweep with `nbtscan`.
pub struct NetbiosScan;

impl ScanTechnique for NetbiosScan {
    fn name(&self) -> &'static str {
        "nbtscan"
    }

    fn command(&self, ctx: &NetworkContext) -> CommandSpec {
        CommandSpec::new("nbtscan").arg("-q").arg(ctx.subnet())
    }

    fn parse(&self, output: &str) -> HostSet {
        super::first_column_addresses(output)
    }
}
