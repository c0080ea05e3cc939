//! Host discovery techniques backed by external scanners.
//!
//! Each [`ScanTechnique`] knows the command line for its tool and the
//! grammar of that tool's output. Running the command is left to a
//! [`CommandRunner`](sitrep_common::exec::CommandRunner), so parsing stays a
//! pure function of the captured text.

use sitrep_common::exec::CommandSpec;
use sitrep_common::network::context::NetworkContext;
use sitrep_common::network::ipv4::Ipv4Address;
use tracing::trace;

use crate::inventory::HostSet;

mod arp;
mod netbios;
mod ping;

pub use arp::ArpScan;
pub use netbios::NetbiosScan;
pub use ping::PingSweep;

pub trait ScanTechnique: Send + Sync {
    /// Human readable name used in logs.
    fn name(&self) -> &'static str;

    /// The command that enumerates hosts on the network described by `ctx`.
    fn command(&self, ctx: &NetworkContext) -> CommandSpec;

    /// Extracts the addresses of discovered hosts from captured stdout.
    ///
    /// Lines that do not fit the grammar are skipped.
    fn parse(&self, output: &str) -> HostSet;

    /// Whether the tool only works with raw socket privileges.
    fn requires_root(&self) -> bool {
        false
    }
}

/// Addresses found in the first column of each line.
///
/// Blank lines and first fields that are not IPv4 addresses (banners,
/// summaries) are skipped.
fn first_column_addresses(output: &str) -> HostSet {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter_map(|token| {
            let addr = Ipv4Address::parse(token);
            if addr.is_none() {
                trace!("skipping token {token:?}");
            }
            addr
        })
        .collect()
}
