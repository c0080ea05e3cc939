use std::collections::BTreeSet;

use sitrep_common::network::ipv4::Ipv4Address;

/// Deduplicated set of discovered hosts, ordered numerically.
pub type HostSet = BTreeSet<Ipv4Address>;

/// Union of `existing` and `discovered`. Never drops an entry.
pub fn merge(mut existing: HostSet, discovered: HostSet) -> HostSet {
    existing.extend(discovered);
    existing
}

/// The running union of hosts across every scan technique of one run.
#[derive(Debug, Default)]
pub struct HostInventory {
    hosts: HostSet,
}

impl HostInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `discovered` in and returns how many hosts were new.
    pub fn absorb(&mut self, discovered: HostSet) -> usize {
        let before = self.hosts.len();
        self.hosts = merge(std::mem::take(&mut self.hosts), discovered);
        self.hosts.len() - before
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn into_hosts(self) -> HostSet {
        self.hosts
    }
}
