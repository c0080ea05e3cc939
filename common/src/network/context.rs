use super::ipv4::Ipv4Address;

/// Addressing facts about the interface discovery runs from.
///
/// Supplied by a [`SystemRepository`](crate::system::SystemRepository);
/// the discovery pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkContext {
    pub interface: String,
    pub local_address: Ipv4Address,
    pub netmask: Ipv4Address,
    pub cidr: u8,
    pub network_address: Ipv4Address,
    /// Default IPv4 gateway, if the routing table has one.
    pub gateway: Option<Ipv4Address>,
    /// Public address as seen from the internet, if it could be looked up.
    pub external_address: Option<Ipv4Address>,
}

impl NetworkContext {
    /// The local subnet in compressed `network/prefix` notation, e.g. `10.0.0.0/24`.
    pub fn subnet(&self) -> String {
        format!("{}/{}", self.network_address, self.cidr)
    }
}
