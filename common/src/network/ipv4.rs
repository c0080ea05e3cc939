use std::fmt;
use std::net::{AddrParseError, Ipv4Addr};
use std::str::FromStr;

/// An IPv4 address in dotted-quad form.
///
/// Scanner tokens only become an `Ipv4Address` through [`Ipv4Address::parse`],
/// which rejects partial addresses (`1.2.3`), out of range octets and any
/// surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv4Address(Ipv4Addr);

impl Ipv4Address {
    pub fn parse(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

/// Returns `true` when `token` is exactly a dotted-quad IPv4 address.
pub fn is_valid_ipv4(token: &str) -> bool {
    Ipv4Address::parse(token).is_some()
}

impl FromStr for Ipv4Address {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4Addr::from_str(s).map(Self)
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr)
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
