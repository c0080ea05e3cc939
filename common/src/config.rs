use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_RESOLV_CONF: &str = "/etc/resolv.conf";
pub const DEFAULT_EXTERNAL_IP_URL: &str = "https://api.ipify.org";
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(120);

pub struct Config {
    /// Interface to discover from.
    ///
    /// `None` lets the system repository pick the best candidate.
    pub interface: Option<String>,
    /// Where the resolver configuration is read from.
    pub resolv_conf: PathBuf,
    /// Upper bound for each external tool invocation.
    pub tool_timeout: Duration,
    /// Look up the public address of this host.
    pub external_ip: bool,
    /// Plain-text endpoint that answers with the caller's IPv4 address.
    pub external_ip_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interface: None,
            resolv_conf: PathBuf::from(DEFAULT_RESOLV_CONF),
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
            external_ip: true,
            external_ip_url: DEFAULT_EXTERNAL_IP_URL.to_string(),
        }
    }
}
