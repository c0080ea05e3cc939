use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// The local network context could not be resolved. Aborts a discovery run.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no such interface: {0}")]
    NoSuchInterface(String),

    #[error("no usable network interface found")]
    NoUsableInterface,

    #[error("interface {0} has no IPv4 address")]
    NoIpv4Address(String),
}

/// An external tool invocation failed. Absorbed by the caller as empty output.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting on `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` timed out after {}s", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    #[error("`{command}` exited with {status}")]
    NonZeroExit { command: String, status: ExitStatus },
}
