pub mod discover;
pub mod info;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use sitrep_common::config::{Config, DEFAULT_RESOLV_CONF, DEFAULT_TOOL_TIMEOUT};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "sitrep")]
#[command(about = "Situational awareness for the network you just plugged into.")]
pub struct CommandLine {
    /// Show DEBUG messages
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
    /// Show only ERROR messages
    #[arg(short, long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the local network context and resolver configuration
    #[command(alias = "i")]
    Info(ContextArgs),
    /// Discover hosts and domain controllers on the local network
    #[command(alias = "d")]
    Discover(DiscoverArgs),
}

#[derive(Args)]
pub struct ContextArgs {
    /// Interface to work from [default: best wired/wireless candidate]
    pub interface: Option<String>,
    /// Resolver configuration to read nameservers and search domains from
    #[arg(long, default_value = DEFAULT_RESOLV_CONF)]
    pub resolv_conf: PathBuf,
    /// Skip looking up the external IP address
    #[arg(long)]
    pub no_external_ip: bool,
}

#[derive(Args)]
pub struct DiscoverArgs {
    /// Existing directory that receives hosts.txt, commands.txt and dcs.txt
    #[arg(value_parser = existing_dir)]
    pub output: PathBuf,
    #[command(flatten)]
    pub context: ContextArgs,
    /// Seconds each external tool may run before it is killed
    #[arg(long, default_value_t = DEFAULT_TOOL_TIMEOUT.as_secs())]
    pub timeout: u64,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn log_level(&self) -> LevelFilter {
        match (self.verbose, self.quiet) {
            (true, _) => LevelFilter::DEBUG,
            (_, true) => LevelFilter::ERROR,
            _ => LevelFilter::INFO,
        }
    }
}

impl ContextArgs {
    pub fn config(&self) -> Config {
        Config {
            interface: self.interface.clone(),
            resolv_conf: self.resolv_conf.clone(),
            external_ip: !self.no_external_ip,
            ..Config::default()
        }
    }
}

impl DiscoverArgs {
    pub fn config(&self) -> Config {
        Config {
            tool_timeout: Duration::from_secs(self.timeout),
            ..self.context.config()
        }
    }
}

fn existing_dir(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("{arg} is not an existing directory"))
    }
}
