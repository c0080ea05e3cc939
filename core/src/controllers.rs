//! Domain controller discovery through `_ldap` SRV lookups.

use std::fmt;

use sitrep_common::audit::CommandRecord;
use sitrep_common::exec::{CommandRunner, CommandSpec};
use tracing::{Instrument, debug, info_span};

/// Suffixes tried after every search domain, in order.
pub const SRV_SUFFIXES: [&str; 3] = ["", ".com", ".local"];

const SRV_SERVICE: &str = "_ldap._tcp.dc._msdcs";
const ANSWER_PREFIX: &str = "_ldap";
const HOSTNAME_FIELD: usize = 6;
const NONE_FOUND: &str = "No Domain Controllers found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainControllers {
    /// Hostnames in lookup order. The same controller may appear more than once.
    Found(Vec<String>),
    NoneFound,
}

impl DomainControllers {
    fn from_hostnames(hostnames: Vec<String>) -> Self {
        if hostnames.is_empty() {
            Self::NoneFound
        } else {
            Self::Found(hostnames)
        }
    }

    pub fn hostnames(&self) -> &[String] {
        match self {
            Self::Found(hostnames) => hostnames,
            Self::NoneFound => &[],
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// One hostname per line, or the single "none found" line.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Found(hostnames) => hostnames.iter().map(String::as_str).collect(),
            Self::NoneFound => vec![NONE_FOUND],
        }
    }

    pub fn to_artifact(&self) -> String {
        sitrep_common::lines_artifact(self.lines())
    }
}

impl fmt::Display for DomainControllers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join(", "))
    }
}

/// Outcome of [`resolve_domain_controllers`].
#[derive(Debug)]
pub struct ControllerLookup {
    pub controllers: DomainControllers,
    /// Every lookup command, in issue order, including the ones that failed.
    pub issued: Vec<CommandRecord>,
}

pub fn srv_lookup_command(domain: &str, suffix: &str) -> CommandSpec {
    CommandSpec::new("nslookup")
        .arg("-type=srv")
        .arg(format!("{SRV_SERVICE}.{domain}{suffix}"))
}

/// Looks up domain controllers for every search domain and suffix.
///
/// A failed lookup counts as an empty answer. Results follow domain order,
/// then suffix order, then answer order.
pub async fn resolve_domain_controllers(
    domains: &[String],
    runner: &dyn CommandRunner,
) -> ControllerLookup {
    let mut hostnames: Vec<String> = Vec::new();
    let mut issued: Vec<CommandRecord> = Vec::with_capacity(domains.len() * SRV_SUFFIXES.len());

    for domain in domains {
        for suffix in SRV_SUFFIXES {
            let command = srv_lookup_command(domain, suffix);
            issued.push(command.record());

            let span = info_span!("srv_lookup", domain = %format!("{domain}{suffix}"));
            match runner.run(&command).instrument(span).await {
                Ok(output) => hostnames.extend(parse_srv_answers(&output)),
                // Most suffixes are expected to miss.
                Err(e) => debug!("SRV lookup gave no answer: {e}"),
            }
        }
    }

    debug!("Domain controllers: {}", hostnames.join(", "));
    ControllerLookup {
        controllers: DomainControllers::from_hostnames(hostnames),
        issued,
    }
}

/// Controller hostnames from `nslookup -type=srv` output.
///
/// Answer lines look like
/// `_ldap._tcp.dc._msdcs.corp.local  service = 0 100 389 dc01.corp.local.`
pub fn parse_srv_answers(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.starts_with(ANSWER_PREFIX))
        .filter_map(|line| line.split_whitespace().nth(HOSTNAME_FIELD))
        .map(|host| host.strip_suffix('.').unwrap_or(host).to_string())
        .collect()
}
