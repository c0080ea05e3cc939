use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use sitrep_core::discovery::{DiscoveryReport, DiscoveryService};
use sitrep_core::exec::ProcessRunner;
use sitrep_core::system::SystemRepo;
use tracing::{Instrument, info, info_span};

use crate::commands::{DiscoverArgs, info::print_context};
use crate::terminal::{colors, print};

const HOSTS_FILE: &str = "hosts.txt";
const COMMANDS_FILE: &str = "commands.txt";
const CONTROLLERS_FILE: &str = "dcs.txt";

pub async fn discover(args: &DiscoverArgs) -> anyhow::Result<()> {
    let cfg = args.config();
    let mut service = DiscoveryService::new(
        Box::new(SystemRepo::new(&cfg)),
        Box::new(ProcessRunner::new(cfg.tool_timeout)),
    );

    let start_time: Instant = Instant::now();
    let report: DiscoveryReport = service
        .perform_discovery(cfg.interface.as_deref())
        .instrument(info_span!("discovery"))
        .await
        .context("discovery aborted")?;

    discovery_ends(&report, &args.output, start_time.elapsed());
    write_artifacts(&report, &args.output)
}

fn discovery_ends(report: &DiscoveryReport, output: &Path, total_time: Duration) {
    print::header("situational report");
    print_context(&report.context, &report.resolver);
    print::aligned_line("Domain Controllers", report.domain_controllers.to_string());
    print::aligned_line(
        "Hosts File",
        output.join(HOSTS_FILE).display().to_string(),
    );

    if report.hosts.is_empty() {
        print::header("zero hosts detected");
        print::no_results();
    }

    let active_hosts: ColoredString = format!("{} active hosts", report.hosts.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let summary: ColoredString =
        format!("Discovery Complete: {active_hosts} identified in {total_time}")
            .color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(&summary.to_string());
}

fn write_artifacts(report: &DiscoveryReport, output: &Path) -> anyhow::Result<()> {
    write_artifact(&output.join(HOSTS_FILE), &report.hosts_artifact())?;
    write_artifact(&output.join(COMMANDS_FILE), &report.audit_artifact())?;
    if report.domain_controllers.is_found() {
        write_artifact(&output.join(CONTROLLERS_FILE), &report.controllers_artifact())?;
    }
    Ok(())
}

fn write_artifact(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use sitrep_common::audit::{CommandAuditLog, CommandRecord};
    use sitrep_common::network::context::NetworkContext;
    use sitrep_common::network::ipv4::Ipv4Address;
    use sitrep_core::controllers::DomainControllers;
    use sitrep_core::inventory::HostSet;
    use sitrep_core::resolv::ResolverConfig;

    use super::*;

    fn ip(s: &str) -> Ipv4Address {
        Ipv4Address::parse(s).unwrap()
    }

    fn report(hosts: &[&str], controllers: DomainControllers) -> DiscoveryReport {
        let mut audit = CommandAuditLog::new();
        audit.record(CommandRecord::new("nmap -sn -PS -n 10.0.0.0/24"));
        audit.record(CommandRecord::new("nbtscan -q 10.0.0.0/24"));

        DiscoveryReport {
            context: NetworkContext {
                interface: "eth0".into(),
                local_address: ip("10.0.0.50"),
                netmask: ip("255.255.255.0"),
                cidr: 24,
                network_address: ip("10.0.0.0"),
                gateway: None,
                external_address: None,
            },
            resolver: ResolverConfig::default(),
            domain_controllers: controllers,
            hosts: hosts.iter().map(|h| ip(h)).collect::<HostSet>(),
            audit,
        }
    }

    fn output_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sitrep-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn read(dir: &Path, file: &str) -> String {
        std::fs::read_to_string(dir.join(file)).unwrap()
    }

    #[test]
    fn skips_dcs_file_without_controllers() {
        let dir = output_dir("no-dcs");

        write_artifacts(&report(&[], DomainControllers::NoneFound), &dir).unwrap();

        assert!(!dir.join(CONTROLLERS_FILE).exists());
        assert_eq!(read(&dir, HOSTS_FILE), "");
        assert_eq!(
            read(&dir, COMMANDS_FILE),
            "nmap -sn -PS -n 10.0.0.0/24\nnbtscan -q 10.0.0.0/24\n"
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn writes_every_file_with_controllers() {
        let dir = output_dir("dcs");
        let controllers = DomainControllers::Found(vec![
            "dc01.corp.local".to_string(),
            "dc01.corp.local".to_string(),
        ]);

        write_artifacts(&report(&["10.0.0.10", "10.0.0.9"], controllers), &dir).unwrap();

        assert_eq!(read(&dir, HOSTS_FILE), "10.0.0.9\n10.0.0.10\n");
        assert_eq!(
            read(&dir, COMMANDS_FILE),
            "nmap -sn -PS -n 10.0.0.0/24\nnbtscan -q 10.0.0.0/24\n"
        );
        assert_eq!(read(&dir, CONTROLLERS_FILE), "dc01.corp.local\ndc01.corp.local\n");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_output_dir_is_an_error() {
        let dir = std::env::temp_dir().join("sitrep-does-not-exist").join("nested");
        let err = write_artifacts(&report(&[], DomainControllers::NoneFound), &dir).unwrap_err();
        assert!(err.to_string().starts_with("writing "));
    }
}
