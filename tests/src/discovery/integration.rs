use sitrep_core::controllers::DomainControllers;
use sitrep_core::discovery::{DiscoveryService, Stage};

use crate::stubs::{ARP, NETBIOS, PING, StubRunner, StubSystem, ip};

const SRV_CORP_LOCAL: &str = "nslookup -type=srv _ldap._tcp.dc._msdcs.corp.local";

fn service(system: StubSystem, runner: &StubRunner) -> DiscoveryService {
    DiscoveryService::new(Box::new(system), Box::new(runner.clone()))
}

/// Three techniques that each see part of the network end up as one inventory.
#[tokio::test]
async fn merges_overlapping_scans() {
    let runner = StubRunner::default()
        .answer(PING, "Nmap scan report for 10.0.0.1\nHost is up.\n")
        .answer(NETBIOS, "10.0.0.2  WKS01  <server>  <unknown>  00:11:22:33:44:55\n")
        .answer(ARP, "10.0.0.1\t3c:37:86:11:22:33\n");
    let mut service = service(StubSystem::with_resolv_conf("search corp\n"), &runner);

    let report = service.perform_discovery(Some("eth0")).await.unwrap();

    assert_eq!(service.stage(), Stage::Finalized);
    assert_eq!(
        report.hosts.iter().copied().collect::<Vec<_>>(),
        vec![ip("10.0.0.1"), ip("10.0.0.2")]
    );
    assert_eq!(report.audit.len(), 3 + 3);
    assert_eq!(report.hosts_artifact(), "10.0.0.1\n10.0.0.2\n");
}

#[tokio::test]
async fn audit_log_follows_issue_order() {
    let runner = StubRunner::default();
    let mut service = service(StubSystem::with_resolv_conf("search corp\n"), &runner);

    let report = service.perform_discovery(None).await.unwrap();

    let expected = [
        "nslookup -type=srv _ldap._tcp.dc._msdcs.corp",
        "nslookup -type=srv _ldap._tcp.dc._msdcs.corp.com",
        SRV_CORP_LOCAL,
        PING,
        NETBIOS,
        ARP,
    ];
    let audited: Vec<&str> = report.audit.iter().map(|r| r.as_str()).collect();
    assert_eq!(audited, expected);
    assert_eq!(*runner.calls.lock().unwrap(), expected);
    assert_eq!(report.audit_artifact(), expected.join("\n") + "\n");
}

/// Every tool failing still yields a complete, empty report.
#[tokio::test]
async fn all_tools_failing_is_not_fatal() {
    let runner = StubRunner::default();
    let mut service = service(StubSystem::with_resolv_conf("search corp\nsearch lab\n"), &runner);

    let report = service.perform_discovery(Some("eth0")).await.unwrap();

    assert_eq!(service.stage(), Stage::Finalized);
    assert!(report.hosts.is_empty());
    assert_eq!(report.hosts_artifact(), "");
    assert_eq!(report.domain_controllers, DomainControllers::NoneFound);
    assert_eq!(report.controllers_artifact(), "No Domain Controllers found.\n");
    assert_eq!(report.audit.len(), 3 * 2 + 3);
}

#[tokio::test]
async fn missing_interface_halts_before_any_command() {
    let runner = StubRunner::default().answer(PING, "Nmap scan report for 10.0.0.1\n");
    let system = StubSystem {
        context: None,
        resolv_conf: Some("search corp\n".into()),
    };
    let mut service = service(system, &runner);

    let err = service.perform_discovery(Some("eth9")).await.unwrap_err();

    assert_eq!(err.to_string(), "no such interface: eth9");
    assert_eq!(service.stage(), Stage::Init);
    assert!(runner.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unreadable_resolver_config_skips_controller_lookups() {
    let runner = StubRunner::default().answer(ARP, "10.0.0.7\taa:bb:cc:dd:ee:ff\n");
    let system = StubSystem {
        resolv_conf: None,
        ..StubSystem::with_resolv_conf("")
    };
    let mut service = service(system, &runner);

    let report = service.perform_discovery(None).await.unwrap();

    assert!(report.resolver.search_domains.is_empty());
    assert_eq!(report.audit.len(), 3);
    assert_eq!(report.hosts.len(), 1);
    assert!(report.hosts.contains(&ip("10.0.0.7")));
}

#[tokio::test]
async fn reports_controllers_and_nameservers() {
    let srv_answer = "\
Server:\t\t10.0.0.53
Address:\t10.0.0.53#53

_ldap._tcp.dc._msdcs.corp.local\tservice = 0 100 389 dc01.corp.local.
";
    let runner = StubRunner::default().answer(SRV_CORP_LOCAL, srv_answer);
    let system = StubSystem::with_resolv_conf(
        "# generated by NetworkManager\nsearch corp\nnameserver 10.0.0.53\nnameserver ::1\n",
    );
    let mut service = service(system, &runner);

    let report = service.perform_discovery(None).await.unwrap();

    assert_eq!(report.resolver.nameservers, vec![ip("10.0.0.53")]);
    assert_eq!(report.domain_controllers.hostnames(), ["dc01.corp.local"]);
    assert_eq!(report.controllers_artifact(), "dc01.corp.local\n");
    assert_eq!(report.context.subnet(), "10.0.0.0/24");
}

/// A second run on the same service starts over instead of accumulating.
#[tokio::test]
async fn reruns_start_from_scratch() {
    let runner = StubRunner::default().answer(PING, "Nmap scan report for 10.0.0.1\n");
    let mut service = service(StubSystem::with_resolv_conf(""), &runner);

    let first = service.perform_discovery(None).await.unwrap();
    let second = service.perform_discovery(None).await.unwrap();

    assert_eq!(first.audit.len(), 3);
    assert_eq!(second.audit.len(), 3);
    assert_eq!(first.hosts, second.hosts);
}
