//! # Network Discovery Service
//!
//! Runs the discovery pipeline: local context, resolver configuration,
//! domain controllers, then the scan techniques in a fixed order. Every
//! external command goes into one audit log.
//!
//! Only a missing local network context is fatal. Every other failure
//! shrinks the result instead of aborting it.

use sitrep_common::audit::CommandAuditLog;
use sitrep_common::error::ContextError;
use sitrep_common::exec::CommandRunner;
use sitrep_common::network::context::NetworkContext;
use sitrep_common::system::SystemRepository;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::controllers::{self, DomainControllers};
use crate::inventory::{HostInventory, HostSet};
use crate::resolv::{self, ResolverConfig};
use crate::scanner::{ArpScan, NetbiosScan, PingSweep, ScanTechnique};

/// Pipeline states, in the only order they are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    ResolvedLocalContext,
    ParsedDnsConfig,
    ResolvedDomainControllers,
    ScannedPing,
    ScannedNetbios,
    ScannedArp,
    Finalized,
}

impl Stage {
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Init => Some(Stage::ResolvedLocalContext),
            Stage::ResolvedLocalContext => Some(Stage::ParsedDnsConfig),
            Stage::ParsedDnsConfig => Some(Stage::ResolvedDomainControllers),
            Stage::ResolvedDomainControllers => Some(Stage::ScannedPing),
            Stage::ScannedPing => Some(Stage::ScannedNetbios),
            Stage::ScannedNetbios => Some(Stage::ScannedArp),
            Stage::ScannedArp => Some(Stage::Finalized),
            Stage::Finalized => None,
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct DiscoveryReport {
    pub context: NetworkContext,
    pub resolver: ResolverConfig,
    pub domain_controllers: DomainControllers,
    pub hosts: HostSet,
    pub audit: CommandAuditLog,
}

impl DiscoveryReport {
    pub fn hosts_artifact(&self) -> String {
        sitrep_common::lines_artifact(&self.hosts)
    }

    pub fn controllers_artifact(&self) -> String {
        self.domain_controllers.to_artifact()
    }

    pub fn audit_artifact(&self) -> String {
        self.audit.to_artifact()
    }
}

pub struct DiscoveryService {
    system: Box<dyn SystemRepository>,
    runner: Box<dyn CommandRunner>,
    stage: Stage,
}

impl DiscoveryService {
    pub fn new(system: Box<dyn SystemRepository>, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            system,
            runner,
            stage: Stage::Init,
        }
    }

    /// The last stage the most recent run completed.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Runs the whole pipeline from `interface` (or the best candidate).
    ///
    /// Fails only when the local network context cannot be resolved; the
    /// service is then left at [`Stage::Init`].
    pub async fn perform_discovery(
        &mut self,
        interface: Option<&str>,
    ) -> Result<DiscoveryReport, ContextError> {
        self.stage = Stage::Init;
        let mut audit = CommandAuditLog::new();

        let context = self.system.network_context(interface).await?;
        debug!(
            "Local address {} on {}, subnet {}",
            context.local_address,
            context.interface,
            context.subnet()
        );
        self.advance(Stage::ResolvedLocalContext);

        let resolver = match self.system.resolver_config().await {
            Ok(text) => resolv::parse_resolver_config(&text),
            Err(e) => {
                warn!("Could not read resolver configuration: {e:#}");
                ResolverConfig::default()
            }
        };
        self.advance(Stage::ParsedDnsConfig);

        info!("Querying the network for domain controllers");
        let lookup =
            controllers::resolve_domain_controllers(&resolver.search_domains, self.runner.as_ref())
                .await;
        audit.extend(lookup.issued);
        self.advance(Stage::ResolvedDomainControllers);

        let mut inventory = HostInventory::new();
        let steps: [(&dyn ScanTechnique, Stage); 3] = [
            (&PingSweep, Stage::ScannedPing),
            (&NetbiosScan, Stage::ScannedNetbios),
            (&ArpScan, Stage::ScannedArp),
        ];
        for (technique, stage) in steps {
            let found = self.scan(technique, &context, &mut audit).await;
            let added = inventory.absorb(found);
            debug!(
                "{} done, {added} new, inventory now holds {} hosts",
                technique.name(),
                inventory.len()
            );
            self.advance(stage);
        }

        self.advance(Stage::Finalized);
        Ok(DiscoveryReport {
            context,
            resolver,
            domain_controllers: lookup.controllers,
            hosts: inventory.into_hosts(),
            audit,
        })
    }

    async fn scan(
        &self,
        technique: &dyn ScanTechnique,
        context: &NetworkContext,
        audit: &mut CommandAuditLog,
    ) -> HostSet {
        let command = technique.command(context);
        audit.record(command.record());

        if technique.requires_root() && !is_root::is_root() {
            warn!("{} needs root privileges, results will likely be empty", technique.name());
        }

        info!("Running {} (`{command}`)", technique.name());
        let span = info_span!("scan", technique = technique.name());
        match self.runner.run(&command).instrument(span).await {
            Ok(output) => technique.parse(&output),
            Err(e) => {
                warn!("{} failed: {e}", technique.name());
                HostSet::new()
            }
        }
    }

    fn advance(&mut self, next: Stage) {
        debug_assert_eq!(self.stage.next(), Some(next), "stages run in order");
        debug!("discovery stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }
}
