use async_trait::async_trait;

use crate::error::ContextError;
use crate::network::context::NetworkContext;

/// Read-only facts about the host the pipeline runs on.
#[async_trait]
pub trait SystemRepository: Send + Sync {
    /// Resolves addressing for `interface`, or for the best candidate when `None`.
    async fn network_context(&self, interface: Option<&str>) -> Result<NetworkContext, ContextError>;

    /// Raw text of the resolver configuration (`nameserver`/`search` lines).
    async fn resolver_config(&self) -> anyhow::Result<String>;
}
