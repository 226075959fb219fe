//! DNS existence probing.

use crate::probe::{Outcome, Prober};
use async_trait::async_trait;
use foray_core::Target;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;
use std::net::IpAddr;
use tracing::{instrument, trace};

/// How a name lookup can fail, as far as probe classification cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFault {
    /// The resolver authoritatively answered that the name does not exist
    NoRecords,
    /// The resolver gave up waiting for an answer
    TimedOut,
    /// Transport or server failure
    Fault(String),
}

/// Name resolution capability injected into [`DnsProber`].
///
/// The production implementation is [`SystemResolver`]; tests substitute
/// table-backed ones.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Resolve a name to its addresses
    async fn lookup_ip(&self, name: &str) -> Result<Vec<IpAddr>, LookupFault>;
}

/// Resolver backed by hickory's tokio runtime with default upstream
/// configuration.
#[derive(Clone)]
pub struct SystemResolver {
    resolver: TokioAsyncResolver,
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemResolver {
    /// Create a resolver using default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(
                ResolverConfig::default(),
                ResolverOpts::default(),
            ),
        }
    }
}

#[async_trait]
impl Resolve for SystemResolver {
    async fn lookup_ip(&self, name: &str) -> Result<Vec<IpAddr>, LookupFault> {
        match self.resolver.lookup_ip(name).await {
            Ok(lookup) => Ok(lookup.iter().collect()),
            Err(e) => Err(match e.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => LookupFault::NoRecords,
                ResolveErrorKind::Timeout => LookupFault::TimedOut,
                _ => LookupFault::Fault(e.to_string()),
            }),
        }
    }
}

/// Probes targets by checking whether their name resolves.
///
/// A name with at least one address is `found` and annotated with the first
/// one; an authoritative empty answer is `not_found`.
#[derive(Debug, Clone, Default)]
pub struct DnsProber<R = SystemResolver> {
    resolver: R,
}

impl DnsProber {
    /// Prober backed by the system resolver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: Resolve> DnsProber<R> {
    /// Prober backed by a custom resolution capability
    #[must_use]
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl<R: Resolve> Prober for DnsProber<R> {
    #[instrument(skip(self), fields(probe = "dns"))]
    async fn probe(&self, target: &Target) -> Outcome {
        let name = target.fqdn();
        trace!(name = %name, "resolving");
        match self.resolver.lookup_ip(&name).await {
            Ok(addrs) => addrs
                .first()
                .map_or_else(Outcome::not_found, |ip| Outcome::found(*ip)),
            Err(LookupFault::NoRecords) => Outcome::not_found(),
            Err(LookupFault::TimedOut) => Outcome::timed_out(),
            Err(LookupFault::Fault(detail)) => Outcome::error(detail),
        }
    }
}
