//! DNS record survey across the standard record types.

use foray_core::{Result, ScanError};
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use tracing::{debug, instrument};

/// Records discovered for one domain. Types the domain does not publish are
/// simply empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRecords {
    /// The surveyed domain
    pub domain: String,

    /// IPv4 addresses (A)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub a: Vec<IpAddr>,

    /// IPv6 addresses (AAAA)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aaaa: Vec<IpAddr>,

    /// Mail exchangers, `preference exchange` per entry (MX)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mx: Vec<String>,

    /// Authoritative name servers (NS)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ns: Vec<String>,

    /// Text records, fragments joined (TXT)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub txt: Vec<String>,

    /// Start-of-authority records (SOA)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub soa: Vec<String>,

    /// Canonical-name aliases (CNAME)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cname: Vec<String>,
}

impl DomainRecords {
    /// True when the survey produced nothing at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
            && self.aaaa.is_empty()
            && self.mx.is_empty()
            && self.ns.is_empty()
            && self.txt.is_empty()
            && self.soa.is_empty()
            && self.cname.is_empty()
    }
}

/// Surveys a domain's published DNS records.
#[derive(Clone)]
pub struct DomainSurvey {
    resolver: TokioAsyncResolver,
}

impl Default for DomainSurvey {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainSurvey {
    /// Create a survey using default resolver configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(
                ResolverConfig::default(),
                ResolverOpts::default(),
            ),
        }
    }

    /// Look up every supported record type for `domain`.
    ///
    /// Absent record types come back empty; a transport-level resolver
    /// failure fails the survey.
    #[instrument(skip(self))]
    pub async fn collect(&self, domain: &str) -> Result<DomainRecords> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(ScanError::InvalidInput("empty domain".into()));
        }

        debug!(domain = %domain, "surveying DNS records");
        let (a, aaaa, mx, ns, txt, soa, cname) = tokio::join!(
            self.a(domain),
            self.aaaa(domain),
            self.mx(domain),
            self.ns(domain),
            self.txt(domain),
            self.soa(domain),
            self.cname(domain),
        );

        Ok(DomainRecords {
            domain: domain.to_string(),
            a: a?,
            aaaa: aaaa?,
            mx: mx?,
            ns: ns?,
            txt: txt?,
            soa: soa?,
            cname: cname?,
        })
    }

    async fn a(&self, domain: &str) -> Result<Vec<IpAddr>> {
        match self.resolver.ipv4_lookup(domain).await {
            Ok(lookup) => Ok(lookup.iter().map(|a| IpAddr::V4(a.0)).collect()),
            Err(e) => absent_or_fail(&e),
        }
    }

    async fn aaaa(&self, domain: &str) -> Result<Vec<IpAddr>> {
        match self.resolver.ipv6_lookup(domain).await {
            Ok(lookup) => Ok(lookup.iter().map(|aaaa| IpAddr::V6(aaaa.0)).collect()),
            Err(e) => absent_or_fail(&e),
        }
    }

    async fn mx(&self, domain: &str) -> Result<Vec<String>> {
        match self.resolver.mx_lookup(domain).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .map(|mx| format!("{} {}", mx.preference(), mx.exchange()))
                .collect()),
            Err(e) => absent_or_fail(&e),
        }
    }

    async fn ns(&self, domain: &str) -> Result<Vec<String>> {
        match self.resolver.ns_lookup(domain).await {
            Ok(lookup) => Ok(lookup.iter().map(|ns| ns.to_string()).collect()),
            Err(e) => absent_or_fail(&e),
        }
    }

    async fn txt(&self, domain: &str) -> Result<Vec<String>> {
        match self.resolver.txt_lookup(domain).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .map(|txt| {
                    txt.iter()
                        .map(|data| String::from_utf8_lossy(data).to_string())
                        .collect::<Vec<_>>()
                        .join("")
                })
                .collect()),
            Err(e) => absent_or_fail(&e),
        }
    }

    async fn soa(&self, domain: &str) -> Result<Vec<String>> {
        match self.resolver.soa_lookup(domain).await {
            Ok(lookup) => Ok(lookup.iter().map(|soa| soa.to_string()).collect()),
            Err(e) => absent_or_fail(&e),
        }
    }

    async fn cname(&self, domain: &str) -> Result<Vec<String>> {
        match self.resolver.lookup(domain, RecordType::CNAME).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .filter_map(|rdata| match rdata {
                    RData::CNAME(name) => Some(name.to_string()),
                    _ => None,
                })
                .collect()),
            Err(e) => absent_or_fail(&e),
        }
    }
}

// A name with no records of the queried type is an ordinary empty answer.
fn absent_or_fail<T>(err: &ResolveError) -> Result<Vec<T>> {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => Ok(Vec::new()),
        _ => Err(ScanError::Dns(err.to_string())),
    }
}
