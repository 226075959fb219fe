//! Target enumeration: expanding scan input into ordered target lists.

use foray_core::{Result, ScanError, Target};
use std::collections::HashSet;

/// Port specification for scanning
#[derive(Debug, Clone)]
pub enum PortSpec {
    /// The common reconnaissance port set
    Common,
    /// Custom port range
    Range(std::ops::RangeInclusive<u16>),
    /// Specific list of ports
    List(Vec<u16>),
}

impl PortSpec {
    /// Expand to a list of ports, preserving first-seen order
    #[must_use]
    pub fn to_ports(&self) -> Vec<u16> {
        let expanded: Vec<u16> = match self {
            Self::Common => COMMON_PORTS.to_vec(),
            Self::Range(r) => r.clone().collect(),
            Self::List(l) => l.clone(),
        };
        let mut seen = HashSet::new();
        expanded.into_iter().filter(|p| seen.insert(*p)).collect()
    }
}

impl std::str::FromStr for PortSpec {
    type Err = ScanError;

    /// Parse a comma-separated port list, e.g. `80,443,8000-8100`.
    fn from_str(s: &str) -> Result<Self> {
        let mut ports = Vec::new();
        for token in s.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if let Some((lo, hi)) = token.split_once('-') {
                let lo = parse_port(lo)?;
                let hi = parse_port(hi)?;
                if lo > hi {
                    return Err(ScanError::InvalidInput(format!(
                        "inverted port range {token}"
                    )));
                }
                ports.extend(lo..=hi);
            } else {
                ports.push(parse_port(token)?);
            }
        }
        if ports.is_empty() {
            return Err(ScanError::InvalidInput("empty port spec".into()));
        }
        Ok(Self::List(ports))
    }
}

fn parse_port(s: &str) -> Result<u16> {
    let s = s.trim();
    s.parse()
        .map_err(|_| ScanError::InvalidInput(format!("bad port number {s:?}")))
}

/// Expand a port spec against one host into probe targets.
///
/// The list is ordered and duplicate-free. An empty host or an empty
/// expansion is rejected before any probing can start.
pub fn ports(host: &str, spec: &PortSpec) -> Result<Vec<Target>> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ScanError::InvalidInput("empty host".into()));
    }

    let ports = spec.to_ports();
    if ports.is_empty() {
        return Err(ScanError::InvalidInput(format!(
            "port spec for {host} expands to nothing"
        )));
    }

    Ok(ports.into_iter().map(|p| Target::port(host, p)).collect())
}

/// Expand a label list against one parent domain into probe targets.
///
/// Labels are trimmed and deduplicated; blank labels are dropped. An empty
/// domain or an empty surviving list is rejected before any probing.
pub fn subdomains(domain: &str, labels: &[String]) -> Result<Vec<Target>> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(ScanError::InvalidInput("empty domain".into()));
    }

    let mut seen = HashSet::new();
    let targets: Vec<Target> = labels
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && seen.insert(l.to_string()))
        .map(|l| Target::subdomain(l, domain))
        .collect();

    if targets.is_empty() {
        return Err(ScanError::InvalidInput(format!(
            "no usable labels for {domain}"
        )));
    }

    Ok(targets)
}

/// The built-in subdomain wordlist used when the caller supplies none
#[must_use]
pub fn common_labels() -> Vec<String> {
    COMMON_LABELS.iter().map(ToString::to_string).collect()
}

// Common reconnaissance ports
const COMMON_PORTS: [u16; 15] = [
    21, 22, 23, 25, 53, 80, 110, 143, 443, 993, 995, 8080, 8443, 3306, 3389,
];

// Subdomain labels worth trying against almost any domain
const COMMON_LABELS: [&str; 41] = [
    "www", "mail", "ftp", "smtp", "pop", "imap", "webmail", "admin", "api", "blog", "shop",
    "store", "forum", "support", "help", "docs", "portal", "test", "dev", "staging", "cdn",
    "static", "media", "img", "images", "app", "apps", "mobile", "m", "secure", "vpn", "remote",
    "ssh", "ns1", "ns2", "dns", "mysql", "db", "database", "backup", "old",
];
