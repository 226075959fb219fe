use serde::{Deserialize, Serialize};

/// A single probe unit: one TCP port on a host, or one candidate subdomain.
///
/// Targets are immutable once enumerated. The derived ordering sorts port
/// targets by host then port and subdomain targets by label, which is the
/// order reports are returned in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// A TCP port on a host
    Port {
        /// Hostname or IP literal
        host: String,
        /// Port number
        port: u16,
    },

    /// A candidate subdomain of a parent domain
    Subdomain {
        /// Label under test (e.g. `www`)
        label: String,
        /// Parent domain (e.g. `example.com`)
        domain: String,
    },
}

impl Target {
    /// Create a port target
    #[must_use]
    pub fn port(host: impl Into<String>, port: u16) -> Self {
        Self::Port {
            host: host.into(),
            port,
        }
    }

    /// Create a subdomain target
    #[must_use]
    pub fn subdomain(label: impl Into<String>, domain: impl Into<String>) -> Self {
        Self::Subdomain {
            label: label.into(),
            domain: domain.into(),
        }
    }

    /// The name this target resolves: the host for ports, the fully
    /// qualified subdomain otherwise
    #[must_use]
    pub fn fqdn(&self) -> String {
        match self {
            Self::Port { host, .. } => host.clone(),
            Self::Subdomain { label, domain } => format!("{label}.{domain}"),
        }
    }

    /// Port number for port targets
    #[must_use]
    pub const fn port_number(&self) -> Option<u16> {
        match self {
            Self::Port { port, .. } => Some(*port),
            Self::Subdomain { .. } => None,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Port { host, port } => write!(f, "{host}:{port}"),
            Self::Subdomain { label, domain } => write!(f, "{label}.{domain}"),
        }
    }
}
