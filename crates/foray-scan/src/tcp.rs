//! TCP connect probing.

use crate::probe::{Outcome, Prober};
use crate::services;
use async_trait::async_trait;
use foray_core::Target;
use std::io;
use std::net::{IpAddr, SocketAddr};
use tracing::{instrument, trace};

/// Raw connect capability injected into [`TcpProber`].
///
/// The production implementation is [`TokioConnect`]; tests substitute
/// scripted ones.
#[async_trait]
pub trait Connect: Send + Sync {
    /// Attempt a TCP handshake with `addr`
    async fn connect(&self, addr: SocketAddr) -> io::Result<()>;
}

/// Connects with `tokio::net::TcpStream`. The stream is dropped as soon as
/// the handshake answer is known, so no socket outlives its probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioConnect;

#[async_trait]
impl Connect for TokioConnect {
    async fn connect(&self, addr: SocketAddr) -> io::Result<()> {
        tokio::net::TcpStream::connect(addr).await.map(|_| ())
    }
}

/// Probes port targets by attempting a full TCP handshake.
///
/// An accepted connection is `open`, an active refusal is `closed`, and
/// anything else is an `error` carrying the OS detail. Open ports are
/// annotated with the static service name when one is known.
#[derive(Debug, Clone, Default)]
pub struct TcpProber<C = TokioConnect> {
    connector: C,
}

impl TcpProber {
    /// Prober backed by real tokio connections
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Connect> TcpProber<C> {
    /// Prober backed by a custom connect capability
    #[must_use]
    pub fn with_connector(connector: C) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl<C: Connect> Prober for TcpProber<C> {
    #[instrument(skip(self), fields(probe = "tcp"))]
    async fn probe(&self, target: &Target) -> Outcome {
        let Target::Port { host, port } = target else {
            return Outcome::error("target is not a host:port pair");
        };

        let addr = match resolve(host, *port).await {
            Ok(addr) => addr,
            Err(detail) => return Outcome::error(detail),
        };

        trace!(%addr, "connecting");
        match self.connector.connect(addr).await {
            Ok(()) => Outcome::open(services::name_for(*port)),
            Err(e) => classify_io(&e),
        }
    }
}

/// Pick the socket address for a probe. IP literals skip DNS entirely;
/// hostnames take the system resolver's first answer.
async fn resolve(host: &str, port: u16) -> Result<SocketAddr, String> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port));
    }
    match tokio::net::lookup_host((host, port)).await {
        Ok(mut addrs) => addrs
            .next()
            .ok_or_else(|| format!("no addresses for {host}")),
        Err(e) => Err(format!("resolving {host}: {e}")),
    }
}

fn classify_io(err: &io::Error) -> Outcome {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => Outcome::closed(),
        io::ErrorKind::TimedOut => Outcome::timed_out(),
        _ => Outcome::error(err.to_string()),
    }
}
