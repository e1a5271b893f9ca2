//! The **abstraction** for checking whether a single address is alive.
//!
//! [`crate::scanner::NetworkScanner`] depends only on [`ReachabilityProbe`], so the
//! strategy behind it (the system `ping` utility, a TCP handshake, or a test
//! double) can change without touching the sweep logic.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use groper_common::config::{Config, ProbeMethod};

mod ping;
mod tcp;

pub use ping::PingProbe;
pub use tcp::{DEFAULT_TCP_PORT, TcpConnectProbe};

#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Returns `true` if `host` answered within `timeout`.
    ///
    /// Implementations never fail outward: a launch failure, an I/O error or an
    /// expired deadline all mean "not alive".
    async fn probe(&self, host: Ipv4Addr, timeout: Duration) -> bool;

    /// How long the check really runs when handed `timeout`.
    ///
    /// Checks that round their budget (e.g. to whole seconds) report the
    /// rounded value so outer deadlines are set past it.
    fn effective_timeout(&self, timeout: Duration) -> Duration {
        timeout
    }
}

/// Builds the probe selected in `cfg`.
pub fn from_config(cfg: &Config) -> Arc<dyn ReachabilityProbe> {
    match cfg.probe_method {
        ProbeMethod::Ping => Arc::new(PingProbe::new().with_grace(cfg.grace)),
        ProbeMethod::TcpConnect { port } => Arc::new(TcpConnectProbe::new(port)),
    }
}
