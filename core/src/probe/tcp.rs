use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::ReachabilityProbe;

pub const DEFAULT_TCP_PORT: u16 = 443;

/// Unprivileged liveness check through a TCP handshake.
///
/// Both an accepted connection and an active refusal (RST) prove a host is up;
/// only silence until the deadline counts as dead.
pub struct TcpConnectProbe {
    port: u16,
}

impl TcpConnectProbe {
    pub fn new(port: u16) -> Self {
        Self { port }
    }
}

impl Default for TcpConnectProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TCP_PORT)
    }
}

#[async_trait]
impl ReachabilityProbe for TcpConnectProbe {
    async fn probe(&self, host: Ipv4Addr, probe_timeout: Duration) -> bool {
        let socket_addr: SocketAddr = SocketAddr::new(IpAddr::V4(host), self.port);

        match timeout(probe_timeout, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => e.kind() == std::io::ErrorKind::ConnectionRefused,
            Err(_elapsed) => false,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
