use std::net::{IpAddr, Ipv4Addr, SocketAddrV4, UdpSocket};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use groper_common::network::netmask;
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;
use tokio::process::Command;
use tracing::debug;

use crate::locator::NetworkIntrospection;
use crate::platform::{Platform, ROUTE_TABLE_PATH};

/// Any routable address works; nothing is ever sent to it.
pub const ROUTE_PROBE_TARGET: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::new(8, 8, 8, 8), 80);
const UTILITY_DEADLINE: Duration = Duration::from_secs(5);
const DEFAULT_DESTINATION: &str = "00000000";

/// Reads network facts from the running operating system.
pub struct SystemIntrospection {
    platform: Platform,
    route_probe: SocketAddrV4,
}

impl SystemIntrospection {
    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
            route_probe: ROUTE_PROBE_TARGET,
        }
    }
}

impl Default for SystemIntrospection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkIntrospection for SystemIntrospection {
    async fn active_interfaces(&self) -> Vec<String> {
        if self.platform.has_route_table() {
            match tokio::fs::read_to_string(ROUTE_TABLE_PATH).await {
                Ok(table) => return parse_default_routes(&table),
                Err(e) => debug!("Cannot read {ROUTE_TABLE_PATH}: {e}"),
            }
        }

        // Without a kernel table, a routable source address is proof enough
        match resolve_route_source_ip(self.route_probe) {
            Some(_) => vec!["default".to_string()],
            None => Vec::new(),
        }
    }

    async fn local_ip(&self) -> Option<Ipv4Addr> {
        resolve_route_source_ip(self.route_probe)
    }

    async fn netmask_for(&self, ip: Ipv4Addr) -> Option<Ipv4Addr> {
        if let Some(utility) = self.platform.netmask_utility() {
            if let Some(output) = run_utility(utility).await {
                match netmask::find_netmask(&output, ip) {
                    Some(mask) => return Some(mask),
                    None => debug!("{utility} output holds no mask for {ip}"),
                }
            }
        }

        mask_from_interfaces(&pnet::datalink::interfaces(), ip)
    }
}

/// Interface names whose routing entry points at `0.0.0.0`.
fn parse_default_routes(table: &str) -> Vec<String> {
    let mut interfaces: Vec<String> = Vec::new();
    for line in table.lines().skip(1) {
        let mut fields = line.split_whitespace();
        let (Some(iface), Some(destination)) = (fields.next(), fields.next()) else {
            continue;
        };
        if destination == DEFAULT_DESTINATION && !interfaces.iter().any(|i| i == iface) {
            interfaces.push(iface.to_string());
        }
    }
    interfaces
}

/// Asks the routing layer which local address it would use towards `target`.
///
/// Connecting a UDP socket performs the route lookup without sending a packet.
fn resolve_route_source_ip(target: SocketAddrV4) -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect(target).ok()?;
    match socket.local_addr().ok()?.ip() {
        IpAddr::V4(v4) if !v4.is_unspecified() => Some(v4),
        _ => None,
    }
}

async fn run_utility(program: &str) -> Option<String> {
    let mut command = Command::new(program);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    match tokio::time::timeout(UTILITY_DEADLINE, command.output()).await {
        Ok(Ok(output)) => Some(String::from_utf8_lossy(&output.stdout).into_owned()),
        Ok(Err(e)) => {
            debug!("Could not run {program}: {e}");
            None
        }
        Err(_elapsed) => {
            debug!("{program} did not finish within {UTILITY_DEADLINE:?}");
            None
        }
    }
}

fn mask_from_interfaces(interfaces: &[NetworkInterface], ip: Ipv4Addr) -> Option<Ipv4Addr> {
    interfaces
        .iter()
        .flat_map(|iface| iface.ips.iter())
        .find_map(|net| match net {
            IpNetwork::V4(v4) if v4.ip() == ip => Some(v4.mask()),
            _ => None,
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
