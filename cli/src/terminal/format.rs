use std::net::Ipv4Addr;

use colored::*;
use groper_common::Subnet;

use crate::terminal::colors;

pub fn ipv4(addr: Ipv4Addr) -> ColoredString {
    addr.to_string().color(colors::IPV4_ADDR)
}

pub fn subnet(subnet: &Subnet) -> ColoredString {
    let address: ColoredString = ipv4(subnet.network());
    let prefix: ColoredString = subnet.prefix().to_string().color(colors::IPV4_PREFIX);
    format!("{address}/{prefix}").color(colors::SEPARATOR)
}

pub fn host_range(subnet: &Subnet) -> ColoredString {
    format!("{} - {}", ipv4(subnet.first_host()), ipv4(subnet.last_host())).normal()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
