//! Netmask parsing and conversion.
//!
//! Network-configuration utilities print masks in different shapes depending on
//! the platform: dotted (`255.255.255.0`), hex (`0xffffff00`, BSD/macOS), or the
//! legacy net-tools `Mask:255.255.255.0`. Everything here normalizes to
//! [`Ipv4Addr`].

use std::net::Ipv4Addr;

use pnet::ipnetwork::ipv4_mask_to_prefix;

/// How many lines around the address line may hold its mask.
const NEIGHBOUR_LINES: usize = 2;

/// Parses a single mask token, either dotted or `0x`-prefixed hex.
pub fn parse_mask(token: &str) -> Option<Ipv4Addr> {
    let token = token.trim().trim_end_matches(',');
    match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok().map(Ipv4Addr::from),
        None => token.parse::<Ipv4Addr>().ok(),
    }
}

/// Prefix length of a contiguous mask, `None` for masks like `255.0.255.0`.
pub fn mask_to_prefix(mask: Ipv4Addr) -> Option<u8> {
    ipv4_mask_to_prefix(mask).ok()
}

pub fn prefix_to_mask(prefix: u8) -> Ipv4Addr {
    let bits: u32 = match prefix {
        0 => 0,
        p if p >= 32 => u32::MAX,
        p => u32::MAX << (32 - p),
    };
    Ipv4Addr::from(bits)
}

/// Locates the mask belonging to `ip` in `ifconfig`-style output.
///
/// The address must appear as a whole token (`inet 10.0.0.5` or
/// `inet addr:10.0.0.5`). The mask is taken from the same line when present,
/// otherwise from up to two lines either side.
pub fn find_netmask(output: &str, ip: Ipv4Addr) -> Option<Ipv4Addr> {
    let ip_str: String = ip.to_string();
    let lines: Vec<&str> = output.lines().collect();

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| mentions_ip(line, &ip_str))
        .find_map(|(idx, line)| {
            let start: usize = idx.saturating_sub(NEIGHBOUR_LINES);
            let end: usize = (idx + NEIGHBOUR_LINES + 1).min(lines.len());
            mask_on_line(line).or_else(|| lines[start..end].iter().find_map(|l| mask_on_line(l)))
        })
}

fn mentions_ip(line: &str, ip_str: &str) -> bool {
    line.split_whitespace()
        .any(|token| token == ip_str || token.strip_prefix("addr:") == Some(ip_str))
}

fn mask_on_line(line: &str) -> Option<Ipv4Addr> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens.iter().enumerate().find_map(|(i, token)| {
        if *token == "netmask" {
            tokens.get(i + 1).and_then(|value| parse_mask(value))
        } else {
            token.strip_prefix("Mask:").and_then(parse_mask)
        }
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
