//! # Subnet Model
//!
//! An IPv4 network block (network address plus prefix length) and the policy
//! deciding whether it is small enough to sweep.
//!
//! A [`Subnet`] is normalized on construction: `192.168.1.77/24` is stored as
//! `192.168.1.0/24`, so the address it reports is always the network address.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;
use thiserror::Error;

use crate::error::NetworkError;
use crate::network::netmask;

/// Smallest prefix length (largest block, 1022 usable hosts) a scan accepts.
pub const MIN_SCAN_PREFIX: u8 = 22;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubnetError {
    #[error("invalid IPv4 address '{0}'")]
    Address(String),
    #[error("invalid prefix length '{0}'")]
    Prefix(String),
    #[error("netmask {0} is not contiguous")]
    Mask(Ipv4Addr),
    #[error("expected CIDR notation like 192.168.1.0/24, got '{0}'")]
    Format(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subnet {
    net: Ipv4Network,
}

impl Subnet {
    /// Builds the block containing `addr`, clearing any host bits.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self, SubnetError> {
        let raw = Ipv4Network::new(addr, prefix)
            .map_err(|_| SubnetError::Prefix(prefix.to_string()))?;
        let net = Ipv4Network::new(raw.network(), prefix)
            .map_err(|_| SubnetError::Prefix(prefix.to_string()))?;
        Ok(Self { net })
    }

    /// Combines a host address with its dotted netmask (non-strict).
    pub fn from_host(ip: Ipv4Addr, mask: Ipv4Addr) -> Result<Self, SubnetError> {
        let prefix: u8 = netmask::mask_to_prefix(mask).ok_or(SubnetError::Mask(mask))?;
        Self::new(ip, prefix)
    }

    pub fn network(&self) -> Ipv4Addr {
        self.net.network()
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        self.net.broadcast()
    }

    pub fn netmask(&self) -> Ipv4Addr {
        self.net.mask()
    }

    pub fn prefix(&self) -> u8 {
        self.net.prefix()
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.net.contains(ip)
    }

    /// Every usable host address in ascending order.
    ///
    /// Network and broadcast addresses are skipped. A /31 is a point-to-point
    /// link and yields both of its addresses; a /32 yields itself.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> + Clone {
        let (first, last) = self.host_bounds();
        (first..=last).map(Ipv4Addr::from)
    }

    /// Lowest address [`Subnet::hosts`] yields.
    pub fn first_host(&self) -> Ipv4Addr {
        self.host_bounds().0.into()
    }

    /// Highest address [`Subnet::hosts`] yields.
    pub fn last_host(&self) -> Ipv4Addr {
        self.host_bounds().1.into()
    }

    pub fn host_count(&self) -> u64 {
        let (first, last) = self.host_bounds();
        u64::from(last - first) + 1
    }

    pub fn is_scannable(&self) -> bool {
        self.prefix() >= MIN_SCAN_PREFIX
    }

    /// Rejects blocks larger than a /22.
    pub fn ensure_scannable(&self) -> Result<(), NetworkError> {
        if self.is_scannable() {
            Ok(())
        } else {
            Err(NetworkError::UnsupportedSubnet {
                prefix: self.prefix(),
            })
        }
    }

    fn host_bounds(&self) -> (u32, u32) {
        let network: u32 = self.network().into();
        let broadcast: u32 = self.broadcast().into();
        match self.prefix() {
            31 | 32 => (network, broadcast),
            _ => (network + 1, broadcast - 1),
        }
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix())
    }
}

impl FromStr for Subnet {
    type Err = SubnetError;

    /// Parses `a.b.c.d/p`. Host bits are cleared rather than rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((ip_str, prefix_str)) = s.trim().split_once('/') else {
            return Err(SubnetError::Format(s.to_string()));
        };

        let addr = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|_| SubnetError::Address(ip_str.to_string()))?;

        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|_| SubnetError::Prefix(prefix_str.to_string()))?;

        Self::new(addr, prefix)
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
