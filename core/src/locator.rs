//! # Subnet Discovery
//!
//! Works out which IPv4 block the operator sits in, with no configuration and no
//! privileges.
//!
//! The sequence is:
//! 1. **Interface**: make sure some interface carries the default route.
//! 2. **Address**: let the routing layer pick our source address.
//! 3. **Mask**: read it from the OS, falling back per [`NetmaskFallback`].
//! 4. **Normalize**: clear the host bits to get the network address.
//!
//! All OS access goes through [`NetworkIntrospection`], so the sequence itself
//! can be exercised against a simulated system.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use groper_common::config::NetmaskFallback;
use groper_common::network::netmask;
use groper_common::{NetworkError, NoInterfaceReason, Subnet};
use tracing::{debug, warn};

use crate::system::SystemIntrospection;

/// The OS facts discovery needs.
#[async_trait]
pub trait NetworkIntrospection: Send + Sync {
    /// Interfaces that carry the default route. Empty when offline.
    async fn active_interfaces(&self) -> Vec<String>;

    /// Source address the OS would use for outbound traffic.
    async fn local_ip(&self) -> Option<Ipv4Addr>;

    /// Netmask configured alongside `ip`, if it can be found.
    async fn netmask_for(&self, ip: Ipv4Addr) -> Option<Ipv4Addr>;
}

pub struct SubnetLocator<I: NetworkIntrospection = SystemIntrospection> {
    introspection: I,
    fallback: NetmaskFallback,
}

impl SubnetLocator<SystemIntrospection> {
    /// Locator backed by the real operating system.
    pub fn system() -> Self {
        Self::new(SystemIntrospection::new())
    }
}

impl<I: NetworkIntrospection> SubnetLocator<I> {
    pub fn new(introspection: I) -> Self {
        Self {
            introspection,
            fallback: NetmaskFallback::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: NetmaskFallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Determines the local subnet.
    ///
    /// # Errors
    /// [`NetworkError::NoInterface`] when there is no default-route interface,
    /// no local address, or (with [`NetmaskFallback::Strict`]) no mask.
    pub async fn discover(&self) -> Result<Subnet, NetworkError> {
        let interfaces: Vec<String> = self.introspection.active_interfaces().await;
        if interfaces.is_empty() {
            return Err(NoInterfaceReason::NoActiveInterface.into());
        }
        debug!("Default route via {}", interfaces.join(", "));

        let local_ip: Ipv4Addr = self
            .introspection
            .local_ip()
            .await
            .ok_or(NoInterfaceReason::NoLocalIp)?;
        debug!("Local address is {local_ip}");

        let mask: Ipv4Addr = self.resolve_mask(local_ip).await?;

        Subnet::from_host(local_ip, mask).map_err(|_| NoInterfaceReason::NoNetmask.into())
    }

    async fn resolve_mask(&self, ip: Ipv4Addr) -> Result<Ipv4Addr, NetworkError> {
        let found: Option<Ipv4Addr> = self
            .introspection
            .netmask_for(ip)
            .await
            .filter(|mask| netmask::mask_to_prefix(*mask).is_some());

        match (found, self.fallback) {
            (Some(mask), _) => Ok(mask),
            (None, NetmaskFallback::Assume { prefix }) => {
                warn!("Could not determine the netmask of {ip}, assuming /{prefix}");
                Ok(netmask::prefix_to_mask(prefix))
            }
            (None, NetmaskFallback::Strict) => Err(NoInterfaceReason::NoNetmask.into()),
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

#[cfg(test)]
mod tests {
    use super::*;

    struct MockSystem {
        interfaces: Vec<String>,
        ip: Option<Ipv4Addr>,
        mask: Option<Ipv4Addr>,
    }

    #[async_trait]
    impl NetworkIntrospection for MockSystem {
        async fn active_interfaces(&self) -> Vec<String> {
            self.interfaces.clone()
        }

        async fn local_ip(&self) -> Option<Ipv4Addr> {
            self.ip
        }

        async fn netmask_for(&self, _ip: Ipv4Addr) -> Option<Ipv4Addr> {
            self.mask
        }
    }

    fn healthy_system() -> MockSystem {
        MockSystem {
            interfaces: vec!["eth0".to_string()],
            ip: Some(Ipv4Addr::new(192, 168, 1, 42)),
            mask: Some(Ipv4Addr::new(255, 255, 255, 0)),
        }
    }

    #[tokio::test]
    async fn discover_clears_host_bits() {
        let subnet = SubnetLocator::new(healthy_system()).discover().await.unwrap();
        assert_eq!(subnet.to_string(), "192.168.1.0/24");
    }

    #[tokio::test]
    async fn discover_fails_without_interface() {
        let system = MockSystem {
            interfaces: vec![],
            ..healthy_system()
        };
        let err = SubnetLocator::new(system).discover().await.unwrap_err();
        assert_eq!(err, NetworkError::NoInterface(NoInterfaceReason::NoActiveInterface));
        assert_eq!(err.code(), "no-interface");
    }

    #[tokio::test]
    async fn discover_fails_without_local_ip() {
        let system = MockSystem {
            ip: None,
            ..healthy_system()
        };
        let err = SubnetLocator::new(system).discover().await.unwrap_err();
        assert_eq!(err, NetworkError::NoInterface(NoInterfaceReason::NoLocalIp));
    }

    #[tokio::test]
    async fn missing_mask_assumes_slash_24_by_default() {
        let system = MockSystem {
            ip: Some(Ipv4Addr::new(10, 3, 7, 200)),
            mask: None,
            ..healthy_system()
        };
        let subnet = SubnetLocator::new(system).discover().await.unwrap();
        assert_eq!(subnet.to_string(), "10.3.7.0/24");
    }

    #[tokio::test]
    async fn missing_mask_is_an_error_when_strict() {
        let system = MockSystem {
            mask: None,
            ..healthy_system()
        };
        let err = SubnetLocator::new(system)
            .with_fallback(NetmaskFallback::Strict)
            .discover()
            .await
            .unwrap_err();
        assert_eq!(err, NetworkError::NoInterface(NoInterfaceReason::NoNetmask));
    }

    #[tokio::test]
    async fn non_contiguous_mask_counts_as_missing() {
        let system = MockSystem {
            mask: Some(Ipv4Addr::new(255, 0, 255, 0)),
            ..healthy_system()
        };
        let err = SubnetLocator::new(system)
            .with_fallback(NetmaskFallback::Strict)
            .discover()
            .await
            .unwrap_err();
        assert_eq!(err.code(), "no-interface");
    }

    #[tokio::test]
    async fn custom_fallback_prefix() {
        let system = MockSystem {
            mask: None,
            ..healthy_system()
        };
        let subnet = SubnetLocator::new(system)
            .with_fallback(NetmaskFallback::Assume { prefix: 23 })
            .discover()
            .await
            .unwrap();
        assert_eq!(subnet.to_string(), "192.168.0.0/23");
    }
}
