use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use groper_core::{NetworkIntrospection, ReachabilityProbe};

/// Alive iff the predicate holds for the host.
pub struct PredicateProbe<F>(pub F);

#[async_trait]
impl<F> ReachabilityProbe for PredicateProbe<F>
where
    F: Fn(Ipv4Addr) -> bool + Send + Sync,
{
    async fn probe(&self, host: Ipv4Addr, _timeout: Duration) -> bool {
        (self.0)(host)
    }
}

/// Never answers and never returns on its own.
pub struct HungProbe;

#[async_trait]
impl ReachabilityProbe for HungProbe {
    async fn probe(&self, _host: Ipv4Addr, _timeout: Duration) -> bool {
        std::future::pending::<bool>().await
    }
}

/// Answers after a delay that shrinks with the last octet, so hosts
/// complete in reverse address order.
pub struct ReverseOrderProbe {
    pub step: Duration,
}

#[async_trait]
impl ReachabilityProbe for ReverseOrderProbe {
    async fn probe(&self, host: Ipv4Addr, _timeout: Duration) -> bool {
        let octet: u32 = u32::from(host.octets()[3]);
        tokio::time::sleep(self.step * (16 - octet.min(16))).await;
        octet % 2 == 1
    }
}

/// A configurable stand-in for the operating system.
#[derive(Clone)]
pub struct SimulatedSystem {
    pub interfaces: Vec<String>,
    pub ip: Option<Ipv4Addr>,
    pub mask: Option<Ipv4Addr>,
}

impl SimulatedSystem {
    pub fn offline() -> Self {
        Self {
            interfaces: Vec::new(),
            ip: None,
            mask: None,
        }
    }

    pub fn home_lan() -> Self {
        Self {
            interfaces: vec!["wlan0".to_string()],
            ip: Some(Ipv4Addr::new(192, 168, 1, 42)),
            mask: Some(Ipv4Addr::new(255, 255, 255, 0)),
        }
    }
}

#[async_trait]
impl NetworkIntrospection for SimulatedSystem {
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
