#![cfg(test)]
use std::net::Ipv4Addr;

use groper_common::config::NetmaskFallback;
use groper_common::{NetworkError, NoInterfaceReason, Subnet};
use groper_core::SubnetLocator;

use crate::support::SimulatedSystem;

#[tokio::test]
async fn offline_machine_has_no_interface() {
    let err: NetworkError = SubnetLocator::new(SimulatedSystem::offline())
        .discover()
        .await
        .unwrap_err();

    assert_eq!(err, NetworkError::NoInterface(NoInterfaceReason::NoActiveInterface));
    assert_eq!(err.code(), "no-interface");
    assert_eq!(err.to_string(), "No active network interface found");
}

#[tokio::test]
async fn home_lan_is_discovered_as_slash_24() {
    let subnet: Subnet = SubnetLocator::new(SimulatedSystem::home_lan())
        .discover()
        .await
        .unwrap();

    assert_eq!(subnet.network(), Ipv4Addr::new(192, 168, 1, 0));
    assert_eq!(subnet.prefix(), 24);
    assert!(subnet.is_scannable());
}

#[tokio::test]
async fn unreadable_mask_follows_policy() {
    let system = SimulatedSystem {
        mask: None,
        ..SimulatedSystem::home_lan()
    };

    let assumed: Subnet = SubnetLocator::new(system.clone()).discover().await.unwrap();
    assert_eq!(assumed.to_string(), "192.168.1.0/24");

    let strict = SubnetLocator::new(system)
        .with_fallback(NetmaskFallback::Strict)
        .discover()
        .await;
    assert_eq!(strict, Err(NetworkError::NoInterface(NoInterfaceReason::NoNetmask)));
}

#[tokio::test]
#[ignore = "reads the real network configuration"]
async fn system_discovery_yields_a_normalized_subnet() {
    match SubnetLocator::system().discover().await {
        Ok(subnet) => assert_eq!(u32::from(subnet.network()) & !u32::from(subnet.netmask()), 0),
        Err(e) => eprintln!("WARNING: discovery failed ({e}), are you offline?"),
    }
}
