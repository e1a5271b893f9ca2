#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use groper_common::{NetworkError, ScanResult, Subnet};
use groper_core::{NetworkScanner, ScanOptions};

use crate::support::{HungProbe, PredicateProbe, ReverseOrderProbe};

fn subnet(s: &str) -> Subnet {
    s.parse().unwrap()
}

fn scanner_with(probe: impl groper_core::ReachabilityProbe + 'static) -> NetworkScanner {
    NetworkScanner::new(Arc::new(probe))
}

#[tokio::test]
async fn silent_slash_24() {
    let result: ScanResult = scanner_with(PredicateProbe(|_: Ipv4Addr| false))
        .scan(subnet("192.168.1.0/24"))
        .await
        .unwrap();

    assert_eq!(result.hosts_scanned().len(), 254);
    assert_eq!(result.alive().len(), 0);
    assert_eq!(result.dead().len(), 254);
    assert!(result.is_complete());
    assert!(!result.hosts_scanned().contains(&Ipv4Addr::new(192, 168, 1, 0)));
    assert!(!result.hosts_scanned().contains(&Ipv4Addr::new(192, 168, 1, 255)));
}

#[tokio::test]
async fn even_hosts_of_a_slash_29() {
    let result: ScanResult = scanner_with(PredicateProbe(|ip: Ipv4Addr| ip.octets()[3] % 2 == 0))
        .scan(subnet("10.0.0.0/29"))
        .await
        .unwrap();

    let alive: Vec<Ipv4Addr> = result.alive().iter().copied().collect();
    assert_eq!(
        alive,
        vec![Ipv4Addr::new(10, 0, 0, 2), Ipv4Addr::new(10, 0, 0, 4), Ipv4Addr::new(10, 0, 0, 6)]
    );
    assert_eq!(result.dead().len(), 3);

    let expected: &str = "Scan Results for 10.0.0.0/29\n\
                          ========================================\n\
                          Hosts scanned: 6\n\
                          Alive: 3\n\
                          Dead: 3\n\
                          \n\
                          Alive hosts:\n  \
                          10.0.0.2\n  \
                          10.0.0.4\n  \
                          10.0.0.6";
    assert_eq!(result.report(), expected);
}

#[tokio::test]
async fn blocks_larger_than_slash_22_are_refused() {
    for prefix in 0..=21u8 {
        let net: Subnet = Subnet::new(Ipv4Addr::new(10, 0, 0, 0), prefix).unwrap();
        let outcome = scanner_with(PredicateProbe(|_: Ipv4Addr| true)).scan(net).await;
        assert_eq!(outcome, Err(NetworkError::UnsupportedSubnet { prefix }));
    }
}

#[tokio::test]
async fn slash_22_through_30_are_swept() {
    for prefix in 22..=30u8 {
        let net: Subnet = Subnet::new(Ipv4Addr::new(172, 16, 0, 0), prefix).unwrap();
        let result: ScanResult = scanner_with(PredicateProbe(|_: Ipv4Addr| true)).scan(net).await.unwrap();
        let expected: usize = (1usize << (32 - prefix)) - 2;
        assert_eq!(result.hosts_scanned().len(), expected, "/{prefix}");
        assert_eq!(result.alive().len(), expected, "/{prefix}");
    }
}

#[tokio::test]
async fn hung_probes_are_bounded_by_the_deadline() {
    let options = ScanOptions {
        timeout: Duration::from_millis(50),
        concurrency: 4,
        grace: Duration::from_millis(50),
    };
    let started = Instant::now();
    let result: ScanResult = scanner_with(HungProbe)
        .with_options(options)
        .scan(subnet("10.9.9.0/29"))
        .await
        .unwrap();

    // 6 hosts, 4 at a time: two rounds of 100ms, where one at a time would need six
    let bound: Duration = Duration::from_millis(2 * 100);
    assert!(started.elapsed() < bound * 2, "took {:?}", started.elapsed());
    assert_eq!(result.dead().len(), 6);
    assert!(result.alive().is_empty());
}

#[tokio::test]
async fn report_is_sorted_whatever_the_completion_order() {
    let result: ScanResult = scanner_with(ReverseOrderProbe {
        step: Duration::from_millis(5),
    })
    .scan(subnet("10.1.1.0/28"))
    .await
    .unwrap();

    let alive: Vec<Ipv4Addr> = result.alive().iter().copied().collect();
    let mut sorted: Vec<Ipv4Addr> = alive.clone();
    sorted.sort();
    assert_eq!(alive, sorted);
    assert_eq!(alive.len(), 7);
    assert!(result.report().ends_with("  10.1.1.13"));
}

#[tokio::test]
async fn progress_counts_up_to_total() {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    scanner_with(PredicateProbe(|ip: Ipv4Addr| ip.octets()[3] == 1))
        .with_progress(move |p| sink.lock().unwrap().push(p))
        .scan(subnet("10.2.2.0/30"))
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen.last().map(|p| (p.completed, p.total, p.alive)), Some((2, 2, 1)));
}
