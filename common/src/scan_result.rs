//! # Scan Result Model
//!
//! Aggregated outcome of one sweep over a [`Subnet`].
//!
//! A result is created empty when the sweep starts and filled one host at a time
//! as probes resolve, in whatever order they finish. It guarantees that every
//! scanned host is classified at most once, and [`ScanResult::finalize`] makes
//! sure each one is classified exactly once before it is handed out.

use std::collections::BTreeSet;
use std::fmt;
use std::net::Ipv4Addr;

use crate::network::subnet::Subnet;

const REPORT_RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    subnet: Subnet,
    hosts_scanned: Vec<Ipv4Addr>,
    alive: BTreeSet<Ipv4Addr>,
    dead: BTreeSet<Ipv4Addr>,
}

impl ScanResult {
    /// Starts an empty result covering every usable host of `subnet`.
    pub fn new(subnet: Subnet) -> Self {
        Self {
            subnet,
            hosts_scanned: subnet.hosts().collect(),
            alive: BTreeSet::new(),
            dead: BTreeSet::new(),
        }
    }

    /// Classifies one host.
    ///
    /// Returns `false`, leaving the result untouched, when `host` is not part of
    /// the sweep or has already been classified.
    pub fn record(&mut self, host: Ipv4Addr, is_alive: bool) -> bool {
        if !self.was_scanned(host) || self.is_classified(host) {
            return false;
        }
        if is_alive {
            self.alive.insert(host)
        } else {
            self.dead.insert(host)
        }
    }

    /// Marks every host that never reported as dead and returns how many were.
    pub fn finalize(&mut self) -> usize {
        let unresolved: Vec<Ipv4Addr> = self
            .hosts_scanned
            .iter()
            .copied()
            .filter(|host| !self.is_classified(*host))
            .collect();

        self.dead.extend(unresolved.iter().copied());
        unresolved.len()
    }

    pub fn is_complete(&self) -> bool {
        self.alive.len() + self.dead.len() == self.hosts_scanned.len()
    }

    pub fn subnet(&self) -> &Subnet {
        &self.subnet
    }

    pub fn hosts_scanned(&self) -> &[Ipv4Addr] {
        &self.hosts_scanned
    }

    /// Alive hosts, ascending.
    pub fn alive(&self) -> &BTreeSet<Ipv4Addr> {
        &self.alive
    }

    pub fn dead(&self) -> &BTreeSet<Ipv4Addr> {
        &self.dead
    }

    pub fn is_alive(&self, host: Ipv4Addr) -> bool {
        self.alive.contains(&host)
    }

    /// Renders the human-readable summary.
    ///
    /// The output depends only on the subnet and the final classification, never
    /// on the order in which probes completed.
    pub fn report(&self) -> String {
        let mut lines: Vec<String> = vec![
            format!("Scan Results for {}", self.subnet),
            "=".repeat(REPORT_RULE_WIDTH),
            format!("Hosts scanned: {}", self.hosts_scanned.len()),
            format!("Alive: {}", self.alive.len()),
            format!("Dead: {}", self.dead.len()),
            String::new(),
            "Alive hosts:".to_string(),
        ];
        lines.extend(self.alive.iter().map(|host| format!("  {host}")));
        lines.join("\n")
    }

    fn was_scanned(&self, host: Ipv4Addr) -> bool {
        self.hosts_scanned.binary_search(&host).is_ok()
    }

    fn is_classified(&self, host: Ipv4Addr) -> bool {
        self.alive.contains(&host) || self.dead.contains(&host)
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
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

    fn slash_29() -> Subnet {
        "10.0.0.0/29".parse().unwrap()
    }

    #[test]
    fn new_result_is_empty_but_knows_its_hosts() {
        let result = ScanResult::new(slash_29());
        assert_eq!(result.hosts_scanned().len(), 6);
        assert!(result.alive().is_empty());
        assert!(result.dead().is_empty());
        assert!(!result.is_complete());
    }

    #[test]
    fn record_rejects_duplicates_and_strangers() {
        let mut result = ScanResult::new(slash_29());
        let host = Ipv4Addr::new(10, 0, 0, 3);

        assert!(result.record(host, true));
        assert!(!result.record(host, false), "second classification must be refused");
        assert!(result.is_alive(host));
        assert!(!result.dead().contains(&host));

        assert!(!result.record(Ipv4Addr::new(10, 0, 0, 0), true), "network address");
        assert!(!result.record(Ipv4Addr::new(10, 0, 0, 7), true), "broadcast address");
        assert!(!result.record(Ipv4Addr::new(192, 168, 1, 1), true), "outside subnet");
    }

    #[test]
    fn finalize_marks_stragglers_dead() {
        let mut result = ScanResult::new(slash_29());
        result.record(Ipv4Addr::new(10, 0, 0, 1), true);
        result.record(Ipv4Addr::new(10, 0, 0, 2), false);

        assert_eq!(result.finalize(), 4);
        assert!(result.is_complete());
        assert_eq!(result.alive().len(), 1);
        assert_eq!(result.dead().len(), 5);
        assert_eq!(result.finalize(), 0);
    }

    #[test]
    fn report_sorts_alive_hosts_regardless_of_record_order() {
        let mut result = ScanResult::new(slash_29());
        for last in [6, 2, 5, 4, 1, 3] {
            result.record(Ipv4Addr::new(10, 0, 0, last), last % 2 == 0);
        }

        let expected = "\
Scan Results for 10.0.0.0/29
========================================
Hosts scanned: 6
Alive: 3
Dead: 3

Alive hosts:
  10.0.0.2
  10.0.0.4
  10.0.0.6";
        assert_eq!(result.report(), expected);
        assert_eq!(result.to_string(), expected);
    }

    #[test]
    fn report_orders_numerically_not_lexically() {
        let mut result = ScanResult::new("192.168.1.0/24".parse().unwrap());
        for last in [100, 9, 20] {
            result.record(Ipv4Addr::new(192, 168, 1, last), true);
        }
        let report = result.report();
        let listed: Vec<&str> = report.lines().skip(7).map(str::trim).collect();
        assert_eq!(listed, vec!["192.168.1.9", "192.168.1.20", "192.168.1.100"]);
    }
}
