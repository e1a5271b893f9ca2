//! # packet-groper core
//!
//! Local-network host discovery:
//!
//! * **[`locator`]**: finds the operator's subnet from OS introspection.
//! * **[`scanner`]**: sweeps a subnet through a bounded pool of probes.
//! * **[`probe`]**: the per-host reachability check and its implementations.
//! * **[`platform`]**: the few places where the host OS changes behaviour.

pub mod locator;
pub mod platform;
pub mod probe;
pub mod scanner;
pub mod system;

pub use locator::{NetworkIntrospection, SubnetLocator};
pub use probe::ReachabilityProbe;
pub use scanner::{NetworkScanner, ScanOptions, ScanProgress};
