//! Shared data model for packet-groper: subnets, scan results, errors and
//! configuration. Nothing in here touches the network.

pub mod config;
pub mod error;
pub mod network;
pub mod scan_result;

pub use error::{NetworkError, NoInterfaceReason};
pub use network::subnet::Subnet;
pub use scan_result::ScanResult;
