//! # Network Errors
//!
//! The closed set of failures that discovery and scan validation can report.
//!
//! Every variant carries a stable string code (see [`NetworkError::code`]) so that
//! scripts driving the CLI can match on `Error [<code>]` without parsing prose.

use thiserror::Error;

/// Why the local subnet could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoInterfaceReason {
    /// No interface carries the default route.
    NoActiveInterface,
    /// The OS did not assign a source address for the outbound route.
    NoLocalIp,
    /// No mask could be associated with the local address.
    NoNetmask,
}

impl std::fmt::Display for NoInterfaceReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::NoActiveInterface => "No active network interface found",
            Self::NoLocalIp => "Could not determine local IP address",
            Self::NoNetmask => "Could not determine network mask",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("{0}")]
    NoInterface(NoInterfaceReason),

    #[error("Only /{min} or smaller subnets are supported, got /{prefix}", min = crate::network::subnet::MIN_SCAN_PREFIX)]
    UnsupportedSubnet { prefix: u8 },
}

impl NetworkError {
    /// Stable, machine-matchable identifier of the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoInterface(_) => "no-interface",
            Self::UnsupportedSubnet { .. } => "unsupported-subnet",
        }
    }
}

impl From<NoInterfaceReason> for NetworkError {
    fn from(reason: NoInterfaceReason) -> Self {
        Self::NoInterface(reason)
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
