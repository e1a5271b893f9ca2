//! Host-OS differences, kept in one place.
//!
//! The probe and locator ask a [`Platform`] how to phrase a command instead of
//! branching on `cfg!` themselves.

use std::net::Ipv4Addr;
use std::time::Duration;

/// Kernel routing table on Linux.
pub const ROUTE_TABLE_PATH: &str = "/proc/net/route";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    /// BSDs and anything else with an iputils/BSD-like `ping`.
    OtherUnix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::OtherUnix
        }
    }

    /// Arguments for a single echo request to `host` bounded by `timeout`.
    pub fn ping_args(&self, host: Ipv4Addr, timeout: Duration) -> Vec<String> {
        let wait: String = self.ping_wait_arg(timeout);
        match self {
            Self::Windows => vec!["-n".into(), "1".into(), "-w".into(), wait, host.to_string()],
            _ => vec!["-c".into(), "1".into(), "-W".into(), wait, host.to_string()],
        }
    }

    /// How long `ping` will actually wait for a reply when asked for `timeout`.
    ///
    /// macOS and Windows take milliseconds. Linux takes whole seconds, rounded
    /// up and never 0, since iputils reads `-W 0` as "wait forever".
    pub fn effective_wait(&self, timeout: Duration) -> Duration {
        match self {
            Self::MacOs | Self::Windows => timeout.max(Duration::from_millis(1)),
            Self::Linux | Self::OtherUnix => {
                let secs: u64 = timeout.as_millis().div_ceil(1000) as u64;
                Duration::from_secs(secs.max(1))
            }
        }
    }

    /// The `-W`/`-w` value.
    pub fn ping_wait_arg(&self, timeout: Duration) -> String {
        let wait: Duration = self.effective_wait(timeout);
        match self {
            Self::MacOs | Self::Windows => wait.as_millis().to_string(),
            Self::Linux | Self::OtherUnix => wait.as_secs().to_string(),
        }
    }

    /// Utility that lists interface addresses together with their masks.
    pub fn netmask_utility(&self) -> Option<&'static str> {
        match self {
            Self::Windows => None,
            _ => Some("ifconfig"),
        }
    }

    pub fn has_route_table(&self) -> bool {
        matches!(self, Self::Linux)
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
