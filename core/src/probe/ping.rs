//! ICMP echo through the system `ping` utility, which needs no privileges of
//! our own.

use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use groper_common::config::DEFAULT_GRACE;
use tokio::process::Command;
use tracing::debug;

use super::ReachabilityProbe;
use crate::platform::Platform;

pub struct PingProbe {
    program: String,
    platform: Platform,
    grace: Duration,
}

impl PingProbe {
    pub fn new() -> Self {
        Self {
            program: "ping".to_string(),
            platform: Platform::current(),
            grace: DEFAULT_GRACE,
        }
    }

    /// Time allowed past the check's own timeout before the child is killed.
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// When the child gets killed: the wait `ping` was actually given, plus grace.
    pub fn hard_deadline(&self, timeout: Duration) -> Duration {
        self.platform.effective_wait(timeout) + self.grace
    }
}

impl Default for PingProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReachabilityProbe for PingProbe {
    async fn probe(&self, host: Ipv4Addr, timeout: Duration) -> bool {
        let mut command = Command::new(&self.program);
        command
            .args(self.platform.ping_args(host, timeout))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let hard_deadline: Duration = self.hard_deadline(timeout);

        match tokio::time::timeout(hard_deadline, command.output()).await {
            Ok(Ok(output)) => output.status.success(),
            Ok(Err(e)) => {
                debug!("Failed to launch {} for {host}: {e}", self.program);
                false
            }
            Err(_elapsed) => {
                debug!("{} for {host} exceeded {hard_deadline:?}, killed", self.program);
                false
            }
        }
    }

    fn effective_timeout(&self, timeout: Duration) -> Duration {
        self.platform.effective_wait(timeout)
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
