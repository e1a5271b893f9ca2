use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_CONCURRENCY: usize = 100;
/// Extra time a probe gets beyond its own timeout before it is abandoned.
pub const DEFAULT_GRACE: Duration = Duration::from_millis(500);
pub const DEFAULT_ASSUMED_PREFIX: u8 = 24;

/// What discovery does when no netmask can be found for the local address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetmaskFallback {
    /// Assume a block of this size and warn about it.
    Assume { prefix: u8 },
    /// Fail with `no-interface`.
    Strict,
}

impl Default for NetmaskFallback {
    fn default() -> Self {
        Self::Assume {
            prefix: DEFAULT_ASSUMED_PREFIX,
        }
    }
}

/// How a single host is checked for life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMethod {
    /// ICMP echo through the system `ping` utility.
    #[default]
    Ping,
    /// TCP handshake attempt; a refusal still counts as alive.
    TcpConnect { port: u16 },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Per-probe budget handed to the check itself.
    pub timeout: Duration,
    /// Upper bound on probes in flight.
    pub concurrency: usize,
    /// Added on top of `timeout` to reclaim a check that ignores its own budget.
    pub grace: Duration,
    pub netmask_fallback: NetmaskFallback,
    pub probe_method: ProbeMethod,
    /// 0 prints everything, 1 drops decorations, 2 prints only the report.
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            grace: DEFAULT_GRACE,
            netmask_fallback: NetmaskFallback::default(),
            probe_method: ProbeMethod::default(),
            quiet: 0,
            no_banner: false,
        }
    }
}
