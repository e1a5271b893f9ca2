pub mod scan;

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, value_parser};
use groper_common::Subnet;
use groper_common::config::{Config, NetmaskFallback, ProbeMethod};
use groper_core::probe::DEFAULT_TCP_PORT;

#[derive(Parser)]
#[command(name = "packet-groper", version)]
#[command(about = "Find the live hosts on your local network.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print less (-q drops decorations, -qq prints only the report)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Skip the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sweep the local subnet for hosts that answer
    #[command(alias = "s")]
    Scan(ScanArgs),
}

#[derive(Args)]
pub struct ScanArgs {
    /// Subnet to sweep instead of the discovered one (e.g. 192.168.1.0/24)
    #[arg(long)]
    pub subnet: Option<Subnet>,

    /// Per-host timeout in milliseconds
    #[arg(short, long, default_value_t = 500, value_parser = value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Maximum number of probes in flight
    #[arg(short, long, default_value_t = 100, value_parser = value_parser!(u32).range(1..=4096))]
    pub concurrency: u32,

    /// How each host is checked
    #[arg(short, long, value_enum, default_value_t = MethodArg::Ping)]
    pub method: MethodArg,

    /// Port knocked on by the tcp method
    #[arg(long, default_value_t = DEFAULT_TCP_PORT)]
    pub port: u16,

    /// Fail instead of assuming a /24 when the netmask cannot be read
    #[arg(long)]
    pub strict_netmask: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// ICMP echo via the system ping utility
    Ping,
    /// TCP handshake, no special privileges needed
    Tcp,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl ScanArgs {
    pub fn to_config(&self, quiet: u8, no_banner: bool) -> Config {
        let probe_method: ProbeMethod = match self.method {
            MethodArg::Ping => ProbeMethod::Ping,
            MethodArg::Tcp => ProbeMethod::TcpConnect { port: self.port },
        };
        let netmask_fallback: NetmaskFallback = if self.strict_netmask {
            NetmaskFallback::Strict
        } else {
            NetmaskFallback::default()
        };

        Config {
            timeout: Duration::from_millis(self.timeout),
            concurrency: self.concurrency as usize,
            netmask_fallback,
            probe_method,
            quiet,
            no_banner,
            ..Config::default()
        }
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
