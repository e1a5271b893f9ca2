use std::process::ExitCode;
use std::time::{Duration, Instant};

use colored::*;
use groper_common::config::Config;
use groper_common::{ScanResult, Subnet};
use groper_core::probe;
use groper_core::{NetworkScanner, ScanOptions, SubnetLocator};
use tracing::{Instrument, info_span, warn};

use crate::terminal::{colors, format, print, spinner};

pub async fn scan(subnet_override: Option<Subnet>, cfg: &Config) -> anyhow::Result<ExitCode> {
    print::header("locating subnet", cfg.quiet);

    let subnet: Subnet = match subnet_override {
        Some(subnet) => subnet,
        None => {
            SubnetLocator::system()
                .with_fallback(cfg.netmask_fallback)
                .discover()
                .await?
        }
    };
    print_subnet(&subnet, subnet_override.is_some(), cfg);

    if let Err(e) = subnet.ensure_scannable() {
        warn!("{e}, not scanning {subnet}");
        return Ok(ExitCode::FAILURE);
    }

    print::header("sweeping subnet", cfg.quiet);
    let start_time: Instant = Instant::now();
    let result: ScanResult = sweep(subnet, cfg).await?;

    scan_ends(&result, start_time.elapsed(), cfg);
    Ok(ExitCode::SUCCESS)
}

async fn sweep(subnet: Subnet, cfg: &Config) -> anyhow::Result<ScanResult> {
    let span = info_span!("sweep", indicatif.pb_show = true);
    spinner::prepare(&span, subnet.host_count());

    let progress_span = span.clone();
    let scanner = NetworkScanner::new(probe::from_config(cfg))
        .with_options(ScanOptions::from(cfg))
        .with_progress(move |progress| spinner::report_scan_progress(&progress_span, progress));

    Ok(scanner.scan(subnet).instrument(span).await?)
}

fn print_subnet(subnet: &Subnet, overridden: bool, cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }
    let source: &str = if overridden { "given" } else { "discovered" };
    print::aligned_line("Subnet", format!("{} ({source})", format::subnet(subnet)));
    print::aligned_line("Host range", format::host_range(subnet));
    print::aligned_line("Usable hosts", subnet.host_count().to_string());
}

fn scan_ends(result: &ScanResult, total_time: Duration, cfg: &Config) {
    print::header("scan report", cfg.quiet);
    for line in result.report().lines() {
        print::print(line);
    }
    print_summary(result.alive().len(), total_time, cfg);
}

fn print_summary(alive: usize, total_time: Duration, cfg: &Config) {
    let active_hosts: ColoredString = format!("{alive} alive hosts").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Scan Complete: {active_hosts} identified in {total_time}").color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        1 => print::print_status(output.to_string()),
        _ => {}
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
