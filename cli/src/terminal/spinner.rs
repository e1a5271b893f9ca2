use colored::*;
use groper_core::ScanProgress;
use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn sweep_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {bar:30.green/black} {pos:>4}/{len:<4} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICKS)
        .progress_chars("■■·")
}

/// Turns `span` into a progress bar over `total` hosts.
pub fn prepare(span: &Span, total: u64) {
    span.pb_set_style(&sweep_style());
    span.pb_set_length(total);
    span.pb_set_message("probing...");
}

pub fn report_scan_progress(span: &Span, progress: ScanProgress) {
    span.pb_set_position(progress.completed as u64);
    span.pb_set_message(&format!("{} alive so far", progress.alive.to_string().green().bold()));
}
