//! # Subnet Sweep
//!
//! Probes every usable host of a [`Subnet`] through a bounded worker pool.
//!
//! **Concurrency model:**
//! * each host gets its own task, but a [`Semaphore`] lets at most
//!   `concurrency` of them run a probe at once;
//! * workers send `(host, alive)` over a channel and never touch the result;
//!   the scanning task is the single owner that drains the channel and mutates
//!   the [`ScanResult`], in completion order;
//! * every probe sits under a hard deadline of its effective timeout plus
//!   `grace`, so a hung check resolves as dead instead of stalling the sweep;
//! * the sweep joins all workers before returning. A worker that died without
//!   reporting leaves its host unresolved, and [`ScanResult::finalize`] marks it dead.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use groper_common::config::{Config, DEFAULT_CONCURRENCY, DEFAULT_GRACE, DEFAULT_TIMEOUT};
use groper_common::{NetworkError, ScanResult, Subnet};
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::probe::ReachabilityProbe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Budget handed to each probe.
    pub timeout: Duration,
    /// Probes allowed in flight at once. 0 is treated as 1.
    pub concurrency: usize,
    /// Slack on top of `timeout` before a probe is abandoned.
    pub grace: Duration,
}

impl ScanOptions {
    /// Deadline past which a probe is abandoned: its effective timeout plus grace.
    pub fn hard_deadline(&self, probe: &dyn ReachabilityProbe) -> Duration {
        probe.effective_timeout(self.timeout) + self.grace
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            grace: DEFAULT_GRACE,
        }
    }
}

impl From<&Config> for ScanOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            timeout: cfg.timeout,
            concurrency: cfg.concurrency,
            grace: cfg.grace,
        }
    }
}

/// Snapshot handed to the progress callback after each host resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanProgress {
    pub completed: usize,
    pub total: usize,
    pub alive: usize,
}

type ProgressCallback = Box<dyn Fn(ScanProgress) + Send + Sync>;

pub struct NetworkScanner {
    probe: Arc<dyn ReachabilityProbe>,
    options: ScanOptions,
    on_progress: Option<ProgressCallback>,
}

impl NetworkScanner {
    pub fn new(probe: Arc<dyn ReachabilityProbe>) -> Self {
        Self {
            probe,
            options: ScanOptions::default(),
            on_progress: None,
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_progress(mut self, callback: impl Fn(ScanProgress) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Sweeps `subnet` and returns once every host is classified.
    ///
    /// # Errors
    /// [`NetworkError::UnsupportedSubnet`] if the block is larger than a /22.
    /// Individual probe failures are never errors; those hosts are dead.
    pub async fn scan(&self, subnet: Subnet) -> Result<ScanResult, NetworkError> {
        subnet.ensure_scannable()?;

        let mut result: ScanResult = ScanResult::new(subnet);
        let total: usize = result.hosts_scanned().len();
        let limit: usize = self.options.concurrency.max(1);
        info!("Probing {total} hosts in {subnet}, {limit} at a time");

        let semaphore: Arc<Semaphore> = Arc::new(Semaphore::new(limit));
        let (tx, mut rx) = mpsc::unbounded_channel::<(Ipv4Addr, bool)>();
        let mut workers: JoinSet<()> = JoinSet::new();

        for &host in result.hosts_scanned() {
            let probe: Arc<dyn ReachabilityProbe> = Arc::clone(&self.probe);
            let semaphore: Arc<Semaphore> = Arc::clone(&semaphore);
            let tx = tx.clone();
            let options: ScanOptions = self.options;

            workers.spawn(async move {
                let is_alive: bool = match semaphore.acquire_owned().await {
                    Ok(_permit) => guarded_probe(probe.as_ref(), host, &options).await,
                    Err(_closed) => false,
                };
                let _ = tx.send((host, is_alive));
            });
        }
        drop(tx);

        let mut completed: usize = 0;
        while let Some((host, is_alive)) = rx.recv().await {
            if !result.record(host, is_alive) {
                continue;
            }
            completed += 1;
            if is_alive {
                debug!("{host} is alive");
            }
            self.report_progress(ScanProgress {
                completed,
                total,
                alive: result.alive().len(),
            });
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                warn!("Probe worker failed: {e}");
            }
        }

        let unresolved: usize = result.finalize();
        if unresolved > 0 {
            warn!("{unresolved} hosts never reported back and were marked dead");
        }

        info!(
            "Sweep of {subnet} finished: {} alive, {} dead",
            result.alive().len(),
            result.dead().len()
        );
        Ok(result)
    }

    fn report_progress(&self, progress: ScanProgress) {
        if let Some(callback) = &self.on_progress {
            callback(progress);
        }
    }
}

async fn guarded_probe(probe: &dyn ReachabilityProbe, host: Ipv4Addr, options: &ScanOptions) -> bool {
    let deadline: Duration = options.hard_deadline(probe);
    match tokio::time::timeout(deadline, probe.probe(host, options.timeout)).await {
        Ok(is_alive) => is_alive,
        Err(_elapsed) => {
            debug!("Probe of {host} overran {deadline:?}");
            false
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
