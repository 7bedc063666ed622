//! Poll → classify → dispatch loop shared by the daemon and `--once` mode.

use chrono::Utc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::engine::{AlertEngine, CycleStats};
use super::source::FeedSource;
use crate::registry::RegistryRefresher;

/// Totals across every cycle the loop ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub cycles: u64,
    pub feed_errors: u64,
    pub totals: CycleStats,
}

/// Owns the engine and drives it once per poll interval.
///
/// Built with [`new()`](PollingLoop::new), optionally given a registry
/// refresher or a cycle limit, then consumed by [`run()`](PollingLoop::run).
pub struct PollingLoop {
    engine: AlertEngine,
    interval: Duration,
    cancel_token: CancellationToken,
    refresher: Option<RegistryRefresher>,
    max_cycles: Option<u64>,
}

impl PollingLoop {
    pub fn new(engine: AlertEngine, interval: Duration, cancel_token: CancellationToken) -> Self {
        Self {
            engine,
            interval,
            cancel_token,
            refresher: None,
            max_cycles: None,
        }
    }

    pub fn with_refresher(mut self, refresher: RegistryRefresher) -> Self {
        self.refresher = Some(refresher);
        self
    }

    /// Stop after `cycles` poll cycles (`--once` is `1`).
    pub fn with_max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = Some(cycles);
        self
    }

    /// Run until cancelled or the cycle limit is reached.
    pub async fn run<S: FeedSource>(mut self, source: &mut S) -> LoopStats {
        let mut stats = LoopStats::default();

        info!(
            source = source.source_name(),
            interval_secs = self.interval.as_secs(),
            "Watching for aircraft"
        );

        while !self.cancel_token.is_cancelled() {
            if self.max_cycles.is_some_and(|max| stats.cycles >= max) {
                break;
            }
            let started = Instant::now();

            self.refresh_registry().await;

            let polled = tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    info!("[PollingLoop] Shutdown signal received");
                    break;
                }
                result = source.poll() => result,
            };
            stats.cycles += 1;

            match polled {
                Ok(reports) => {
                    stats.totals += self.engine.run_cycle(&reports, Utc::now()).await;
                }
                Err(e) => {
                    stats.feed_errors += 1;
                    warn!("[PollingLoop] Feed error, skipping cycle: {}", e);
                }
            }

            if self.max_cycles.is_some_and(|max| stats.cycles >= max) {
                break;
            }

            let pause = self.interval.saturating_sub(started.elapsed());
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    info!("[PollingLoop] Shutdown signal received");
                    break;
                }
                () = tokio::time::sleep(pause) => {}
            }
        }

        info!(
            cycles = stats.cycles,
            feed_errors = stats.feed_errors,
            seen = stats.totals.seen,
            alerted = stats.totals.alerted,
            delivered = stats.totals.delivered,
            undelivered = stats.totals.undelivered,
            throttled = stats.totals.throttled,
            rejected = stats.totals.rejected,
            "Final statistics"
        );
        stats
    }

    async fn refresh_registry(&mut self) {
        let Some(refresher) = self.refresher.as_mut() else {
            return;
        };
        let result = tokio::select! {
            _ = self.cancel_token.cancelled() => return,
            result = refresher.refresh_if_stale() => result,
        };
        match result {
            Ok(Some(registry)) => self.engine.replace_registry(Box::new(registry)),
            Ok(None) => {}
            Err(e) => warn!("Aircraft registry refresh failed, keeping previous copy: {}", e),
        }
    }
}
