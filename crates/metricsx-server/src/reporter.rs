//! Periodic registry reporter.
//!
//! Logs the metric count and the rendered tree at `debug` on every tick, and
//! once more when shutdown is signalled.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use metricsx_core::error::Result;
use metricsx_core::render::render_tree;
use metricsx_core::MetricRegistry;

pub struct Reporter {
    metrics: Arc<MetricRegistry>,
    interval: Duration,
}

impl Reporter {
    pub fn new(metrics: Arc<MetricRegistry>, interval: Duration) -> Self {
        Self { metrics, interval }
    }

    /// Render and log one report. Returns the rendered tree.
    pub fn report(&self) -> Result<String> {
        let snapshot = self.metrics.snapshot();
        let tree = render_tree(&snapshot)?;
        tracing::debug!(metrics = snapshot.len(), "metrics report:{tree}");
        Ok(tree)
    }

    /// Run until `shutdown` fires (or its sender is dropped), then report once more.
    pub fn spawn(self, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => self.report_logged(),
                    _ = shutdown.recv() => break,
                }
            }

            tracing::info!("reporter stopping; final report");
            self.report_logged();
        })
    }

    fn report_logged(&self) {
        if let Err(e) = self.report() {
            tracing::warn!(error = %e, "metrics report failed");
        }
    }
}
