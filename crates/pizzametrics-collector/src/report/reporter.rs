use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use pizzametrics_core::error::Result;
use pizzametrics_core::model::{HttpVerb, MetricsSnapshot};
use pizzametrics_core::protocol::line::MetricRecord;

use crate::config::MetricsSection;
use crate::obs::{Collector, HostProbe, SystemProbe};

use super::sink::{HttpSink, MetricSink};

/// Every measurement of one tick, in wire order.
pub fn measurements(s: &MetricsSnapshot, cpu: f64, memory: f64) -> Vec<MetricRecord<'static>> {
    vec![
        MetricRecord::new("request", "all", "total", s.total_requests),
        MetricRecord::new("request", HttpVerb::Post.label(), "total", s.post_requests),
        MetricRecord::new("request", HttpVerb::Get.label(), "total", s.get_requests),
        MetricRecord::new("request", HttpVerb::Delete.label(), "total", s.delete_requests),
        MetricRecord::new("request", HttpVerb::Put.label(), "total", s.put_requests),
        MetricRecord::new("cpu", "all", "usage", cpu),
        MetricRecord::new("memory", "all", "usage", memory),
        MetricRecord::new("order", "all", "total", s.pizzas_ordered),
        MetricRecord::new("user", "all", "active", s.active_users),
        MetricRecord::new("auth", "all", "success", s.auth_successes),
        MetricRecord::new("auth", "all", "failure", s.auth_failures),
        MetricRecord::new("order", "all", "revenue", s.revenue),
        MetricRecord::new("order", "all", "failure", s.creation_failures),
        MetricRecord::new("order", "all", "latency", s.creation_latency),
    ]
}

/// Periodic reporter: snapshot, format, dispatch.
///
/// Each line is pushed on its own task. A tick never waits for its pushes,
/// so a slow endpoint can make ticks overlap; lost pushes are not retried.
pub struct Reporter {
    collector: Arc<Collector>,
    sink: Arc<dyn MetricSink>,
    probe: Arc<dyn HostProbe>,
    source: String,
    interval: Duration,
    ticks: AtomicU64,
}

impl Reporter {
    pub fn new(
        collector: Arc<Collector>,
        sink: Arc<dyn MetricSink>,
        probe: Arc<dyn HostProbe>,
        source: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            collector,
            sink,
            probe,
            source: source.into(),
            interval,
            ticks: AtomicU64::new(0),
        }
    }

    /// Reporter pushing over HTTP and sampling the live host.
    pub fn from_config(collector: Arc<Collector>, cfg: &MetricsSection) -> Result<Self> {
        let sink = HttpSink::new(cfg)?;
        Ok(Self::new(
            collector,
            Arc::new(sink),
            Arc::new(SystemProbe),
            cfg.source.clone(),
            cfg.report_interval(),
        ))
    }

    /// Ticks started so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Run one tick: take a snapshot, sample the host and spawn one push per
    /// measurement. Must be called from within a Tokio runtime.
    ///
    /// The returned handles resolve to each push's outcome; dropping them
    /// detaches the pushes.
    pub fn tick(&self) -> Vec<JoinHandle<Result<()>>> {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        let snapshot = self.collector.snapshot();
        let records = measurements(
            &snapshot,
            self.probe.cpu_usage_percent(),
            self.probe.memory_usage_percent(),
        );

        tracing::debug!(tick, records = records.len(), "reporting");

        let mut handles = Vec::with_capacity(records.len());
        for record in &records {
            let body = match record.encode(&self.source) {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        code = e.code().as_str(),
                        error = %e,
                        category = record.category,
                        name = record.name,
                        "skipping unformattable metric"
                    );
                    continue;
                }
            };
            handles.push(tokio::spawn(dispatch(Arc::clone(&self.sink), body)));
        }
        handles
    }

    /// Start the periodic loop. The first tick fires one interval from now.
    pub fn spawn(self: Arc<Self>) -> ReporterHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            // tokio rejects a zero period.
            let period = self.interval.max(Duration::from_millis(1));
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(
                interval_ms = self.interval.as_millis() as u64,
                source = %self.source,
                "metrics reporter started"
            );

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        // Fire and forget: the next tick must not wait on these.
                        drop(self.tick());
                    }
                }
            }

            tracing::info!(ticks = self.ticks(), "metrics reporter stopped");
        });

        ReporterHandle { cancel, task }
    }
}

async fn dispatch(sink: Arc<dyn MetricSink>, body: Bytes) -> Result<()> {
    let res = sink.push(body.clone()).await;
    let line = String::from_utf8_lossy(&body);
    match &res {
        Ok(()) => tracing::debug!(%line, "pushed metric"),
        Err(e) => tracing::warn!(
            code = e.code().as_str(),
            error = %e,
            %line,
            "failed to push metric"
        ),
    }
    res
}

/// Control handle for a running reporter loop.
pub struct ReporterHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ReporterHandle {
    /// Stop scheduling ticks. In-flight pushes keep running on their own.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token that stops the loop when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for the loop task to exit after `shutdown`.
    pub async fn stopped(self) {
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "metrics reporter task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_order_and_values() {
        let s = MetricsSnapshot {
            total_requests: 9,
            post_requests: 1,
            get_requests: 5,
            delete_requests: 1,
            put_requests: 1,
            auth_successes: 3,
            auth_failures: 2,
            active_users: -1,
            pizzas_ordered: 4,
            revenue: 12.5,
            creation_failures: 1,
            creation_latency: 80.0,
        };
        let lines: Vec<String> = measurements(&s, 25.5, 61.25)
            .iter()
            .filter_map(|r| r.to_line("src").ok())
            .collect();

        assert_eq!(
            lines,
            vec![
                "request,source=src,method=all total=9",
                "request,source=src,method=post total=1",
                "request,source=src,method=get total=5",
                "request,source=src,method=delete total=1",
                "request,source=src,method=put total=1",
                "cpu,source=src,method=all usage=25.5",
                "memory,source=src,method=all usage=61.25",
                "order,source=src,method=all total=4",
                "user,source=src,method=all active=-1",
                "auth,source=src,method=all success=3",
                "auth,source=src,method=all failure=2",
                "order,source=src,method=all revenue=12.5",
                "order,source=src,method=all failure=1",
                "order,source=src,method=all latency=80",
            ]
        );
    }
}
