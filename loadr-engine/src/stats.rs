use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use hdrhistogram::Histogram;
use loadr_contracts::Response;

#[derive(Debug)]
pub(crate) struct ScenarioStats {
    ok: AtomicU64,
    failed: AtomicU64,
    panicked: AtomicU64,
    bytes: AtomicU64,
    latency_us: Mutex<Histogram<u64>>,
}

impl Default for ScenarioStats {
    fn default() -> Self {
        let latency_us = Histogram::<u64>::new_with_bounds(1, 60_000_000, 3)
            .unwrap_or_else(|err| panic!("failed to init histogram: {err}"));
        Self {
            ok: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            panicked: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
            latency_us: Mutex::new(latency_us),
        }
    }
}

impl ScenarioStats {
    pub(crate) fn record(&self, response: &Response, elapsed: Duration) {
        if response.ok {
            self.ok.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        self.bytes
            .fetch_add(response.size_bytes, Ordering::Relaxed);

        let us = elapsed.as_micros();
        if us == 0 {
            return;
        }
        let value = u64::try_from(us).unwrap_or(u64::MAX);
        let mut h = self
            .latency_us
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = h.saturating_record(value);
    }

    /// A copy or injected invocation panicked; counted as a failure.
    pub(crate) fn record_panic(&self) {
        self.panicked.fetch_add(1, Ordering::Relaxed);
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn summary(
        &self,
        name: &str,
        init_error: Option<String>,
        clean_error: Option<String>,
    ) -> ScenarioSummary {
        let h = self
            .latency_us
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let (latency_p50_ms, latency_p99_ms, latency_max_ms) = if h.is_empty() {
            (None, None, None)
        } else {
            (
                Some(h.value_at_quantile(0.50) as f64 / 1000.0),
                Some(h.value_at_quantile(0.99) as f64 / 1000.0),
                Some(h.max() as f64 / 1000.0),
            )
        };

        ScenarioSummary {
            name: name.to_string(),
            ok: self.ok.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            panicked: self.panicked.load(Ordering::Relaxed),
            bytes_total: self.bytes.load(Ordering::Relaxed),
            latency_p50_ms,
            latency_p99_ms,
            latency_max_ms,
            init_error,
            clean_error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSummary {
    pub name: String,
    pub ok: u64,
    pub failed: u64,
    /// Included in `failed`.
    pub panicked: u64,
    pub bytes_total: u64,
    pub latency_p50_ms: Option<f64>,
    pub latency_p99_ms: Option<f64>,
    pub latency_max_ms: Option<f64>,
    pub init_error: Option<String>,
    pub clean_error: Option<String>,
}

impl ScenarioSummary {
    pub fn requests_total(&self) -> u64 {
        self.ok.saturating_add(self.failed)
    }

    pub fn hooks_failed(&self) -> bool {
        self.init_error.is_some() || self.clean_error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// In registration order.
    pub scenarios: Vec<ScenarioSummary>,
    pub run_duration_ms: u64,
}

impl RunSummary {
    pub fn failed_total(&self) -> u64 {
        self.scenarios.iter().map(|s| s.failed).sum()
    }

    pub fn hooks_failed(&self) -> bool {
        self.scenarios.iter().any(ScenarioSummary::hooks_failed)
    }
}
