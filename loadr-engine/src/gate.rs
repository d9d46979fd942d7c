use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Hands out invocation numbers to closed-model copies until the deadline passes.
#[derive(Debug)]
pub(crate) struct DeadlineGate {
    counter: AtomicU64,
    duration: Duration,
    deadline: OnceLock<Instant>,
}

impl DeadlineGate {
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            counter: AtomicU64::new(0),
            duration,
            deadline: OnceLock::new(),
        }
    }

    pub(crate) fn start_at(&self, started: Instant) {
        let _ = self.deadline.set(started + self.duration);
    }

    pub(crate) fn start(&self) {
        self.start_at(Instant::now());
    }

    pub(crate) fn next(&self) -> Option<u64> {
        let now = Instant::now();

        // Lazily start from the first observed invocation if nobody called `start`.
        if self.deadline.get().is_none() {
            self.start_at(now);
        }

        if let Some(deadline) = self.deadline.get()
            && now >= *deadline
        {
            return None;
        }

        Some(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}
