use loadr_core::{Engine, ScenarioProps};
use loadr_engine::{RunSummary, Runner};
use tracing::info;

/// Hands aggregated scenarios to the bundled engine.
#[derive(Default)]
pub struct LocalEngine {
    runner: Runner,
}

impl LocalEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Engine for LocalEngine {
    type Output = loadr_engine::Result<RunSummary>;

    fn register_scenarios(&mut self, scenarios: Vec<ScenarioProps>) {
        self.runner.register_scenarios(scenarios);
    }

    async fn run(self) -> Self::Output {
        let summary = self.runner.run().await?;
        for s in &summary.scenarios {
            info!(
                scenario = %s.name,
                ok = s.ok,
                failed = s.failed,
                panicked = s.panicked,
                bytes = s.bytes_total,
                p50_ms = s.latency_p50_ms,
                p99_ms = s.latency_p99_ms,
                init_error = s.init_error.as_deref(),
                clean_error = s.clean_error.as_deref(),
                "scenario finished"
            );
        }
        Ok(summary)
    }
}
