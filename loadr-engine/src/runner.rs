use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use loadr_contracts::{HookContext, HookFn, LoadSimulation, ScenarioProps, Timer};
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::simulation::{Invoker, execute, warm_up};
use crate::stats::{RunSummary, ScenarioStats, ScenarioSummary};
use crate::timer::TokioTimer;

/// Registration and execution entry point of the engine.
pub struct Runner {
    scenarios: Vec<ScenarioProps>,
    timer: Arc<dyn Timer>,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            scenarios: Vec::new(),
            timer: Arc::new(TokioTimer),
        }
    }
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom clock for the contexts handed to scenario code.
    #[must_use]
    pub fn with_timer(mut self, timer: Arc<dyn Timer>) -> Self {
        self.timer = timer;
        self
    }

    pub fn register_scenarios(
        &mut self,
        scenarios: impl IntoIterator<Item = ScenarioProps>,
    ) -> &mut Self {
        self.scenarios.extend(scenarios);
        self
    }

    pub fn scenarios(&self) -> &[ScenarioProps] {
        &self.scenarios
    }

    /// Runs every registered scenario concurrently and waits for all of them.
    pub async fn run(self) -> Result<RunSummary> {
        validate(&self.scenarios)?;

        let started = Instant::now();
        info!(scenarios = self.scenarios.len(), "run started");

        let mut tasks = JoinSet::new();
        for (idx, scenario) in self.scenarios.into_iter().enumerate() {
            let timer = self.timer.clone();
            tasks.spawn(async move { (idx, run_scenario(scenario, timer).await) });
        }

        // Drain every task before reporting a failure: scenario code must not
        // be left running after `run` returns.
        let mut summaries = Vec::with_capacity(tasks.len());
        let mut failure = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(done) => summaries.push(done),
                Err(err) => {
                    error!("scenario task failed: {err}");
                    failure.get_or_insert(err);
                }
            }
        }
        if let Some(err) = failure {
            return Err(err.into());
        }
        summaries.sort_by_key(|(idx, _)| *idx);

        let summary = RunSummary {
            scenarios: summaries.into_iter().map(|(_, s)| s).collect(),
            run_duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        info!(
            run_duration_ms = summary.run_duration_ms,
            failed = summary.failed_total(),
            "run finished"
        );
        Ok(summary)
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("scenarios", &self.scenarios)
            .finish_non_exhaustive()
    }
}

fn validate(scenarios: &[ScenarioProps]) -> Result<()> {
    if scenarios.is_empty() {
        return Err(Error::NoScenarios);
    }

    let mut seen = HashSet::with_capacity(scenarios.len());
    for s in scenarios {
        let name = s.name();
        if name.trim().is_empty() {
            return Err(Error::EmptyScenarioName);
        }
        if !seen.insert(name) {
            return Err(Error::DuplicateScenario(name.to_string()));
        }

        // Hook-only scenarios never apply load, so their simulations are irrelevant.
        if s.run_fn().is_none() {
            continue;
        }
        for sim in s.load_simulations() {
            validate_simulation(name, sim)?;
        }
    }

    Ok(())
}

fn validate_simulation(name: &str, sim: &LoadSimulation) -> Result<()> {
    match *sim {
        LoadSimulation::KeepConstant { copies, .. } if copies == 0 => {
            return Err(Error::InvalidCopies(name.to_string()));
        }
        LoadSimulation::Inject { rate, .. } if rate == 0 => {
            return Err(Error::InvalidRate(name.to_string()));
        }
        LoadSimulation::Inject { interval, .. } if interval.is_zero() => {
            return Err(Error::InvalidInterval(name.to_string()));
        }
        _ => {}
    }

    if sim.during().is_zero() {
        return Err(Error::InvalidDuring(name.to_string()));
    }
    Ok(())
}

async fn run_scenario(scenario: ScenarioProps, timer: Arc<dyn Timer>) -> ScenarioSummary {
    let name: Arc<str> = Arc::from(scenario.name());
    let stats = Arc::new(ScenarioStats::default());
    let hook_ctx = HookContext::new(name.clone(), timer.clone());

    let init_error = match scenario.init_fn() {
        Some(init) => run_hook("init", &name, init, hook_ctx.clone()).await,
        None => None,
    };

    if init_error.is_none()
        && let Some(run) = scenario.run_fn()
    {
        let invoker = Invoker {
            scenario: name.clone(),
            run: run.clone(),
            timer,
            stats: stats.clone(),
        };

        if let Some(duration) = scenario.warm_up()
            && let Some(first) = scenario.load_simulations().first()
        {
            info!(scenario = %name, ?duration, "warm-up started");
            warm_up(&invoker, *first, duration).await;
        }

        for sim in scenario.load_simulations() {
            execute(&invoker, *sim).await;
        }
    }

    let clean_error = match scenario.clean_fn() {
        Some(clean) => run_hook("clean", &name, clean, hook_ctx).await,
        None => None,
    };

    stats.summary(&name, init_error, clean_error)
}

async fn run_hook(
    hook: &'static str,
    scenario: &str,
    f: &HookFn,
    ctx: HookContext,
) -> Option<String> {
    info!(scenario, hook, "hook started");
    match f(ctx).await {
        Ok(()) => None,
        Err(err) => {
            error!(scenario, hook, "hook failed: {err}");
            Some(err)
        }
    }
}
