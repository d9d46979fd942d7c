use std::sync::Arc;
use std::time::{Duration, Instant};

use loadr_contracts::{LoadSimulation, ScenarioContext, ScenarioFn, Timer};
use tokio::task::{JoinError, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::gate::DeadlineGate;
use crate::stats::ScenarioStats;

#[derive(Clone)]
pub(crate) struct Invoker {
    pub(crate) scenario: Arc<str>,
    pub(crate) run: ScenarioFn,
    pub(crate) timer: Arc<dyn Timer>,
    pub(crate) stats: Arc<ScenarioStats>,
}

impl Invoker {
    async fn invoke(&self, copy: u64, invocation: u64) {
        let ctx = ScenarioContext::new(self.scenario.clone(), copy, invocation, self.timer.clone());
        let started = Instant::now();
        match (self.run)(ctx).await {
            Ok(response) => self.stats.record(&response, started.elapsed()),
            Err(reason) => {
                debug!(scenario = %self.scenario, copy, invocation, "invocation panicked: {reason}");
                self.stats.record_panic();
            }
        }
    }

    fn with_stats(&self, stats: Arc<ScenarioStats>) -> Self {
        Self {
            stats,
            ..self.clone()
        }
    }
}

/// Runs one simulation to completion.
pub(crate) async fn execute(invoker: &Invoker, simulation: LoadSimulation) {
    debug!(scenario = %invoker.scenario, ?simulation, "simulation started");
    match simulation {
        LoadSimulation::KeepConstant { copies, during } => {
            keep_constant(invoker, copies, during).await;
        }
        LoadSimulation::Inject {
            rate,
            interval,
            during,
        } => inject(invoker, rate, interval, during).await,
    }
    debug!(scenario = %invoker.scenario, ?simulation, "simulation finished");
}

/// Runs `simulation` shortened to `duration`, discarding the results.
pub(crate) async fn warm_up(invoker: &Invoker, simulation: LoadSimulation, duration: Duration) {
    let scratch = invoker.with_stats(Arc::new(ScenarioStats::default()));
    execute(&scratch, simulation.with_during(duration)).await;
}

async fn keep_constant(invoker: &Invoker, copies: u64, during: Duration) {
    let gate = Arc::new(DeadlineGate::new(during));
    gate.start();

    let mut tasks = JoinSet::new();
    for copy in 0..copies {
        let invoker = invoker.clone();
        let gate = gate.clone();
        tasks.spawn(async move {
            while let Some(invocation) = gate.next() {
                invoker.invoke(copy, invocation).await;
            }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        reap(invoker, joined);
    }
}

async fn inject(invoker: &Invoker, rate: u64, interval: Duration, during: Duration) {
    let deadline = Instant::now() + during;
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut tasks = JoinSet::new();
    let mut tick: u64 = 0;
    let mut invocation: u64 = 0;
    loop {
        ticker.tick().await;
        if Instant::now() >= deadline {
            break;
        }

        for _ in 0..rate {
            let invoker = invoker.clone();
            let n = invocation;
            invocation = invocation.saturating_add(1);
            tasks.spawn(async move { invoker.invoke(tick, n).await });
        }
        tick = tick.saturating_add(1);

        while let Some(joined) = tasks.try_join_next() {
            reap(invoker, joined);
        }
    }

    while let Some(joined) = tasks.join_next().await {
        reap(invoker, joined);
    }
}

fn reap(invoker: &Invoker, joined: Result<(), JoinError>) {
    if let Err(err) = joined {
        warn!(scenario = %invoker.scenario, "invocation aborted: {err}");
        invoker.stats.record_panic();
    }
}
