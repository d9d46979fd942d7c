use std::future::Future;

use loadr_abi::contracts::ScenarioProps;
use tracing::info;

use crate::module::LoadedModule;

/// Load-generation engine the aggregated scenarios are handed to.
///
/// `register_scenarios` is called exactly once with a non-empty list, then `run`.
pub trait Engine {
    type Output;

    fn register_scenarios(&mut self, scenarios: Vec<ScenarioProps>);

    fn run(self) -> impl Future<Output = Self::Output>;
}

/// Non-empty, ordered scenarios plus the modules they came from.
#[derive(Debug)]
pub struct ScenarioSet {
    scenarios: Vec<ScenarioProps>,
    modules: Vec<LoadedModule>,
}

impl ScenarioSet {
    pub(crate) fn new(scenarios: Vec<ScenarioProps>, modules: Vec<LoadedModule>) -> Self {
        Self { scenarios, modules }
    }

    pub fn scenarios(&self) -> &[ScenarioProps] {
        &self.scenarios
    }

    pub fn modules(&self) -> &[LoadedModule] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(ScenarioProps::name)
    }
}

/// Registers the scenarios with `engine` and runs it to completion.
///
/// The engine's output is returned untouched. It may keep scenarios alive past
/// this call: loaded libraries are never unloaded.
pub async fn handoff<E: Engine>(mut engine: E, set: ScenarioSet) -> E::Output {
    let ScenarioSet { scenarios, modules } = set;
    info!(
        scenarios = scenarios.len(),
        modules = modules.len(),
        "handing scenarios to engine"
    );

    engine.register_scenarios(scenarios);
    engine.run().await
}
