use loadr_abi::contracts::ScenarioProps;
use tracing::{debug, error, info};

use crate::discovery::discover;
use crate::error::{Diagnostic, NoScenariosFound};
use crate::handoff::ScenarioSet;
use crate::loader::ModuleLoader;
use crate::module::{LoadedModule, ModulePath};

#[derive(Debug)]
pub struct Aggregator<L> {
    loader: L,
}

impl<L: ModuleLoader> Aggregator<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Loads and discovers every path in order and concatenates the results.
    ///
    /// A path that fails to load is logged and contributes nothing; it never
    /// prevents later paths from being processed.
    pub fn aggregate<I, P>(&self, paths: I) -> Aggregation
    where
        I: IntoIterator<Item = P>,
        P: Into<ModulePath>,
    {
        let mut out = Aggregation::default();

        for path in paths {
            let path = path.into();
            let module = match self.loader.load(&path) {
                Ok(module) => module,
                Err(err) => {
                    error!(path = %path, "{err}");
                    out.diagnostics.push(Diagnostic::Load(err));
                    continue;
                }
            };

            let before = out.scenarios.len();
            let diagnostics = discover(&module, |scenario| out.scenarios.push(scenario));
            out.diagnostics
                .extend(diagnostics.into_iter().map(Diagnostic::Discovery));
            debug!(
                path = %path,
                markers = module.markers().len(),
                scenarios = out.scenarios.len() - before,
                "module discovered"
            );

            out.modules.push(module);
        }

        info!(
            scenarios = out.scenarios.len(),
            modules = out.modules.len(),
            failures = out.diagnostics.len(),
            "aggregation finished"
        );
        out
    }
}

/// Result of one aggregation pass.
#[derive(Debug, Default)]
pub struct Aggregation {
    scenarios: Vec<ScenarioProps>,
    diagnostics: Vec<Diagnostic>,
    modules: Vec<LoadedModule>,
}

impl Aggregation {
    pub fn scenarios(&self) -> &[ScenarioProps] {
        &self.scenarios
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn modules(&self) -> &[LoadedModule] {
        &self.modules
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn scenario_names(&self) -> Vec<&str> {
        self.scenarios.iter().map(ScenarioProps::name).collect()
    }

    /// Converts into the set handed to the engine, or reports that there is nothing to run.
    pub fn into_set(self) -> Result<ScenarioSet, NoScenariosFound> {
        if self.scenarios.is_empty() {
            return Err(NoScenariosFound);
        }
        Ok(ScenarioSet::new(self.scenarios, self.modules))
    }
}
