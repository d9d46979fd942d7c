use std::sync::Arc;
use std::time::Duration;

use crate::scenario::BoxFuture;

/// Host-side clock handed to module code.
///
/// Modules are separately compiled and may not share the host's async runtime
/// state, so waiting is always delegated back to the host.
pub trait Timer: Send + Sync {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Passed to every scenario invocation.
#[derive(Clone)]
pub struct ScenarioContext {
    pub scenario: Arc<str>,
    /// Index of the loop (closed model) or injection tick (open model) that started this call.
    pub copy: u64,
    pub invocation: u64,
    timer: Arc<dyn Timer>,
}

impl ScenarioContext {
    #[must_use]
    pub fn new(scenario: Arc<str>, copy: u64, invocation: u64, timer: Arc<dyn Timer>) -> Self {
        Self {
            scenario,
            copy,
            invocation,
            timer,
        }
    }

    pub fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        self.timer.sleep(duration)
    }
}

impl std::fmt::Debug for ScenarioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioContext")
            .field("scenario", &self.scenario)
            .field("copy", &self.copy)
            .field("invocation", &self.invocation)
            .finish_non_exhaustive()
    }
}

/// Passed to init/clean hooks.
#[derive(Clone)]
pub struct HookContext {
    pub scenario: Arc<str>,
    timer: Arc<dyn Timer>,
}

impl HookContext {
    #[must_use]
    pub fn new(scenario: Arc<str>, timer: Arc<dyn Timer>) -> Self {
        Self { scenario, timer }
    }

    pub fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        self.timer.sleep(duration)
    }
}

impl std::fmt::Debug for HookContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookContext")
            .field("scenario", &self.scenario)
            .finish_non_exhaustive()
    }
}
