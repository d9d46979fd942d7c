use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::context::{HookContext, ScenarioContext};
use crate::panic::{CatchPanic, catch_panic};
use crate::response::Response;
use crate::simulation::LoadSimulation;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// `Err` carries the panic message of an invocation that panicked.
pub type InvocationResult = Result<Response, String>;

pub type ScenarioFn =
    Arc<dyn Fn(ScenarioContext) -> BoxFuture<'static, InvocationResult> + Send + Sync>;

pub type HookResult = Result<(), String>;

pub type HookFn = Arc<dyn Fn(HookContext) -> BoxFuture<'static, HookResult> + Send + Sync>;

const DEFAULT_WARM_UP: Duration = Duration::from_secs(30);

/// One load-test scenario as registered with the engine.
///
/// A scenario without a run function (see [`ScenarioProps::empty`]) only
/// executes its init/clean hooks.
#[derive(Clone)]
pub struct ScenarioProps {
    name: String,
    run: Option<ScenarioFn>,
    init: Option<HookFn>,
    clean: Option<HookFn>,
    warm_up: Option<Duration>,
    load_simulations: Vec<LoadSimulation>,
}

impl ScenarioProps {
    pub fn create<F, Fut>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn(ScenarioContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let run: ScenarioFn =
            Arc::new(move |ctx: ScenarioContext| -> BoxFuture<'static, InvocationResult> {
                match catch_panic(|| run(ctx)) {
                    Ok(invocation) => Box::pin(CatchPanic::new(invocation)),
                    Err(reason) => Box::pin(std::future::ready(Err(reason))),
                }
            });
        Self {
            run: Some(run),
            ..Self::empty(name)
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            run: None,
            init: None,
            clean: None,
            warm_up: Some(DEFAULT_WARM_UP),
            load_simulations: vec![LoadSimulation::default()],
        }
    }

    #[must_use]
    pub fn with_init<F, Fut>(mut self, init: F) -> Self
    where
        F: Fn(HookContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult> + Send + 'static,
    {
        self.init = Some(guard_hook(init));
        self
    }

    #[must_use]
    pub fn with_clean<F, Fut>(mut self, clean: F) -> Self
    where
        F: Fn(HookContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult> + Send + 'static,
    {
        self.clean = Some(guard_hook(clean));
        self
    }

    #[must_use]
    pub fn with_warm_up(mut self, duration: Duration) -> Self {
        self.warm_up = Some(duration);
        self
    }

    #[must_use]
    pub fn without_warm_up(mut self) -> Self {
        self.warm_up = None;
        self
    }

    #[must_use]
    pub fn with_load_simulations(
        mut self,
        simulations: impl IntoIterator<Item = LoadSimulation>,
    ) -> Self {
        self.load_simulations = simulations.into_iter().collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run_fn(&self) -> Option<&ScenarioFn> {
        self.run.as_ref()
    }

    pub fn init_fn(&self) -> Option<&HookFn> {
        self.init.as_ref()
    }

    pub fn clean_fn(&self) -> Option<&HookFn> {
        self.clean.as_ref()
    }

    pub fn warm_up(&self) -> Option<Duration> {
        self.warm_up
    }

    pub fn load_simulations(&self) -> &[LoadSimulation] {
        &self.load_simulations
    }
}

/// A panicking hook fails with its panic message instead of unwinding.
fn guard_hook<F, Fut>(hook: F) -> HookFn
where
    F: Fn(HookContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookResult> + Send + 'static,
{
    Arc::new(move |ctx: HookContext| -> BoxFuture<'static, HookResult> {
        match catch_panic(|| hook(ctx)) {
            Ok(fut) => Box::pin(async move {
                CatchPanic::new(fut)
                    .await
                    .unwrap_or_else(|reason| Err(format!("panicked: {reason}")))
            }),
            Err(reason) => Box::pin(std::future::ready(Err(format!("panicked: {reason}")))),
        }
    })
}

impl std::fmt::Debug for ScenarioProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioProps")
            .field("name", &self.name)
            .field("run", &self.run.is_some())
            .field("init", &self.init.is_some())
            .field("clean", &self.clean.is_some())
            .field("warm_up", &self.warm_up)
            .field("load_simulations", &self.load_simulations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scenario_has_default_shape() {
        let s = ScenarioProps::empty("sc_3");
        assert_eq!(s.name(), "sc_3");
        assert!(s.run_fn().is_none());
        assert_eq!(s.warm_up(), Some(DEFAULT_WARM_UP));
        assert_eq!(s.load_simulations(), &[LoadSimulation::default()]);
    }

    #[test]
    fn builder_overrides_defaults() {
        let s = ScenarioProps::create("scenario_1", |_ctx| async { Response::ok() })
            .without_warm_up()
            .with_load_simulations([
                LoadSimulation::inject(10, Duration::from_secs(1), Duration::from_secs(20)),
                LoadSimulation::keep_constant(50, Duration::from_secs(30)),
            ])
            .with_init(|_ctx| async { Ok(()) });

        assert!(s.run_fn().is_some());
        assert!(s.init_fn().is_some());
        assert!(s.clean_fn().is_none());
        assert_eq!(s.warm_up(), None);
        assert_eq!(s.load_simulations().len(), 2);
        assert_eq!(s.load_simulations()[1].during(), Duration::from_secs(30));
    }

    struct NoWait;

    impl crate::context::Timer for NoWait {
        fn sleep(&self, _: Duration) -> BoxFuture<'static, ()> {
            Box::pin(std::future::ready(()))
        }
    }

    fn poll_once<T>(mut fut: BoxFuture<'static, T>) -> std::task::Poll<T> {
        let mut cx = std::task::Context::from_waker(std::task::Waker::noop());
        fut.as_mut().poll(&mut cx)
    }

    fn explode() -> Response {
        panic!("scenario blew up")
    }

    fn explode_hook() -> HookResult {
        panic!("init hook exploded")
    }

    #[test]
    fn panicking_invocation_resolves_to_its_message() {
        let s = ScenarioProps::create("panics", |_ctx| async { explode() });
        let run = s.run_fn().unwrap_or_else(|| panic!("run fn missing"));
        let ctx = ScenarioContext::new(Arc::from("panics"), 0, 0, Arc::new(NoWait));

        assert_eq!(
            poll_once(run(ctx)),
            std::task::Poll::Ready(Err("scenario blew up".to_string()))
        );
    }

    #[test]
    fn panicking_hook_fails_instead_of_unwinding() {
        let s = ScenarioProps::empty("sc_3")
            .with_init(|_ctx| async { explode_hook() })
            .with_clean(|_ctx| -> std::future::Ready<HookResult> { panic!("clean hook exploded") });
        let ctx = HookContext::new(Arc::from("sc_3"), Arc::new(NoWait));

        let init = s.init_fn().unwrap_or_else(|| panic!("init hook missing"));
        assert_eq!(
            poll_once(init(ctx.clone())),
            std::task::Poll::Ready(Err("panicked: init hook exploded".to_string()))
        );

        let clean = s.clean_fn().unwrap_or_else(|| panic!("clean hook missing"));
        assert_eq!(
            poll_once(clean(ctx)),
            std::task::Poll::Ready(Err("panicked: clean hook exploded".to_string()))
        );
    }
}
