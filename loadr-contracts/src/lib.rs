//! Scenario records shared between load-test modules and the engine.
//!
//! Modules build [`ScenarioProps`] values; the host forwards them untouched to
//! whatever engine executes them. Nothing in here depends on an async runtime:
//! user code that needs to wait goes through the host-provided [`Timer`].

mod context;
mod panic;
mod response;
mod scenario;
mod simulation;

pub use context::{HookContext, ScenarioContext, Timer};
pub use response::Response;
pub use panic::{CatchPanic, catch_panic, panic_message};
pub use scenario::{BoxFuture, HookFn, HookResult, InvocationResult, ScenarioFn, ScenarioProps};
pub use simulation::LoadSimulation;
