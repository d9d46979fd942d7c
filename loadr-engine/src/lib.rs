//! A small load-generation engine for scenarios described by `loadr-contracts`.
//!
//! Scenarios run concurrently. Each one runs its init hook, an optional
//! warm-up, its load simulations in order and finally its clean hook.

mod error;
mod gate;
mod runner;
mod simulation;
mod stats;
mod timer;

pub use error::{Error, Result};
pub use runner::Runner;
pub use stats::{RunSummary, ScenarioSummary};
pub use timer::TokioTimer;
