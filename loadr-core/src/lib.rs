//! Discovery and aggregation of load-test scenarios from compiled modules.
//!
//! Paths go through a [`ModuleLoader`], every marker a module declares is
//! instantiated and drained by [`discover`], the [`Aggregator`] concatenates the
//! results in path order, and [`handoff`] passes them to an [`Engine`].

mod aggregate;
mod discovery;
mod error;
mod handoff;
mod loader;
mod module;

pub use aggregate::{Aggregation, Aggregator};
pub use discovery::discover;
pub use error::{Diagnostic, DiscoveryError, ModuleLoadError, NoScenariosFound};
pub use handoff::{Engine, ScenarioSet, handoff};
pub use loader::{DylibLoader, ModuleLoader, StaticLoader};
pub use module::{LoadedModule, ModulePath};

pub use loadr_abi::contracts::ScenarioProps;
