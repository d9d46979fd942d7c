//! Contract between the `loadr` host and separately compiled load-test modules.
//!
//! A module implements [`Setup`] on one or more default-constructible provider
//! types and exports them with [`declare_module!`]:
//!
//! ```
//! use loadr_abi::{Scenarios, Setup};
//! use loadr_abi::contracts::{Response, ScenarioProps};
//!
//! #[derive(Default)]
//! pub struct Checkout;
//!
//! impl Setup for Checkout {
//!     fn setup(&mut self) -> Scenarios<'_> {
//!         Box::new(std::iter::once(ScenarioProps::create("checkout", |_ctx| async {
//!             Response::ok()
//!         })))
//!     }
//! }
//!
//! loadr_abi::declare_module!(Checkout);
//!
//! fn main() {
//!     let mut registry = loadr_abi::MarkerRegistry::default();
//!     assert!((LOADR_MODULE_DECLARATION.register)(&mut registry).is_ok());
//!     assert_eq!(registry.markers().len(), 1);
//! }
//! ```

mod declaration;
mod marker;

pub use declaration::{ABI_VERSION, DECLARATION_SYMBOL, ModuleDeclaration, RUSTC_VERSION};
pub use loadr_contracts as contracts;
pub use marker::{Marker, MarkerError, MarkerRegistry, Provider, ProviderFactory};

use loadr_contracts::ScenarioProps;

/// Possibly lazy sequence of scenarios produced by a provider.
pub type Scenarios<'a> = Box<dyn Iterator<Item = ScenarioProps> + 'a>;

/// Capability every provider type declared by a module must implement.
///
/// The returned sequence is drained completely by the host, in order. It may
/// compute elements on demand and perform side effects (e.g. seeding a
/// database) while doing so. A panic while producing an element ends the
/// sequence; elements yielded before it are kept.
pub trait Setup {
    fn setup(&mut self) -> Scenarios<'_>;
}
