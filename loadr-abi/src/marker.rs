use loadr_contracts::{ScenarioProps, catch_panic};

use crate::Setup;

/// Builds a fresh provider instance with no arguments.
pub type ProviderFactory = fn() -> Result<Provider, String>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },
}

/// A constructed provider, ready to yield its scenarios.
pub struct Provider {
    inner: Box<dyn Drain>,
}

trait Drain {
    fn drain(&mut self, sink: &mut dyn FnMut(ScenarioProps)) -> Result<(), String>;
}

struct Guarded<T>(T);

impl<T: Setup> Drain for Guarded<T> {
    fn drain(&mut self, sink: &mut dyn FnMut(ScenarioProps)) -> Result<(), String> {
        catch_panic(|| {
            for scenario in self.0.setup() {
                sink(scenario);
            }
        })
    }
}

impl Provider {
    pub fn new<T>(setup: T) -> Self
    where
        T: Setup + 'static,
    {
        Self {
            inner: Box::new(Guarded(setup)),
        }
    }

    /// Feeds every scenario to `sink`, in yield order.
    ///
    /// A panic inside the provider ends the sequence and comes back as its
    /// message; scenarios already fed to `sink` stay there.
    pub fn drain(&mut self, sink: &mut dyn FnMut(ScenarioProps)) -> Result<(), String> {
        self.inner.drain(sink)
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider").finish_non_exhaustive()
    }
}

/// Declares one provider type a module exposes.
///
/// The only way to build a marker from a type is [`Marker::new`], which
/// requires the type to implement [`Setup`]:
///
/// ```compile_fail
/// #[derive(Default)]
/// struct NotAProvider;
///
/// let _ = loadr_abi::Marker::new::<NotAProvider>();
/// ```
#[derive(Clone, Copy)]
pub struct Marker {
    type_name: &'static str,
    factory: ProviderFactory,
    // Captured where the marker is built, so the panic guard belongs to the
    // same compiled module as the factory.
    call: fn(ProviderFactory) -> Result<Provider, String>,
}

impl Marker {
    #[must_use]
    pub fn new<T>() -> Self
    where
        T: Setup + Default + 'static,
    {
        Self {
            type_name: std::any::type_name::<T>(),
            factory: instantiate_default::<T>,
            call: call_guarded,
        }
    }

    /// Marker backed by a hand-written factory, for providers that are not
    /// `Default` or whose construction can fail.
    pub fn from_factory(
        type_name: &'static str,
        factory: Option<ProviderFactory>,
    ) -> Result<Self, MarkerError> {
        if type_name.trim().is_empty() {
            return Err(MarkerError::InvalidArgument {
                argument: "type_name",
                reason: "provider type name is empty".to_string(),
            });
        }

        let Some(factory) = factory else {
            return Err(MarkerError::InvalidArgument {
                argument: "factory",
                reason: format!("`{type_name}` has no provider factory"),
            });
        };

        Ok(Self {
            type_name,
            factory,
            call: call_guarded,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Runs the factory. A panicking constructor is reported as `Err` with the
    /// panic message.
    pub fn instantiate(&self) -> Result<Provider, String> {
        (self.call)(self.factory)
    }
}

impl std::fmt::Debug for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marker")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

fn call_guarded(factory: ProviderFactory) -> Result<Provider, String> {
    catch_panic(factory).and_then(|built| built)
}

fn instantiate_default<T>() -> Result<Provider, String>
where
    T: Setup + Default + 'static,
{
    Ok(Provider::new(T::default()))
}

/// Collects the markers a module declares during registration.
///
/// Markers rejected at construction are kept apart so the host can report them
/// without dropping the module's valid markers.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    markers: Vec<Marker>,
    rejected: Vec<MarkerError>,
}

impl MarkerRegistry {
    pub fn declare<T>(&mut self) -> &mut Self
    where
        T: Setup + Default + 'static,
    {
        self.markers.push(Marker::new::<T>());
        self
    }

    pub fn declare_factory(
        &mut self,
        type_name: &'static str,
        factory: Option<ProviderFactory>,
    ) -> &mut Self {
        match Marker::from_factory(type_name, factory) {
            Ok(marker) => self.markers.push(marker),
            Err(err) => self.rejected.push(err),
        }
        self
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn rejected(&self) -> &[MarkerError] {
        &self.rejected
    }

    pub fn into_parts(self) -> (Vec<Marker>, Vec<MarkerError>) {
        (self.markers, self.rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scenarios;

    #[derive(Default)]
    struct TwoScenarios;

    impl Setup for TwoScenarios {
        fn setup(&mut self) -> Scenarios<'_> {
            Box::new(
                vec![
                    ScenarioProps::empty("scenario_1"),
                    ScenarioProps::empty("scenario_2"),
                ]
                .into_iter(),
            )
        }
    }

    struct ExplodingDefault;

    impl Default for ExplodingDefault {
        fn default() -> Self {
            panic!("constructor failed");
        }
    }

    impl Setup for ExplodingDefault {
        fn setup(&mut self) -> Scenarios<'_> {
            Box::new(std::iter::empty())
        }
    }

    #[derive(Default)]
    struct StopsHalfway;

    impl Setup for StopsHalfway {
        fn setup(&mut self) -> Scenarios<'_> {
            let mut step = 0;
            Box::new(std::iter::from_fn(move || {
                step += 1;
                match step {
                    1 => Some(ScenarioProps::empty("partial_1")),
                    _ => panic!("setup failed after first scenario"),
                }
            }))
        }
    }

    fn drain(provider: &mut Provider) -> (Vec<String>, Result<(), String>) {
        let mut names = Vec::new();
        let result = provider.drain(&mut |s: ScenarioProps| names.push(s.name().to_string()));
        (names, result)
    }

    #[test]
    fn marker_new_records_type_and_instantiates() {
        let marker = Marker::new::<TwoScenarios>();
        assert!(marker.type_name().ends_with("TwoScenarios"));

        let mut provider = marker
            .instantiate()
            .unwrap_or_else(|e| panic!("instantiate failed: {e}"));
        let (names, result) = drain(&mut provider);
        assert_eq!(names, ["scenario_1", "scenario_2"]);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn panicking_constructor_is_an_instantiation_error() {
        let err = Marker::new::<ExplodingDefault>()
            .instantiate()
            .err()
            .unwrap_or_else(|| panic!("expected a constructor failure"));
        assert_eq!(err, "constructor failed");
    }

    #[test]
    fn panicking_sequence_keeps_what_was_yielded() {
        let mut provider = Marker::new::<StopsHalfway>()
            .instantiate()
            .unwrap_or_else(|e| panic!("instantiate failed: {e}"));
        let (names, result) = drain(&mut provider);
        assert_eq!(names, ["partial_1"]);
        assert_eq!(result, Err("setup failed after first scenario".to_string()));
    }

    #[test]
    fn from_factory_rejects_missing_factory() {
        let err = Marker::from_factory("Missing", None)
            .err()
            .unwrap_or_else(|| panic!("expected InvalidArgument"));
        assert!(matches!(
            err,
            MarkerError::InvalidArgument {
                argument: "factory",
                ..
            }
        ));
    }

    #[test]
    fn from_factory_rejects_empty_type_name() {
        let factory: ProviderFactory = instantiate_default::<TwoScenarios>;
        let err = Marker::from_factory("  ", Some(factory))
            .err()
            .unwrap_or_else(|| panic!("expected InvalidArgument"));
        assert!(matches!(
            err,
            MarkerError::InvalidArgument {
                argument: "type_name",
                ..
            }
        ));
    }

    #[test]
    fn registry_keeps_valid_markers_when_one_is_rejected() {
        let mut registry = MarkerRegistry::default();
        registry
            .declare::<TwoScenarios>()
            .declare_factory("Broken", None)
            .declare::<TwoScenarios>();

        let (markers, rejected) = registry.into_parts();
        assert_eq!(markers.len(), 2);
        assert_eq!(rejected.len(), 1);
    }

    #[test]
    fn factory_errors_surface_from_instantiate() {
        fn failing() -> Result<Provider, String> {
            Err("database unavailable".to_string())
        }

        fn panicking() -> Result<Provider, String> {
            panic!("factory exploded")
        }

        let marker = Marker::from_factory("Failing", Some(failing as ProviderFactory))
            .unwrap_or_else(|e| panic!("marker rejected: {e}"));
        let err = marker
            .instantiate()
            .err()
            .unwrap_or_else(|| panic!("expected factory error"));
        assert_eq!(err, "database unavailable");

        let marker = Marker::from_factory("Panicking", Some(panicking as ProviderFactory))
            .unwrap_or_else(|e| panic!("marker rejected: {e}"));
        let err = marker
            .instantiate()
            .err()
            .unwrap_or_else(|| panic!("expected factory panic"));
        assert_eq!(err, "factory exploded");
    }
}
