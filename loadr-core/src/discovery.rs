use loadr_abi::contracts::ScenarioProps;
use tracing::{debug, warn};

use crate::error::DiscoveryError;
use crate::module::LoadedModule;

/// Instantiates every provider a module declares and streams its scenarios into `sink`.
///
/// Scenarios arrive in marker order, then in the order each provider yields
/// them. A marker that fails validation, a provider that cannot be
/// constructed, or a provider that panics while producing scenarios is
/// reported in the returned diagnostics and skipped; the remaining markers
/// still run.
pub fn discover<F>(module: &LoadedModule, mut sink: F) -> Vec<DiscoveryError>
where
    F: FnMut(ScenarioProps),
{
    let module_path = module.path().as_path();
    let mut diagnostics: Vec<DiscoveryError> = module
        .rejected()
        .iter()
        .map(|rejected| DiscoveryError::InvalidMarker {
            module: module_path.to_path_buf(),
            reason: rejected.to_string(),
        })
        .collect();
    for err in &diagnostics {
        warn!("{err}");
    }

    for marker in module.markers() {
        let provider = marker.type_name();
        debug!(module = %module.path(), provider, "instantiating provider");

        let mut instance = match marker.instantiate() {
            Ok(instance) => instance,
            Err(reason) => {
                let err = DiscoveryError::Instantiation {
                    module: module_path.to_path_buf(),
                    provider: provider.to_string(),
                    reason,
                };
                warn!("{err}");
                diagnostics.push(err);
                continue;
            }
        };

        let mut yielded = 0usize;
        let drained = instance.drain(&mut |scenario: ScenarioProps| {
            yielded += 1;
            sink(scenario);
        });
        if let Err(reason) = drained {
            let err = DiscoveryError::Setup {
                module: module_path.to_path_buf(),
                provider: provider.to_string(),
                yielded,
                reason,
            };
            warn!("{err}");
            diagnostics.push(err);
            continue;
        }

        debug!(module = %module.path(), provider, scenarios = yielded, "provider drained");
    }

    diagnostics
}
