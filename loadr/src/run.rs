use loadr_core::{Aggregator, DylibLoader, handoff};
use tracing::warn;

use crate::cli::Cli;
use crate::engine::LocalEngine;
use crate::run_error::RunError;

pub async fn run(cli: Cli) -> Result<(), RunError> {
    if cli.modules.iter().any(|p| p.as_os_str().is_empty()) {
        return Err(RunError::EmptyModulePath);
    }

    // Loading runs foreign initialisers and may block on disk.
    let paths = cli.modules;
    let aggregation =
        tokio::task::spawn_blocking(move || Aggregator::new(DylibLoader).aggregate(paths)).await?;

    if !aggregation.diagnostics().is_empty() {
        warn!(
            count = aggregation.diagnostics().len(),
            "some modules or providers were skipped"
        );
    }

    let set = aggregation.into_set()?;

    if cli.list {
        for name in set.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let summary = handoff(LocalEngine::new(), set).await?;
    if summary.hooks_failed() {
        warn!("some init/clean hooks failed");
    }

    Ok(())
}
