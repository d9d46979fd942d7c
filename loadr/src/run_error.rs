use loadr_core::NoScenariosFound;

use crate::exit_codes::ExitCode;

/// Why a `loadr` invocation did not finish successfully.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("module path must not be empty")]
    EmptyModulePath,

    #[error(transparent)]
    NoScenarios(#[from] NoScenariosFound),

    #[error("module discovery task failed: {0}")]
    Discovery(#[from] tokio::task::JoinError),

    #[error("load run failed: {0}")]
    Engine(#[from] loadr_engine::Error),
}

impl RunError {
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::EmptyModulePath => ExitCode::InvalidInput,
            Self::NoScenarios(_) => ExitCode::NoScenariosFound,
            Self::Discovery(_) | Self::Engine(_) => ExitCode::RuntimeError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_their_exit_codes() {
        assert_eq!(RunError::EmptyModulePath.exit_code(), ExitCode::InvalidInput);
        assert_eq!(
            RunError::from(NoScenariosFound).exit_code(),
            ExitCode::NoScenariosFound
        );
        assert_eq!(
            RunError::from(loadr_engine::Error::DuplicateScenario("a".into())).exit_code(),
            ExitCode::RuntimeError
        );
    }

    #[test]
    fn no_scenarios_keeps_the_aggregation_message() {
        assert_eq!(
            RunError::from(NoScenariosFound).to_string(),
            NoScenariosFound.to_string()
        );
    }
}
