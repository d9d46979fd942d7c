use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ModuleLoadError {
    #[error("module `{}` is not accessible: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load module `{}`: {source}", .path.display())]
    Library {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("module `{}` does not export a loadr declaration: {source}", .path.display())]
    MissingDeclaration {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("module `{}` targets loadr ABI v{found} (expected v{expected})", .path.display())]
    IncompatibleAbi {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("module `{}` was built by `{found}` (expected `{expected}`)", .path.display())]
    IncompatibleCompiler {
        path: PathBuf,
        found: String,
        expected: &'static str,
    },

    #[error("module `{}` panicked while registering markers: {reason}", .path.display())]
    RegistrationPanicked { path: PathBuf, reason: String },

    #[error("no in-process module registered as `{}`", .path.display())]
    NotRegistered { path: PathBuf },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DiscoveryError {
    #[error("module `{}` declared an invalid marker: {reason}", .module.display())]
    InvalidMarker { module: PathBuf, reason: String },

    #[error("failed to instantiate `{provider}` from `{}`: {reason}", .module.display())]
    Instantiation {
        module: PathBuf,
        provider: String,
        reason: String,
    },

    #[error(
        "`{provider}` from `{}` failed during setup after {yielded} scenario(s): {reason}",
        .module.display()
    )]
    Setup {
        module: PathBuf,
        provider: String,
        yielded: usize,
        reason: String,
    },
}

/// A per-module or per-marker failure that was logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum Diagnostic {
    #[error(transparent)]
    Load(#[from] ModuleLoadError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

/// Aggregation finished without a single scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no scenarios found")]
pub struct NoScenariosFound;
