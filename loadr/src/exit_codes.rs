use clap::error::ErrorKind;

/// Process exit status of `loadr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Every module was processed and none contributed a scenario.
    NoScenariosFound = 20,

    /// Bad flags, a missing or empty module path.
    InvalidInput = 30,

    /// The discovery task or the engine failed.
    RuntimeError = 40,
}

impl ExitCode {
    /// `--help` and `--version` surface as clap errors but are not failures.
    #[must_use]
    pub fn for_clap(err: &clap::Error) -> Self {
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Self::Success,
            _ => Self::InvalidInput,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
