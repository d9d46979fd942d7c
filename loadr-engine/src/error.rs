pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("no scenarios registered")]
    NoScenarios,

    #[error("scenario name must not be empty")]
    EmptyScenarioName,

    #[error("duplicate scenario name `{0}`")]
    DuplicateScenario(String),

    #[error("scenario `{0}`: `copies` must be a positive integer")]
    InvalidCopies(String),

    #[error("scenario `{0}`: `rate` must be a positive integer")]
    InvalidRate(String),

    #[error("scenario `{0}`: `interval` must be a positive duration")]
    InvalidInterval(String),

    #[error("scenario `{0}`: `during` must be a positive duration")]
    InvalidDuring(String),
}
