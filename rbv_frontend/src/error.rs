use rbv_config::ConfigError;

/// Rejected user input. Nothing is inserted when parsing fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("no key entered")]
    Empty,
    #[error("{input:?} is not an integer")]
    NotAnInteger { input: String },
}

#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type FrontendResult<T> = Result<T, FrontendError>;
