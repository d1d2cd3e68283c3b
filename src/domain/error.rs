use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No translation provider registered for '{0}'")]
    ProviderNotFound(String),

    #[error("Translate helper not found: {0}. Set TRANSLATE_HELPER_PATH or run the setup tool.")]
    HelperNotFound(String),

    #[error("Python environment not found: {0}. Set TRANSLATE_PYTHON_BIN or run the setup tool.")]
    InterpreterNotFound(String),

    #[error("Failed to spawn translate helper: {0}")]
    HelperSpawnFailed(#[source] std::io::Error),

    #[error("Translate helper failed: {stderr}")]
    HelperExecutionFailed { stderr: String },

    #[error("Translation cancelled")]
    Cancelled,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
