use thiserror::Error;

pub use anyhow::Error as RuntimeError;

/// Errors produced while constructing a single step description.
#[derive(Debug, Error)]
pub enum StepError {
    /// A dynamically supplied step target was neither a string nor a
    /// callable. Carries the JSON kind of the offending value.
    #[error("Step target must be a task name, a plugin name or a callable, got {0}")]
    InvalidArgumentKind(&'static str),

    #[error("Couldn't serialize plugin options.\n{0}")]
    Options(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StagehandError {
    #[error("Couldn't read the project manifest.\n{0}")]
    ManifestRead(#[from] std::io::Error),

    #[error("Couldn't parse the project manifest.\n{0}")]
    ManifestParse(#[from] serde_json::Error),

    #[error("Setup routine failed.\n{0}")]
    Setup(anyhow::Error),

    #[error("Engine rejected '{0}'.\n{1}")]
    Engine(String, anyhow::Error),

    #[error(transparent)]
    Step(#[from] StepError),
}
