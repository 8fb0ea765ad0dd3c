use thiserror::Error;

/// Top-level error type used across the workspace.
///
/// The rendering core itself never fails; these variants cover the shell
/// around it (config files, system sampling, the stats link).
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("config error: {0}")]
    Config(String),

    #[error("system error: {0}")]
    System(String),

    #[error("link error: {0}")]
    Link(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = MatrixError> = std::result::Result<T, E>;
