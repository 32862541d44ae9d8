use thiserror::Error;

/// Probing the host for package managers is impossible.
#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("cannot search for package managers: PATH is not set")]
    NoSearchPath,

    #[error("cannot search for package managers: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// An upgrade command could not be started.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("sudo is required but was not found on the search path")]
    SudoUnavailable,

    #[error("cannot look up sudo: {0}")]
    SudoLookup(#[source] DetectionError),
}
