use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::{ConfigError, Diagnostic, ErrorCode, ModelError};

/// Failure that stops a whole driver command.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("no Unity project found above `{0}`; pass --project <root>")]
    ProjectNotFound(String),
    #[error("cannot start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Usage(String),
}

impl DriverError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            DriverError::Config(_) => ErrorCode::E0004,
            DriverError::Model(_) | DriverError::Usage(_) => ErrorCode::E0005,
            DriverError::ProjectNotFound(_)
            | DriverError::ThreadPool(_)
            | DriverError::Write { .. } => ErrorCode::E0006,
        };
        Diagnostic::error(code).with_message(self.to_string())
    }
}
