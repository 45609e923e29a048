use std::path::PathBuf;

use thiserror::Error;

/// Errors the session loop needs to tell apart.
///
/// Everything else travels as a plain `anyhow::Error` and is treated as
/// recoverable.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{} is not inside a git working tree", .0.display())]
    NotARepository(PathBuf),

    #[error("Interactive input requires a terminal")]
    NotInteractive,

    #[error("Prompt interrupted")]
    Interrupted,

    #[error("`git {command}` failed")]
    GitCommand { command: String, detail: String },
}

impl Error {
    /// Fatal errors end the session with exit code 1.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NotARepository(_) | Self::NotInteractive | Self::Interrupted
        )
    }

    /// Extra diagnostic text supplied by git, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::GitCommand { detail, .. } if !detail.is_empty() => Some(detail.as_str()),
            _ => None,
        }
    }
}

/// Returns true if `err` (or anything in its chain) is a fatal [`Error`].
pub fn is_fatal(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<Error>())
        .any(Error::is_fatal)
}
