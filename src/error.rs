use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not determine the user home directory")]
    HomeNotFound,

    #[error("unsupported platform '{0}': cannot determine the configuration directory")]
    UnsupportedPlatform(String),

    #[error(
        "no shell detected; add the utilities directory to your PATH manually, e.g.\n    export PATH=\"$PATH:~/.local/share/utix/bin\""
    )]
    NoShell,

    #[error("unsupported shell '{0}'; add the utilities directory to your PATH manually")]
    UnsupportedShell(String),

    #[error("'{0}' already exists in the utilities directory (pass --force to overwrite)")]
    AlreadyExists(String),

    #[error("no utility named '{0}' is installed")]
    NotFound(String),

    #[error("invalid utility name '{0}': names cannot contain path separators")]
    InvalidName(String),

    #[error("'{}' does not exist or is not a regular file", .0.display())]
    SourceNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::HomeNotFound
            | Self::UnsupportedPlatform(_)
            | Self::NoShell
            | Self::UnsupportedShell(_)
            | Self::InvalidName(_) => 2,
            Self::AlreadyExists(_) => 3,
            Self::NotFound(_) | Self::SourceNotFound(_) => 4,
            Self::Io(_) => 1,
        }
    }
}
