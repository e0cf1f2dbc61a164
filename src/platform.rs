use crate::error::{Error, Result};
use dirs::home_dir;
use log::debug;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Platforms we know a default configuration directory for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// The platform this process is running on.
    pub fn current() -> Result<Self> {
        Self::from_os(env::consts::OS)
    }

    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::MacOs),
            "windows" => Ok(Self::Windows),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Default configuration directory under `home`.
    pub fn config_dir_under(self, home: &Path) -> PathBuf {
        match self {
            Self::Linux => home.join(".config"),
            Self::MacOs => home.join("Library").join("Application Support"),
            Self::Windows => home.join("AppData").join("Roaming"),
        }
    }
}

/// Gets the user configuration directory.
///
/// A non-empty `XDG_CONFIG_HOME` wins verbatim; the path is not checked
/// for existence. Otherwise falls back to the platform default.
pub fn config_dir() -> Result<PathBuf> {
    resolve_config_dir(env::var_os("XDG_CONFIG_HOME"), env::consts::OS, home_dir())
}

fn resolve_config_dir(
    overridden: Option<OsString>,
    os: &str,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    match overridden {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => {
            debug!("XDG_CONFIG_HOME not set, using the {os} default");
            let home = home.ok_or(Error::HomeNotFound)?;
            Ok(Platform::from_os(os)?.config_dir_under(&home))
        }
    }
}
