use dirs::home_dir;
use log::debug;
use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

pub mod error;
pub mod inject;
pub mod platform;
pub mod shell;
pub mod store;

pub use error::{Error, Result};
pub use shell::Shell;

/// The name under which everything this tool owns is filed.
pub const TOOL_NAME: &str = "utix";

/// Path of the utilities directory under `home`.
pub fn utils_dir_in(home: &Path) -> PathBuf {
    home.join(".local").join("share").join(TOOL_NAME).join("bin")
}

/// Gets the path to the utilities directory.
pub fn utils_dir() -> Result<PathBuf> {
    let home = home_dir().ok_or(Error::HomeNotFound)?;
    Ok(utils_dir_in(&home))
}

/// True when `dir` appears as an exact element of `path_var`.
///
/// Membership is purely syntactic: elements are compared as strings,
/// with no trailing-slash, symlink, or case normalization.
pub fn path_contains(path_var: &OsStr, dir: &Path) -> bool {
    env::split_paths(path_var).any(|entry| entry.as_os_str() == dir.as_os_str())
}

/// Checks whether `dir` is on the current process's PATH.
pub fn on_path(dir: &Path) -> bool {
    env::var_os("PATH").is_some_and(|path| path_contains(&path, dir))
}

/// What happened to the shell startup file during [`ensure_utils_dir`].
pub struct PathSetup {
    pub rc_file: PathBuf,
    pub fallback: String,
    pub already_present: bool,
}

/// Returns the utilities directory, creating it and patching the shell
/// startup file when it is missing from PATH.
///
/// When a startup file was consulted the returned [`PathSetup`] carries
/// what the caller should tell the user.
pub fn ensure_utils_dir() -> Result<(PathBuf, Option<PathSetup>)> {
    let home = home_dir().ok_or(Error::HomeNotFound)?;
    ensure_utils_dir_in(&home)
}

/// [`ensure_utils_dir`] against an explicit home directory.
pub fn ensure_utils_dir_in(home: &Path) -> Result<(PathBuf, Option<PathSetup>)> {
    let dir = utils_dir_in(home);
    if dir.exists() && on_path(&dir) {
        return Ok((dir, None));
    }

    debug!("creating utilities directory {}", dir.display());
    fs::create_dir_all(&dir)?;
    if on_path(&dir) {
        return Ok((dir, None));
    }

    let shell = Shell::detect()?;
    debug!("configuring PATH for {}", shell.name());
    let rc_file = shell.startup_file(home)?;
    let already_present = inject::ensure_snippet(&rc_file, shell.marker(), &shell.snippet(&dir))?;
    let fallback = shell.fallback_command(&dir);

    Ok((
        dir,
        Some(PathSetup {
            rc_file,
            fallback,
            already_present,
        }),
    ))
}
