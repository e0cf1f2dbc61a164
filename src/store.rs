use crate::error::{Error, Result};
use is_executable::IsExecutable;
use log::debug;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored name for a utility: file stem, lowercased, underscores
/// replaced with dashes.
pub fn alias_for(source: &Path) -> String {
    let stem = source.file_stem().unwrap_or(source.as_os_str());
    stem.to_string_lossy().replace('_', "-").to_lowercase()
}

/// Lazily yields every installed utility under `dir`.
///
/// Walks recursively, following symlinks; only regular files that are
/// both readable and executable are surfaced. Everything else is
/// skipped, not reported.
pub fn list(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.is_executable() && File::open(path).is_ok())
}

/// Installs `source` into `dir` under its normalized name.
///
/// With `copy` the source is duplicated and left in place, otherwise it
/// is moved with an atomic rename. The target always ends up with 0755
/// permissions on Unix. Returns the installed path.
pub fn install(dir: &Path, source: &Path, copy: bool, overwrite: bool) -> Result<PathBuf> {
    let name = alias_for(source);
    let target = dir.join(&name);
    if target.exists() {
        if overwrite {
            debug!("removing existing utility {}", target.display());
            fs::remove_file(&target)?;
        } else {
            return Err(Error::AlreadyExists(name));
        }
    }

    let source = source.canonicalize()?;
    if copy {
        debug!("copying {} to {}", source.display(), target.display());
        fs::copy(&source, &target)?;
    } else {
        debug!("moving {} to {}", source.display(), target.display());
        fs::rename(&source, &target)?;
    }

    #[cfg(unix)]
    fs::set_permissions(&target, fs::Permissions::from_mode(0o755))?;

    Ok(target)
}

/// Removes the utility stored under `alias` from `dir`.
pub fn remove(dir: &Path, alias: &str) -> Result<PathBuf> {
    if alias.contains(['/', '\\']) {
        return Err(Error::InvalidName(alias.to_string()));
    }
    let target = dir.join(alias);
    if !target.is_file() {
        return Err(Error::NotFound(alias.to_string()));
    }
    debug!("removing utility {}", target.display());
    fs::remove_file(&target)?;
    Ok(target)
}
