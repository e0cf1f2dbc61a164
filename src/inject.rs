use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Ensures `snippet` is present in `rc_file`.
///
/// Creates the file (and any missing parent directories) when absent,
/// then scans it line by line for `marker`. A hit means a previous run
/// already injected the snippet and the file is left untouched;
/// otherwise the snippet is appended. Existing content is never
/// truncated or reordered.
///
/// Returns `true` when the snippet was already present.
pub fn ensure_snippet(rc_file: &Path, marker: &str, snippet: &str) -> io::Result<bool> {
    if !rc_file.is_file() {
        debug!("creating startup file {}", rc_file.display());
        if let Some(parent) = rc_file.parent() {
            fs::create_dir_all(parent)?;
        }
        File::create(rc_file)?;
    }

    let reader = BufReader::new(File::open(rc_file)?);
    for line in reader.lines() {
        if line?.contains(marker) {
            debug!("snippet already present in {}", rc_file.display());
            return Ok(true);
        }
    }

    debug!("appending PATH snippet to {}", rc_file.display());
    let mut file = OpenOptions::new().append(true).open(rc_file)?;
    file.write_all(b"\n")?;
    file.write_all(snippet.as_bytes())?;
    Ok(false)
}
