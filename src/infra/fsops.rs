//! Filesystem operations for assembling the output tree.
//!
//! All copies and writes are strict: the first failure propagates and
//! aborts the run. Existence probes are the only soft surface here.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

/// Remove any previous content at `dir`. Missing directories are fine;
/// the output is always rebuilt from scratch.
pub fn clear_output_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            debug!("deleted directory {}", dir.display());
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => {
            Err(err).with_context(|| format!("removing output directory {}", dir.display()))
        }
    }
}

pub fn is_directory(path: &Path) -> bool {
    path.is_dir()
}

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

pub fn read_working_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Write `bytes` to `dest`, creating parent directories as needed.
pub fn write_output_file(dest: &Path, bytes: &[u8]) -> Result<()> {
    create_parent(dest)?;
    fs::write(dest, bytes).with_context(|| format!("writing {}", dest.display()))?;
    debug!("created file {}", dest.display());
    Ok(())
}

/// Copy one file byte-for-byte, creating parent directories as needed.
pub fn copy_file_verbatim(src: &Path, dest: &Path) -> Result<()> {
    create_parent(dest)?;
    fs::copy(src, dest)
        .with_context(|| format!("copying {} to {}", src.display(), dest.display()))?;
    debug!("created file {}", dest.display());
    Ok(())
}

/// Recursively copy `src` into `dest`, skipping symbolic links.
pub fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.with_context(|| format!("walking {}", src.display()))?;
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            debug!("skipping symlink {}", entry.path().display());
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("walking {}", src.display()))?;
        let target = dest.join(relative);

        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("creating directory {}", target.display()))?;
        } else {
            copy_file_verbatim(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn create_parent(dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    Ok(())
}
