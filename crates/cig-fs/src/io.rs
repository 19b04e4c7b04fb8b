//! Whole-file reads and locked, atomic writes

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Hidden scratch file next to `target`, unique per process.
fn scratch_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

/// Write `content` to a locked scratch file, then rename it over `path`.
///
/// Readers see either the old file or the complete new one. Missing parent
/// directories are created.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    if let Some(dir) = target.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }

    let scratch = scratch_path(&target);
    let mut file = File::create(&scratch).map_err(|e| Error::io(&scratch, e))?;
    file.lock_exclusive()
        .map_err(|_| Error::LockFailed { path: target.clone() })?;

    let written = file
        .write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::io(&scratch, e));
    if let Err(e) = written {
        let _ = fs::remove_file(&scratch);
        return Err(e);
    }

    FileExt::unlock(&file).map_err(|_| Error::LockFailed { path: target.clone() })?;
    fs::rename(&scratch, &target).map_err(|e| Error::io(&target, e))?;

    tracing::debug!(path = %path, bytes = content.len(), "wrote file");
    Ok(())
}

/// Read a UTF-8 file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|e| Error::io(native, e))
}

/// [`write_atomic`] for text.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
