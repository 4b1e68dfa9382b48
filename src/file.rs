// src/file.rs

use std::{
    fs, io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::consts::{MAX_NAME_ATTEMPTS, OUTPUT_SUFFIX_LEN};
use crate::core::random::SuffixSource;
use crate::error::ExportError;

/// `{stem}_{suffix}.{ext}`
pub fn output_file_name(stem: &str, suffix: &str, ext: &str) -> String {
    join!(stem, "_", suffix, ".", ext)
}

/// Write `bytes` to a fresh `{stem}_{suffix}.{ext}` inside `dir`.
///
/// The content goes to a temp file in `dir` first and is then linked into
/// place without clobbering, so the final name either holds the whole
/// artifact or does not exist. A taken name draws a new suffix.
pub fn write_unique(
    dir: &Path,
    stem: &str,
    ext: &str,
    bytes: &[u8],
    suffix: &dyn SuffixSource,
) -> Result<PathBuf, ExportError> {
    let work_dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ExportError::Io { path, source }
    };

    ensure_directory(work_dir).map_err(io_err(work_dir))?;
    let mut tmp = NamedTempFile::new_in(work_dir).map_err(io_err(work_dir))?;
    tmp.write_all(bytes).map_err(io_err(tmp.path()))?;
    tmp.as_file().sync_all().map_err(io_err(tmp.path()))?;

    for _ in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(output_file_name(stem, &suffix.suffix(OUTPUT_SUFFIX_LEN), ext));
        match tmp.persist_noclobber(&path) {
            Ok(_) => return Ok(path),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "output name taken, drawing another");
                tmp = e.file;
            }
            Err(e) => return Err(ExportError::Io { path, source: e.error }),
        }
    }

    Err(ExportError::NameExhausted { dir: work_dir.to_path_buf(), attempts: MAX_NAME_ATTEMPTS })
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", dir.display()),
        ));
    }
    fs::create_dir_all(dir)
}
