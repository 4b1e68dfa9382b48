// src/assets.rs
//! Image downloads.
//!
//! Layout is one folder per kind under the upload root:
//! `upload/main/main_AbCdEfGhIj.jpg`, `upload/more/more_KlMnOpQrSt.png`.
//! The returned path is relative to the working directory, which is what ends
//! up in the sheet.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::consts::ASSET_SUFFIX_LEN;
use crate::core::net::{HttpFetcher, parse_url};
use crate::core::random::SuffixSource;
use crate::error::AssetError;
use crate::file::ensure_directory;

pub trait AssetStore: Send + Sync {
    /// Persist the asset at `url` under `folder`; returns its stored path.
    fn download(&self, url: &str, folder: &str) -> Result<String, AssetError>;
}

pub struct DiskAssetStore {
    fetcher: HttpFetcher,
    root: PathBuf,
    suffix: Box<dyn SuffixSource>,
}

impl DiskAssetStore {
    pub fn new(fetcher: HttpFetcher, root: impl Into<PathBuf>, suffix: Box<dyn SuffixSource>) -> Self {
        Self { fetcher, root: root.into(), suffix }
    }
}

impl AssetStore for DiskAssetStore {
    fn download(&self, url: &str, folder: &str) -> Result<String, AssetError> {
        let ext = asset_extension(url);
        let dir = self.root.join(folder);
        ensure_directory(&dir).map_err(|source| AssetError::Io { path: dir.clone(), source })?;

        let path = dir.join(asset_file_name(folder, &self.suffix.suffix(ASSET_SUFFIX_LEN), &ext));
        let file = File::create(&path).map_err(|source| AssetError::Io { path: path.clone(), source })?;
        let mut out = BufWriter::new(file);

        let written = self
            .fetcher
            .fetch_to(url, &mut out)
            .map_err(AssetError::from)
            .and_then(|n| {
                out.flush()
                    .map(|_| n)
                    .map_err(|source| AssetError::Io { path: path.clone(), source })
            });

        match written {
            Ok(bytes) => {
                debug!(%url, path = %path.display(), bytes, "asset stored");
                Ok(path.to_string_lossy().into_owned())
            }
            Err(e) => {
                drop(out);
                discard(&path);
                Err(e)
            }
        }
    }
}

/// `{folder}_{suffix}{ext}`
pub fn asset_file_name(folder: &str, suffix: &str, ext: &str) -> String {
    join!(folder, "_", suffix, ext)
}

/// Extension of the last path segment, dot included; empty if there is none.
/// Query strings and fragments never leak into it.
pub fn asset_extension(url: &str) -> String {
    let Ok(parsed) = parse_url(url) else { return s!() };
    let last = parsed
        .path_segments()
        .and_then(|mut segs| segs.next_back())
        .unwrap_or("");
    match last.rfind('.') {
        Some(dot) if dot + 1 < last.len() => s!(&last[dot..]),
        _ => s!(),
    }
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), "cannot remove partial asset: {e}");
    }
}
