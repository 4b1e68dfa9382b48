// src/config/options.rs
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use super::consts::*;
use crate::specs::product_page::Selectors;

pub const ENV_FORMAT: &str = "CATALOG_SCRAPE_FORMAT";
pub const ENV_WORKERS: &str = "CATALOG_SCRAPE_WORKERS";
pub const ENV_SOURCE: &str = "CATALOG_SCRAPE_SOURCE";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub assets: AssetOptions,
    pub export: ExportOptions,
}

impl AppOptions {
    /// Defaults, then any `CATALOG_SCRAPE_*` overrides from the environment.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        opts.apply_overrides(|key| std::env::var(key).ok());
        opts
    }

    /// Apply overrides from any key lookup. Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_FORMAT) {
            match v.parse::<ExportFormat>() {
                Ok(fmt) => self.export.format = fmt,
                Err(e) => warn!("{ENV_FORMAT}: {e}"),
            }
        }
        if let Some(v) = lookup(ENV_WORKERS) {
            match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.scrape.workers = n,
                _ => warn!("{ENV_WORKERS}: expected a positive integer, got {v:?}"),
            }
        }
        if let Some(v) = lookup(ENV_SOURCE) {
            let v = v.trim();
            if !v.is_empty() {
                self.scrape.source_file = PathBuf::from(v);
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub source_file: PathBuf,
    /// 1 = strictly sequential, in list order.
    pub workers: usize,
    pub request_timeout: Duration,
    pub request_pause_ms: u64,
    pub jitter_ms: u64,
    pub selectors: Selectors,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            source_file: PathBuf::from(SOURCE_FILE),
            workers: WORKERS,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            request_pause_ms: REQUEST_PAUSE_MS,
            jitter_ms: JITTER_MS,
            selectors: Selectors::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetOptions {
    pub upload_dir: PathBuf,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self { upload_dir: PathBuf::from(UPLOAD_DIR) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Tsv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Directory the artifact lands in; empty means the working directory.
    pub out_dir: PathBuf,
    pub stem: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Xlsx,
            out_dir: PathBuf::new(),
            stem: s!(OUTPUT_STEM),
        }
    }
}
