// src/error.rs
//! Error taxonomy.
//!
//! Per-source failures (`FetchError`, `ExtractError`) are folded into
//! `SourceError` and swallowed by the pipeline. `SourceListError` and
//! `ExportError` are the only ones that end a run, via `RunError`.
//! `AssetError` never leaves the extractor; the image path is dropped instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("cannot read source list {path}: {source}")]
pub struct SourceListError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Page came back but carries no product name.
    #[error("no product name found")]
    Incomplete,
    #[error("invalid selector {selector:?}")]
    Selector { selector: String },
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("cannot store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Anything that makes one source get skipped.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{count} attribute columns exceed the sheet limit of {max}")]
    TooManyColumns { count: usize, max: usize },
    #[error("cannot serialize attributes: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("spreadsheet error: {0}")]
    Sheet(#[from] rust_xlsxwriter::XlsxError),
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no free output name in {dir} after {attempts} attempts")]
    NameExhausted { dir: PathBuf, attempts: usize },
}

/// Fatal to the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    SourceList(#[from] SourceListError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("bad page selectors: {0}")]
    Selectors(#[source] ExtractError),
}
