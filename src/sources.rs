// src/sources.rs
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::SourceListError;

/// Read the source list: one address per line, trimmed, blanks skipped.
pub fn read_source_list(path: &Path) -> Result<Vec<String>, SourceListError> {
    let text = fs::read_to_string(path)
        .map_err(|source| SourceListError { path: path.to_path_buf(), source })?;
    let list = parse_source_list(&text);
    info!(path = %path.display(), sources = list.len(), "source list read");
    Ok(list)
}

pub fn parse_source_list(text: &str) -> Vec<String> {
    text.trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
