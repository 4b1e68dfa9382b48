// src/runner.rs
use std::path::PathBuf;

use tracing::info;

use crate::{
    assets::DiskAssetStore,
    config::options::AppOptions,
    core::{HttpFetcher, SuffixSource, ThreadRandom},
    error::RunError,
    export::export_products,
    progress::Progress,
    schema::UnifiedSchema,
    scrape::{Skipped, collect_products},
    sources::read_source_list,
    specs::{ProductExtractor, product_page::PageExtractor},
};

/// Summary of what a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub sources: usize,
    pub retained: usize,
    pub skipped: Vec<Skipped>,
    /// Distinct attribute columns in the artifact.
    pub attribute_columns: usize,
    /// `None` when there was nothing to export.
    pub artifact: Option<PathBuf>,
}

/// Top-level runner wired to the network, the disk and process randomness.
pub fn run(
    opts: &AppOptions,
    progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary, RunError> {
    let fetcher = HttpFetcher::new(opts.scrape.request_timeout).map_err(RunError::Client)?;
    let assets = DiskAssetStore::new(fetcher.clone(), &opts.assets.upload_dir, Box::new(ThreadRandom));
    let extractor = PageExtractor::new(fetcher, assets, &opts.scrape.selectors)
        .map_err(RunError::Selectors)?;

    run_with(opts, &extractor, &ThreadRandom, progress)
}

/// Read sources → collect → unify → export, with injected collaborators.
///
/// A missing source list or a failed export is an error. An empty list, or a
/// list where every source was skipped, is a normal run without an artifact.
pub fn run_with(
    opts: &AppOptions,
    extractor: &dyn ProductExtractor,
    suffix: &dyn SuffixSource,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary, RunError> {
    let sources = read_source_list(&opts.scrape.source_file)?;
    let mut summary = RunSummary { sources: sources.len(), ..RunSummary::default() };

    if sources.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.log("No source links found.");
        }
        return Ok(summary);
    }
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Got {} source links, starting.", sources.len()));
    }

    let collected = collect_products(&sources, extractor, &opts.scrape, progress.as_deref_mut());
    summary.retained = collected.products.len();
    summary.skipped = collected.skipped;

    if collected.products.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.log("No product data available, nothing exported.");
        }
        return Ok(summary);
    }

    let schema = UnifiedSchema::unify(&collected.products);
    info!(attributes = schema.len(), "schema unified");
    summary.attribute_columns = schema.len();

    let path = export_products(&collected.products, &schema, &opts.export, suffix)?;
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Data saved to {}", path.display()));
    }
    summary.artifact = Some(path);
    Ok(summary)
}
