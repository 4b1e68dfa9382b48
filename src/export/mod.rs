// src/export/mod.rs
//! Sparse export: products + schema → one finalized artifact on disk.
//!
//! Rendering happens fully in memory; only a complete buffer is handed to
//! `file::write_unique`, which publishes it atomically.

pub mod csv;
pub mod table;
pub mod xlsx;

use std::path::PathBuf;

use tracing::info;

use crate::config::consts::SHEET_NAME;
use crate::config::options::{ExportFormat, ExportOptions};
use crate::core::random::SuffixSource;
use crate::error::ExportError;
use crate::file::write_unique;
use crate::product::ProductRecord;
use crate::schema::UnifiedSchema;

pub use self::csv::DelimitedWriter;
pub use self::table::{Cell, SparseTable};
pub use self::xlsx::XlsxWriter;

/// Renders a whole table into file bytes.
pub trait SheetWriter {
    /// Extension without the dot.
    fn ext(&self) -> &'static str;
    fn render(&self, table: &SparseTable) -> Result<Vec<u8>, ExportError>;
}

pub fn writer_for(format: ExportFormat) -> Box<dyn SheetWriter> {
    match format {
        ExportFormat::Xlsx => Box::new(XlsxWriter::new(SHEET_NAME)),
        ExportFormat::Csv => Box::new(DelimitedWriter::csv()),
        ExportFormat::Tsv => Box::new(DelimitedWriter::tsv()),
    }
}

/// Export with the writer chosen by `opts.format`.
pub fn export_products(
    products: &[ProductRecord],
    schema: &UnifiedSchema,
    opts: &ExportOptions,
    suffix: &dyn SuffixSource,
) -> Result<PathBuf, ExportError> {
    let writer = writer_for(opts.format);
    export_with(writer.as_ref(), products, schema, opts, suffix)
}

pub fn export_with(
    writer: &dyn SheetWriter,
    products: &[ProductRecord],
    schema: &UnifiedSchema,
    opts: &ExportOptions,
    suffix: &dyn SuffixSource,
) -> Result<PathBuf, ExportError> {
    let table = SparseTable::build(products, schema)?;
    let bytes = writer.render(&table)?;
    let path = write_unique(&opts.out_dir, &opts.stem, writer.ext(), &bytes, suffix)?;
    info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.width(),
        "artifact written"
    );
    Ok(path)
}
