// src/export/csv.rs
use std::io::{self, Write};

use super::SheetWriter;
use super::table::{Cell, SparseTable};
use crate::error::ExportError;

/// CSV/TSV rendering of the sparse table. Blank cells are empty fields.
pub struct DelimitedWriter {
    sep: char,
    ext: &'static str,
}

impl DelimitedWriter {
    pub fn csv() -> Self {
        Self { sep: ',', ext: "csv" }
    }

    pub fn tsv() -> Self {
        Self { sep: '\t', ext: "tsv" }
    }
}

impl SheetWriter for DelimitedWriter {
    fn ext(&self) -> &'static str {
        self.ext
    }

    fn render(&self, table: &SparseTable) -> Result<Vec<u8>, ExportError> {
        let mut buf: Vec<u8> = Vec::new();
        let header: Vec<Cell> = table.headers().iter().cloned().map(Some).collect();
        write_row(&mut buf, &header, self.sep).map_err(in_memory)?;
        for row in table.rows() {
            write_row(&mut buf, row, self.sep).map_err(in_memory)?;
        }
        Ok(buf)
    }
}

// Writes into a Vec only fail on allocation, which aborts anyway.
fn in_memory(source: io::Error) -> ExportError {
    ExportError::Io { path: Default::default(), source }
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[Cell], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        let field = cell.as_deref().unwrap_or("");
        if needs_quotes(field, sep) {
            write!(w, "\"{}\"", field.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", field)?;
        }
    }
    writeln!(w)
}
