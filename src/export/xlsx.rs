// src/export/xlsx.rs
use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet};
use tracing::warn;

use super::SheetWriter;
use super::table::SparseTable;
use crate::error::ExportError;

/// Excel hard limits.
pub const MAX_COLUMNS: usize = 16_384;
pub const MAX_CELL_CHARS: usize = 32_767;

/// Single-sheet workbook. Blank cells are simply never written.
pub struct XlsxWriter {
    sheet_name: String,
}

impl XlsxWriter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self { sheet_name: sheet_name.into() }
    }
}

impl SheetWriter for XlsxWriter {
    fn ext(&self) -> &'static str {
        "xlsx"
    }

    fn render(&self, table: &SparseTable) -> Result<Vec<u8>, ExportError> {
        if table.width() > MAX_COLUMNS {
            return Err(ExportError::TooManyColumns { count: table.width(), max: MAX_COLUMNS });
        }

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name)?;

        for (c, header) in table.headers().iter().enumerate() {
            put(sheet, 0, c, header)?;
        }
        for (r, row) in table.rows().iter().enumerate() {
            let row_num = RowNum::try_from(r + 1)
                .map_err(|_| rust_xlsxwriter::XlsxError::RowColumnLimitError)?;
            for (c, cell) in row.iter().enumerate() {
                if let Some(value) = cell {
                    put(sheet, row_num, c, value)?;
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

fn put(sheet: &mut Worksheet, row: RowNum, col: usize, value: &str) -> Result<(), ExportError> {
    if value.is_empty() {
        return Ok(());
    }
    // Width was checked against MAX_COLUMNS, which fits a ColNum.
    let col = col as ColNum;
    if value.chars().count() > MAX_CELL_CHARS {
        warn!(row, col, "cell longer than {MAX_CELL_CHARS} chars, truncated");
        let cut: String = value.chars().take(MAX_CELL_CHARS).collect();
        sheet.write_string(row, col, &cut)?;
    } else {
        sheet.write_string(row, col, value)?;
    }
    Ok(())
}
