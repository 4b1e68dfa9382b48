// src/export/table.rs
//! Sparse table: fixed leading block plus one column per unified attribute.
//!
//! `None` is a blank cell. Writers must leave it empty, never "0" or "null".

use crate::error::ExportError;
use crate::product::ProductRecord;
use crate::schema::{LEADING_COLUMNS, LEADING_HEADERS, UnifiedSchema};

pub type Cell = Option<String>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl SparseTable {
    /// One row per product, input order. Within a product a repeated
    /// attribute name overwrites the earlier value in its column; the
    /// ATTRIBUTES_JSON cell keeps every pair.
    pub fn build(products: &[ProductRecord], schema: &UnifiedSchema) -> Result<Self, ExportError> {
        let mut headers: Vec<String> = LEADING_HEADERS.iter().map(|h| s!(*h)).collect();
        headers.extend(schema.names().iter().cloned());

        let rows = products
            .iter()
            .map(|p| build_row(p, schema))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Data rows, header excluded.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// `row` is 0-based among data rows; `column` is the 1-based sheet column.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        let idx = column.checked_sub(1)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }
}

fn build_row(p: &ProductRecord, schema: &UnifiedSchema) -> Result<Vec<Cell>, ExportError> {
    let mut row: Vec<Cell> = Vec::with_capacity(schema.width());
    row.push(Some(p.source_url.clone()));
    row.push(Some(p.name.clone()));
    row.push(Some(p.sku.clone()));
    row.push(Some(p.price.clone()));
    row.push(Some(p.category.clone()));
    row.push(Some(p.description.clone()));
    row.push(Some(p.primary_image.clone()));
    row.push(Some(p.additional_images.join(",")));
    row.push(Some(serde_json::to_string(&p.attributes)?));
    debug_assert_eq!(row.len(), LEADING_COLUMNS);

    row.resize(schema.width(), None);
    for attr in &p.attributes {
        if let Some(slot) = schema.slot(&attr.name) {
            row[LEADING_COLUMNS + slot] = Some(attr.value.clone());
        }
    }
    Ok(row)
}
