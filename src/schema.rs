// src/schema.rs
//! Attribute-schema unification.
//!
//! Every product carries its own unordered bag of attribute names. Export
//! needs one column per distinct name, so the whole batch is scanned once and
//! names are slotted in first-seen order: product order, then attribute order
//! within each product. Comparison is exact; `"Color"`, `"color"` and
//! `"Color "` are three columns.
//!
//! Columns are 1-based and the first attribute lands right after the fixed
//! leading block, so with nine leading columns it is column 10.

use std::collections::HashMap;

use crate::product::ProductRecord;

/// Fixed columns, in order, ahead of the attribute columns.
pub const LEADING_HEADERS: [&str; 9] = [
    "URL",
    "NAME",
    "SKU",
    "PRICE",
    "CATEGORY",
    "DESCRIPTION",
    "MAIN_IMAGE",
    "MORE_IMAGES",
    "ATTRIBUTES_JSON",
];

pub const LEADING_COLUMNS: usize = LEADING_HEADERS.len();

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnifiedSchema {
    names: Vec<String>,
    slots: HashMap<String, usize>,
}

impl UnifiedSchema {
    pub fn unify(products: &[ProductRecord]) -> Self {
        let mut schema = Self::default();
        for attr in products.iter().flat_map(|p| p.attributes.iter()) {
            if !schema.slots.contains_key(&attr.name) {
                schema.slots.insert(attr.name.clone(), schema.names.len());
                schema.names.push(attr.name.clone());
            }
        }
        schema
    }

    /// Names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 0-based position among the attribute columns.
    pub fn slot(&self, name: &str) -> Option<usize> {
        self.slots.get(name).copied()
    }

    /// 1-based sheet column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.slot(name).map(|i| LEADING_COLUMNS + 1 + i)
    }

    /// `(name, column)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, usize)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), LEADING_COLUMNS + 1 + i))
    }

    /// Total sheet width: leading block plus attribute columns.
    pub fn width(&self) -> usize {
        LEADING_COLUMNS + self.names.len()
    }
}
