// src/product.rs
use serde::{Deserialize, Serialize};

/// One labeled value from a product page. Names repeat freely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Everything extracted from a single source page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductRecord {
    pub source_url: String,
    pub name: String,
    pub sku: String,
    /// Digits only; `"0"` when the page had none.
    pub price: String,
    pub category: String,
    /// Sanitized HTML fragment.
    pub description: String,
    pub primary_image: String,
    pub additional_images: Vec<String>,
    pub attributes: Vec<Attribute>,
}

impl ProductRecord {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            price: s!("0"),
            ..Self::default()
        }
    }

    /// A record without a name is a failed extraction and must not be exported.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty()
    }

    /// Last occurrence wins when a name repeats.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}
