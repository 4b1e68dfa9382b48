// src/lib.rs

#[macro_use]
pub mod macros;

pub mod assets;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod file;
pub mod log;
pub mod product;
pub mod progress;
pub mod runner;
pub mod schema;
pub mod scrape;
pub mod sources;
pub mod specs;

pub use error::{ExportError, RunError, SourceError};
pub use product::{Attribute, ProductRecord};
pub use runner::{RunSummary, run, run_with};
pub use schema::{LEADING_COLUMNS, LEADING_HEADERS, UnifiedSchema};
