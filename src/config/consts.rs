// src/config/consts.rs

// Input
pub const SOURCE_FILE: &str = "source.txt";

// Net
pub const USER_AGENT: &str = "catalog_scrape/0.1";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms

// Assets
pub const UPLOAD_DIR: &str = "upload";
pub const MAIN_IMAGE_FOLDER: &str = "main";
pub const MORE_IMAGES_FOLDER: &str = "more";
pub const ASSET_SUFFIX_LEN: usize = 10;

// Export
pub const OUTPUT_STEM: &str = "products";
pub const OUTPUT_SUFFIX_LEN: usize = 5;
pub const SHEET_NAME: &str = "Products";
pub const MAX_NAME_ATTEMPTS: usize = 8;

// Local log
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Extraction
/// Boilerplate sentence the storefront appends to descriptions.
pub const DESCRIPTION_DISCLAIMER: &str =
    "Внешний вид и комплектация товара может незначительно отличаться от фотографий на сайте";
