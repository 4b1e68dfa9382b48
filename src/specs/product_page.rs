// src/specs/product_page.rs
//! Scraping *spec* for a storefront product page.
//!
//! Purpose:
//! - Read the identity block (`h1`, SKU, price), the last breadcrumb as
//!   category, the description fragment and the labeled feature list.
//! - Collect image links; the first is the primary image, the rest are
//!   "more" images.
//!
//! Responsibilities:
//! - Selector precedence and text cleanup (whitespace collapse, price digits).
//! - Description cleanup: drop the storefront disclaimer and empty `<p>`,
//!   then reduce to the allow-listed tag set.
//!
//! Non-Responsibilities:
//! - Fetching, image storage, skipping policy. Those are injected or owned by
//!   the pipeline.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::ProductExtractor;
use crate::assets::AssetStore;
use crate::config::consts::{DESCRIPTION_DISCLAIMER, MAIN_IMAGE_FOLDER, MORE_IMAGES_FOLDER};
use crate::core::net::PageFetcher;
use crate::core::sanitize::{DESCRIPTION_TAGS, normalize_price, normalize_ws, sanitize_children};
use crate::error::{ExtractError, SourceError};
use crate::product::{Attribute, ProductRecord};

/// CSS selectors for one storefront theme. Defaults match CS-Cart markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selectors {
    pub name: String,
    pub sku: String,
    pub price: String,
    pub breadcrumb: String,
    pub description: String,
    pub features: String,
    pub feature_row: String,
    pub feature_label: String,
    pub feature_value: String,
    pub image_link: String,
    /// Elements whose text contains this are cut from the description.
    pub disclaimer: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            name: s!("h1"),
            sku: s!("span.ty-control-group__item"),
            price: s!("span.ty-price-num"),
            breadcrumb: s!("a.ty-breadcrumbs__a"),
            description: s!("div#content_description"),
            features: s!("div#content_features"),
            feature_row: s!("div.ty-product-feature"),
            feature_label: s!("div.ty-product-feature__label"),
            feature_value: s!("div.ty-product-feature__value"),
            image_link: s!("a.cm-image-previewer"),
            disclaimer: s!(DESCRIPTION_DISCLAIMER),
        }
    }
}

/// Parsed form of [`Selectors`].
pub struct CompiledSelectors {
    name: Selector,
    sku: Selector,
    price: Selector,
    breadcrumb: Selector,
    description: Selector,
    features: Selector,
    feature_row: Selector,
    feature_label: Selector,
    feature_value: Selector,
    image_link: Selector,
    disclaimer: String,
}

impl CompiledSelectors {
    pub fn compile(sel: &Selectors) -> Result<Self, ExtractError> {
        Ok(Self {
            name: parse(&sel.name)?,
            sku: parse(&sel.sku)?,
            price: parse(&sel.price)?,
            breadcrumb: parse(&sel.breadcrumb)?,
            description: parse(&sel.description)?,
            features: parse(&sel.features)?,
            feature_row: parse(&sel.feature_row)?,
            feature_label: parse(&sel.feature_label)?,
            feature_value: parse(&sel.feature_value)?,
            image_link: parse(&sel.image_link)?,
            disclaimer: sel.disclaimer.clone(),
        })
    }
}

fn parse(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::Selector { selector: s!(css) })
}

/// A page read into a record, images still as absolute URLs.
#[derive(Debug)]
pub struct ParsedPage {
    pub record: ProductRecord,
    pub image_urls: Vec<String>,
}

/// Pure read of one document. `url` is the page address; it fills
/// `source_url` and resolves relative image links.
pub fn parse_page(url: &str, html: &str, sel: &CompiledSelectors) -> ParsedPage {
    let doc = Html::parse_document(html);
    let base = Url::parse(url).ok();

    let mut record = ProductRecord::new(url);
    record.name = all_text(&doc, &sel.name);
    record.sku = all_text(&doc, &sel.sku);
    record.price = normalize_price(&first_text(&doc, &sel.price));
    record.category = doc
        .select(&sel.breadcrumb)
        .last()
        .map(text_of)
        .unwrap_or_default();
    record.description = read_description(&doc, sel);
    record.attributes = read_attributes(&doc, sel);

    let image_urls = doc
        .select(&sel.image_link)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| resolve(base.as_ref(), href))
        .collect();

    ParsedPage { record, image_urls }
}

fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Text of every match run together, as one string.
fn all_text(doc: &Html, sel: &Selector) -> String {
    normalize_ws(&doc.select(sel).flat_map(|el| el.text()).collect::<String>())
}

fn first_text(doc: &Html, sel: &Selector) -> String {
    doc.select(sel).next().map(text_of).unwrap_or_default()
}

fn read_description(doc: &Html, sel: &CompiledSelectors) -> String {
    let Some(root) = doc.select(&sel.description).next() else { return s!() };
    let disclaimer = sel.disclaimer.as_str();

    let keep = |el: ElementRef<'_>| {
        let text: String = el.text().collect();
        if !disclaimer.is_empty() && text.contains(disclaimer) {
            return false;
        }
        !(el.value().name() == "p" && text.is_empty())
    };

    sanitize_children(root, DESCRIPTION_TAGS, &keep).trim().to_string()
}

fn read_attributes(doc: &Html, sel: &CompiledSelectors) -> Vec<Attribute> {
    let mut out = Vec::new();
    for block in doc.select(&sel.features) {
        for row in block.select(&sel.feature_row) {
            let name = row.select(&sel.feature_label).map(text_of).collect::<String>();
            let value = row.select(&sel.feature_value).map(text_of).collect::<String>();
            out.push(Attribute { name, value });
        }
    }
    out
}

fn resolve(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let joined = match base {
        Some(b) => b.join(href),
        None => Url::parse(href),
    };
    joined.ok().map(String::from)
}

/// Fetch, parse, then store images through the injected collaborators.
pub struct PageExtractor<F, A> {
    fetcher: F,
    assets: A,
    selectors: CompiledSelectors,
}

impl<F: PageFetcher, A: AssetStore> PageExtractor<F, A> {
    pub fn new(fetcher: F, assets: A, selectors: &Selectors) -> Result<Self, ExtractError> {
        Ok(Self { fetcher, assets, selectors: CompiledSelectors::compile(selectors)? })
    }

    fn store_image(&self, url: &str, folder: &str) -> Option<String> {
        match self.assets.download(url, folder) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(%url, "image skipped: {e}");
                None
            }
        }
    }
}

impl<F: PageFetcher, A: AssetStore> ProductExtractor for PageExtractor<F, A> {
    fn extract(&self, url: &str) -> Result<ProductRecord, SourceError> {
        let html = self.fetcher.fetch(url)?;
        let ParsedPage { mut record, image_urls } = parse_page(url, &html, &self.selectors);

        if !record.is_complete() {
            return Err(ExtractError::Incomplete.into());
        }

        let mut images = image_urls.iter();
        if let Some(first) = images.next() {
            record.primary_image = self.store_image(first, MAIN_IMAGE_FOLDER).unwrap_or_default();
        }
        record.additional_images = images
            .filter_map(|u| self.store_image(u, MORE_IMAGES_FOLDER))
            .collect();

        debug!(%url, attributes = record.attributes.len(), "extracted");
        Ok(record)
    }
}
