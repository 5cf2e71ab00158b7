//! # Catalog Text Codec
//!
//! Encodes/decodes the category → products mapping to the line-oriented
//! catalog file. The format predates this implementation and must be
//! reproduced byte-for-byte; do not "clean it up".
//!
//! ## Grammar (one record per physical line, blank lines ignored)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Bebidas:                      ← trailing ':' opens a category      │
//! │  Cola -                        ← trailing '-' names the product     │
//! │  Hielo ; 3→500→cola.png        ← body: TAB-separated fields         │
//! │                                ← blank separator between categories │
//! │  Postres:                      ← a category may stay empty          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Body fields, each trimmed of surrounding space/tab:
//! - a field containing `;` is an ingredient `name ; quantity` pair;
//!   a quantity that does not parse as an unsigned integer is a hard
//!   parse error, not a skip
//! - a field without `;` is the price **or** an image filename. This
//!   dual-purpose field is a quirk of the format: the parse is explicit
//!   (numeric first, path fallback) rather than trusting either case
//!
//! Products are appended with a synthetic id of 1 - the format does not
//! persist per-product unique ids across reload.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::warn;

use mesero_core::{Ingredient, Product};

use crate::error::{StoreError, StoreResult};

/// Synthetic id assigned to every product read back from the catalog file.
const RELOADED_PRODUCT_ID: i64 = 1;

/// Decodes the catalog file into a category → products mapping.
///
/// The `BTreeMap` keeps category iteration lexicographic, which is what
/// makes paged product queries deterministic across reloads.
pub fn decode(path: &Path) -> StoreResult<BTreeMap<String, Vec<Product>>> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

    let mut categories: BTreeMap<String, Vec<Product>> = BTreeMap::new();
    let mut current_category: Option<String> = None;
    // Product named by the last '-' line, waiting for its body line.
    let mut pending_name: Option<String> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_suffix(':') {
            // Declares the category even if no products follow.
            let name = name.trim().to_string();
            categories.entry(name.clone()).or_default();
            current_category = Some(name);
            pending_name = None;
        } else if let Some(name) = line.strip_suffix('-') {
            pending_name = Some(name.trim().to_string());
        } else {
            let category = current_category.as_ref().ok_or_else(|| {
                StoreError::parse(path, line_no, "product body before any category line")
            })?;
            let name = pending_name.take().ok_or_else(|| {
                StoreError::parse(path, line_no, "product body without a preceding name line")
            })?;

            let product = parse_body(path, line_no, base_dir, name, raw_line)?;
            categories
                .entry(category.clone())
                .or_default()
                .push(product);
        }
    }

    Ok(categories)
}

/// Parses one product body line (the TAB-separated field list).
fn parse_body(
    path: &Path,
    line_no: usize,
    base_dir: &Path,
    name: String,
    line: &str,
) -> StoreResult<Product> {
    let mut product = Product::new(RELOADED_PRODUCT_ID, name, Vec::new(), 0.0);

    for field in line.split('\t') {
        let field = field.trim();
        if field.is_empty() {
            // Trailing TAB after the last ingredient leaves an empty field.
            continue;
        }

        if let Some((supply, quantity)) = field.split_once(';') {
            let quantity = quantity.trim().parse::<u64>().map_err(|_| {
                StoreError::parse(
                    path,
                    line_no,
                    format!("bad ingredient quantity: '{}'", quantity.trim()),
                )
            })?;
            product
                .ingredients
                .push(Ingredient::new(supply.trim(), quantity));
        } else if let Ok(price) = field.parse::<f64>() {
            product.price = price;
        } else {
            // Not numeric: the field is an image filename relative to the
            // catalog file's directory.
            product.image = Some(base_dir.join(field));
        }
    }

    Ok(product)
}

/// Encodes the mapping back to the catalog file.
///
/// When a product carries an image reference, its bytes are copied to a
/// sibling `<sanitized name>.png`; a failed copy is logged and skipped,
/// never fatal to the catalog write.
pub fn encode(categories: &BTreeMap<String, Vec<Product>>, path: &Path) -> StoreResult<()> {
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut out = String::new();

    for (category, products) in categories {
        let _ = writeln!(out, "{category}:");
        for product in products {
            let _ = writeln!(out, "{} -", product.name);
            for ingredient in &product.ingredients {
                let _ = write!(out, "{} ; {}\t", ingredient.supply, ingredient.quantity);
            }
            let _ = write!(out, "{}", product.price);
            if let Some(source) = &product.image {
                let file_name = image_file_name(&product.name);
                let _ = write!(out, "\t{file_name}");
                save_image(source, &base_dir.join(&file_name));
            }
            out.push('\n');
        }
        out.push('\n');
    }

    fs::write(path, out).map_err(|e| StoreError::io(path, e))
}

/// Image filename derived from the product name; anything that could
/// upset a filesystem is flattened to '_'.
fn image_file_name(product_name: &str) -> String {
    let sanitized: String = product_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("{sanitized}.png")
}

/// Best-effort copy of the product image next to the catalog file.
fn save_image(source: &Path, destination: &Path) {
    if source == destination {
        return;
    }
    if let Err(e) = fs::copy(source, destination) {
        warn!(
            source = %source.display(),
            destination = %destination.display(),
            error = %e,
            "failed to save product image"
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
