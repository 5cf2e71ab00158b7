//! # Supply Text Codec
//!
//! One supply per line, whitespace-delimited: `name quantity measure_unit`.
//!
//! Because whitespace is the delimiter, supply names cannot themselves
//! contain spaces. That is a limitation of the on-disk format, carried
//! forward unchanged for compatibility.

use std::fs;
use std::path::Path;

use mesero_core::Supply;

use crate::error::{StoreError, StoreResult};

/// Decodes the supplies file. Missing file is an I/O error, not an empty
/// list - the caller decides whether a fresh install seeds one.
pub fn decode(path: &Path) -> StoreResult<Vec<Supply>> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;

    let mut supplies = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(name), Some(quantity), Some(unit), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(StoreError::parse(
                path,
                line_no,
                format!("expected 'name quantity unit', got '{line}'"),
            ));
        };

        let quantity = quantity.parse::<u64>().map_err(|_| {
            StoreError::parse(path, line_no, format!("bad supply quantity: '{quantity}'"))
        })?;

        supplies.push(Supply::new(name, quantity, unit));
    }

    Ok(supplies)
}

/// Encodes the supply list back to disk.
pub fn encode(supplies: &[Supply], path: &Path) -> StoreResult<()> {
    let mut out = String::new();
    for supply in supplies {
        out.push_str(&format!(
            "{} {} {}\n",
            supply.name, supply.quantity, supply.measure_unit
        ));
    }
    fs::write(path, out).map_err(|e| StoreError::io(path, e))
}
