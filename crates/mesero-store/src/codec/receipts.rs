//! # Receipt Codec
//!
//! Two parallel encodings of completed sales, kept for the two consumers
//! that already exist: the export file (tagged binary stream) and the
//! UI-facing snapshot (structured line-delimited JSON).
//!
//! ## Field order (identical in both encodings)
//! ```text
//! business_name, timestamp (RFC 3339), username, payment_method,
//! id, items (name, quantity)*, received, total
//! ```
//!
//! ## Receipts freeze the sale, not the catalog
//! Line items persist only the product *name* and quantity. Decoding
//! rebuilds each item around a placeholder product (empty ingredients,
//! zero price); the full product data is deliberately not preserved.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mesero_core::{OrderItem, PaymentMethod, Product, Receipt};

use crate::codec::users::ByteCursor;
use crate::error::{StoreError, StoreResult};

/// Synthetic id for placeholder products rebuilt from a receipt stream.
const PLACEHOLDER_PRODUCT_ID: i64 = 1;

// =============================================================================
// Tagged Binary Stream
// =============================================================================

/// Encodes a receipt list as the tagged binary stream:
/// `count: u64`, then each receipt with `u64`-length-prefixed UTF-8
/// strings, little-endian integers and IEEE-754 bit patterns for the
/// two trailing amounts.
pub fn encode_file(receipts: &[Receipt], path: &Path) -> StoreResult<()> {
    let mut out = Vec::new();
    out.extend_from_slice(&(receipts.len() as u64).to_le_bytes());
    for receipt in receipts {
        write_binary(receipt, &mut out);
    }
    fs::write(path, out).map_err(|e| StoreError::io(path, e))
}

/// Decodes the tagged binary stream back into receipts.
pub fn decode_file(path: &Path) -> StoreResult<Vec<Receipt>> {
    let data = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    let mut cursor = ByteCursor::new(path, &data);

    let count = cursor.read_u64()?;
    let mut receipts = Vec::new();
    for _ in 0..count {
        receipts.push(read_binary(&mut cursor)?);
    }
    Ok(receipts)
}

fn write_binary(receipt: &Receipt, out: &mut Vec<u8>) {
    write_string(&receipt.business_name, out);
    write_string(&receipt.timestamp.to_rfc3339(), out);
    write_string(&receipt.username, out);
    write_string(receipt.payment_method.as_str(), out);
    out.extend_from_slice(&receipt.id.to_le_bytes());

    out.extend_from_slice(&(receipt.items.len() as u64).to_le_bytes());
    for item in &receipt.items {
        write_string(&item.product.name, out);
        out.extend_from_slice(&item.quantity.to_le_bytes());
    }

    out.extend_from_slice(&receipt.received.to_bits().to_le_bytes());
    out.extend_from_slice(&receipt.total.to_bits().to_le_bytes());
}

fn read_binary(cursor: &mut ByteCursor<'_>) -> StoreResult<Receipt> {
    let business_name = read_string(cursor)?;
    let timestamp = read_string(cursor)?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| cursor.malformed(format!("bad receipt timestamp: {e}")))?
        .with_timezone(&Utc);
    let username = read_string(cursor)?;
    let payment_method = read_string(cursor)?;
    let payment_method = PaymentMethod::from_str(&payment_method)
        .map_err(|e| cursor.malformed(e.to_string()))?;
    let id = cursor.read_u64()?;

    let item_count = cursor.read_u64()?;
    let mut items = Vec::new();
    for _ in 0..item_count {
        let name = read_string(cursor)?;
        let quantity = cursor.read_u64()?;
        items.push(OrderItem::new(placeholder_product(name), quantity));
    }

    let received = cursor.read_f64()?;
    let total = cursor.read_f64()?;

    Ok(Receipt {
        business_name,
        timestamp,
        username,
        payment_method,
        id,
        items,
        received,
        total,
    })
}

fn write_string(s: &str, out: &mut Vec<u8>) {
    out.extend_from_slice(&(s.len() as u64).to_le_bytes());
    out.extend_from_slice(s.as_bytes());
}

fn read_string(cursor: &mut ByteCursor<'_>) -> StoreResult<String> {
    let len = cursor.read_u64()?;
    let bytes = cursor.read_bytes(len)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| cursor.malformed("string is not valid UTF-8"))
}

fn placeholder_product(name: String) -> Product {
    Product::new(PLACEHOLDER_PRODUCT_ID, name, Vec::new(), 0.0)
}

// =============================================================================
// Structured Stream (UI snapshot)
// =============================================================================

/// One receipt as first-class fields, for the structured stream. Field
/// declaration order matches the binary stream; keep them in sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptRecord {
    business_name: String,
    timestamp: DateTime<Utc>,
    username: String,
    payment_method: PaymentMethod,
    id: u64,
    items: Vec<ItemRecord>,
    received: f64,
    total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemRecord {
    name: String,
    quantity: u64,
}

impl From<&Receipt> for ReceiptRecord {
    fn from(receipt: &Receipt) -> Self {
        ReceiptRecord {
            business_name: receipt.business_name.clone(),
            timestamp: receipt.timestamp,
            username: receipt.username.clone(),
            payment_method: receipt.payment_method,
            id: receipt.id,
            items: receipt
                .items
                .iter()
                .map(|item| ItemRecord {
                    name: item.product.name.clone(),
                    quantity: item.quantity,
                })
                .collect(),
            received: receipt.received,
            total: receipt.total,
        }
    }
}

impl ReceiptRecord {
    fn into_receipt(self) -> Receipt {
        Receipt {
            business_name: self.business_name,
            timestamp: self.timestamp,
            username: self.username,
            payment_method: self.payment_method,
            id: self.id,
            items: self
                .items
                .into_iter()
                .map(|item| OrderItem::new(placeholder_product(item.name), item.quantity))
                .collect(),
            received: self.received,
            total: self.total,
        }
    }
}

/// Writes the structured snapshot: one JSON record per line.
pub fn encode_snapshot(receipts: &[Receipt], path: &Path) -> StoreResult<()> {
    let mut out = String::new();
    for receipt in receipts {
        let record = ReceiptRecord::from(receipt);
        // Serialization of a plain record cannot fail; treat it as I/O.
        let line = serde_json::to_string(&record)
            .map_err(|e| StoreError::io(path, std::io::Error::other(e)))?;
        out.push_str(&line);
        out.push('\n');
    }
    fs::write(path, out).map_err(|e| StoreError::io(path, e))
}

/// Reads the structured snapshot back.
pub fn decode_snapshot(path: &Path) -> StoreResult<Vec<Receipt>> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let mut receipts = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: ReceiptRecord = serde_json::from_str(line)
            .map_err(|e| StoreError::parse(path, idx + 1, e.to_string()))?;
        receipts.push(record.into_receipt());
    }
    Ok(receipts)
}

// =============================================================================
// Unit Tests
// =============================================================================
