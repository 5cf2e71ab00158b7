//! # Store Configuration
//!
//! Where the four persisted files live and what the receipts say.
//!
//! Paths are deployment-specific: the composition root picks a data
//! directory and the file names are derived from it, so a whole
//! installation relocates by changing one path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::store::CatalogStore`].
///
/// Read-only after construction; the store never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Directory holding all four data files (and product images).
    pub data_dir: PathBuf,

    /// Business name printed at the top of every receipt.
    pub business_name: String,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>, business_name: impl Into<String>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            business_name: business_name.into(),
        }
    }

    /// The line-oriented catalog text file (categories and products).
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join("products.txt")
    }

    /// The flat supplies text file.
    pub fn supplies_path(&self) -> PathBuf {
        self.data_dir.join("supplies.txt")
    }

    /// The fixed-layout binary users file.
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join("users.bin")
    }

    /// The receipts file (tagged binary stream).
    pub fn receipts_path(&self) -> PathBuf {
        self.data_dir.join("receipts.bin")
    }

    /// Structured (line-delimited JSON) receipt snapshot for the UI store.
    pub fn receipts_snapshot_path(&self) -> PathBuf {
        self.data_dir.join("receipts.jsonl")
    }

    /// Product images are written beside the catalog file.
    pub fn image_dir(&self) -> &Path {
        &self.data_dir
    }
}
