//! # mesero-store: Persistence Layer for Mesero POS
//!
//! This crate owns the authoritative domain state and every file it is
//! persisted to: the catalog store, the four bespoke codecs, the
//! inventory decrement engine and the session lifecycle.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Mesero POS Data Flow                           │
//! │                                                                     │
//! │  UI widgets (query/mutate)                                          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                 mesero-store (THIS CRATE)                     │  │
//! │  │                                                               │  │
//! │  │   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐      │  │
//! │  │   │ CatalogStore │──►│  inventory   │   │    codec     │      │  │
//! │  │   │  (store.rs)  │   │  decrement   │   │ catalog txt  │      │  │
//! │  │   │  CRUD+pages  │   │   engine     │   │ supplies txt │      │  │
//! │  │   │  lifecycle   │   └──────────────┘   │ users bin    │      │  │
//! │  │   └──────┬───────┘                      │ receipts     │      │  │
//! │  │          └─────────────────────────────►└──────┬───────┘      │  │
//! │  └────────────────────────────────────────────────┼──────────────┘  │
//! │                                                   ▼                 │
//! │              products.txt  supplies.txt  users.bin  receipts.bin    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - the catalog store: CRUD, sessions, pagination
//! - [`codec`] - the four on-disk formats
//! - [`inventory`] - stock decrement on recorded sales
//! - [`config`] - data directory and derived file paths
//! - [`error`] - the Io/Parse/NotFound taxonomy
//!
//! ## Concurrency
//! Single-threaded, cooperative: all persistence is synchronous and
//! inline with the mutating call. Nothing in here locks or spawns.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod config;
pub mod error;
pub mod inventory;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::{CatalogStore, ProductHandle};
