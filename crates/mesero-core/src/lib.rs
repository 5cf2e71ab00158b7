//! # mesero-core: Pure Domain Logic for Mesero POS
//!
//! This crate is the **heart** of the Mesero point-of-sale system. It holds
//! the domain model as plain data types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Mesero POS Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                 UI layer (out of scope)                       │  │
//! │  │   login ──► catalogs ──► billing ──► cashier ──► settings     │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │                mesero-store (persistence layer)               │  │
//! │  │        catalog store, file codecs, session lifecycle          │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │              ★ mesero-core (THIS CRATE) ★                     │  │
//! │  │                                                               │  │
//! │  │   ┌───────────┐   ┌───────────┐   ┌───────────┐               │  │
//! │  │   │   types   │   │  paging   │   │ password  │               │  │
//! │  │   │  Product  │   │  windows  │   │ 64-bit    │               │  │
//! │  │   │  Receipt  │   │           │   │ hash shim │               │  │
//! │  │   └───────────┘   └───────────┘   └───────────┘               │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO FILESYSTEM • PURE FUNCTIONS                     │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Supply, User, Receipt, ...)
//! - [`paging`] - Page-window arithmetic shared by all paged queries
//! - [`password`] - The 64-bit password hash behind the binary users file
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: filesystem access is FORBIDDEN here
//! 3. **Explicit Equality**: several entities compare on a *subset* of their
//!    fields on purpose (login matching, image-free product identity) - the
//!    rules live next to the types, never scattered through the store

// =============================================================================
// Module Declarations
// =============================================================================

pub mod paging;
pub mod password;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use paging::page_window;
pub use types::{
    AccessLevel, Ingredient, Order, OrderItem, PageAccess, PaymentMethod, Product, Receipt,
    Supply, UnknownPaymentMethod, User,
};
