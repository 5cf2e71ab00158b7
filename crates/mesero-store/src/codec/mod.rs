//! # File Codecs
//!
//! The four bespoke on-disk formats the store survives restarts with.
//! Each codec is a pair of free `encode`/`decode` functions over a path;
//! none of them touch store state.
//!
//! - [`catalog`] - line-oriented text, category → products
//! - [`supplies`] - flat whitespace-delimited text
//! - [`users`] - fixed-layout little-endian binary
//! - [`receipts`] - tagged binary stream + structured JSON snapshot

pub mod catalog;
pub mod receipts;
pub mod supplies;
pub mod users;
