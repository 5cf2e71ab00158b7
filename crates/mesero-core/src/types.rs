//! # Domain Types
//!
//! Core domain types for the Mesero POS store.
//!
//! ## Equality Rules (read before touching!)
//! Several types implement `PartialEq` over a *subset* of their fields.
//! These rules are load-bearing: the store's dedup checks and the login
//! flow depend on them.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Type      Compared fields                 Ignored fields           │
//! │  ───────   ─────────────────────────────   ───────────────────────  │
//! │  Supply    name, quantity, measure_unit    (none)                   │
//! │  Product   id, name, price, ingredients    image                    │
//! │  User      name, password_hash             id, permissions          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::password::hash_password;

// =============================================================================
// Supply
// =============================================================================

/// An inventory stock item (ingredient) with a quantity and unit of measure.
///
/// Equality is structural over all three fields; the store relies on that
/// for its dedup checks. Quantity is unsigned - the decrement engine
/// saturates at zero instead of underflowing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    pub name: String,
    /// Current stock level, in `measure_unit` units.
    pub quantity: u64,
    pub measure_unit: String,
}

impl Supply {
    pub fn new(name: impl Into<String>, quantity: u64, measure_unit: impl Into<String>) -> Self {
        Supply {
            name: name.into(),
            quantity,
            measure_unit: measure_unit.into(),
        }
    }
}

// =============================================================================
// Ingredient
// =============================================================================

/// A usage reference from a product into the supply list.
///
/// `quantity` is the amount consumed *per unit sold* - distinct from the
/// supply's stock quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Name of the referenced supply (looked up by linear scan at sale time).
    pub supply: String,
    /// Usage per unit sold.
    pub quantity: u64,
}

impl Ingredient {
    pub fn new(supply: impl Into<String>, quantity: u64) -> Self {
        Ingredient {
            supply: supply.into(),
            quantity,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A sellable product: a recipe of ingredient usages plus a price.
///
/// ## Price as `f64`
/// The catalog text file stores the price as a decimal literal that must
/// survive re-encoding, so the price stays a float end to end rather than
/// being converted to integer cents.
///
/// ## Identity
/// Equality covers `(id, name, price, ingredients)`; the image reference is
/// excluded so that re-saving an image never changes product identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Ordered recipe; order is part of product identity.
    pub ingredients: Vec<Ingredient>,
    pub price: f64,
    /// Optional image file reference travelling alongside the record.
    /// Not part of equality.
    pub image: Option<PathBuf>,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, ingredients: Vec<Ingredient>, price: f64) -> Self {
        Product {
            id,
            name: name.into(),
            ingredients,
            price,
            image: None,
        }
    }

    /// True for the default/empty product, which the store refuses to add.
    pub fn is_empty(&self) -> bool {
        *self == Product::default()
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.price == other.price
            && self.ingredients == other.ingredients
    }
}

// =============================================================================
// Page Access
// =============================================================================

/// Per-UI-page permission level attached to a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Page is hidden from the user.
    #[default]
    Denied,
    /// Page is visible but controls are read-only.
    NonEditable,
    /// Full access.
    Editable,
}

impl AccessLevel {
    /// Decodes the on-disk representation (0/1/2). Anything else is a
    /// corrupt users file and must be rejected by the codec.
    pub fn from_raw(raw: u64) -> Option<AccessLevel> {
        match raw {
            0 => Some(AccessLevel::Denied),
            1 => Some(AccessLevel::NonEditable),
            2 => Some(AccessLevel::Editable),
            _ => None,
        }
    }

    /// The on-disk representation.
    pub fn as_raw(self) -> u64 {
        match self {
            AccessLevel::Denied => 0,
            AccessLevel::NonEditable => 1,
            AccessLevel::Editable => 2,
        }
    }
}

/// One entry of a user's permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAccess {
    /// Index of the UI page this entry gates.
    pub page: usize,
    pub access: AccessLevel,
}

impl PageAccess {
    pub fn new(page: usize, access: AccessLevel) -> Self {
        PageAccess { page, access }
    }
}

// =============================================================================
// User
// =============================================================================

/// A user account with a per-page permission table.
///
/// ## Login-matching equality
/// Two users compare equal iff `(name, password_hash)` match. Ids and
/// permission tables are ignored: this is the lookup the login flow runs
/// against the stored user list, not full identity. Deliberate - do not
/// "fix" it to structural equality without also changing `start()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// 64-bit hash of the password; see [`crate::password`] for caveats.
    pub password_hash: u64,
    pub permissions: Vec<PageAccess>,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        User {
            id,
            name: name.into(),
            password_hash: 0,
            permissions: Vec::new(),
        }
    }

    /// Replaces the stored hash with the hash of `raw`.
    pub fn set_password(&mut self, raw: &str) {
        self.password_hash = hash_password(raw);
    }

    /// Checks `raw` against the stored hash.
    pub fn verify_password(&self, raw: &str) -> bool {
        self.password_hash == hash_password(raw)
    }

    /// Access level for a UI page; absent entries mean denied.
    pub fn page_access(&self, page: usize) -> AccessLevel {
        self.permissions
            .iter()
            .find(|p| p.page == page)
            .map(|p| p.access)
            .unwrap_or(AccessLevel::Denied)
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.password_hash == other.password_hash
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid. The string form is what both receipt encodings
/// carry on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a receipt stream names a payment method we do not know.
#[derive(Debug, Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

// =============================================================================
// Order & Receipt
// =============================================================================

/// One line of an order: a product snapshot and how many were sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: Product,
    pub quantity: u64,
}

impl OrderItem {
    pub fn new(product: Product, quantity: u64) -> Self {
        OrderItem { product, quantity }
    }

    pub fn line_total(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

/// A sale in progress, as handed over by the billing UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub items: Vec<OrderItem>,
    pub payment_method: PaymentMethod,
    /// Amount handed over by the customer.
    pub received: f64,
}

impl Order {
    pub fn total(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

/// An immutable record of a completed sale.
///
/// Field declaration order matches the on-disk field order of both receipt
/// encodings; keep them in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub business_name: String,
    pub timestamp: DateTime<Utc>,
    pub username: String,
    pub payment_method: PaymentMethod,
    pub id: u64,
    pub items: Vec<OrderItem>,
    pub received: f64,
    pub total: f64,
}

impl Receipt {
    /// Freezes an order into a receipt. Receipts capture the sale, not the
    /// catalog: later product edits never touch an issued receipt.
    pub fn from_order(
        business_name: impl Into<String>,
        id: u64,
        username: impl Into<String>,
        timestamp: DateTime<Utc>,
        order: &Order,
    ) -> Self {
        Receipt {
            business_name: business_name.into(),
            timestamp,
            username: username.into(),
            payment_method: order.payment_method,
            id,
            items: order.items.clone(),
            received: order.received,
            total: order.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_equality_ignores_image() {
        let mut a = Product::new(1, "Cola", vec![Ingredient::new("Hielo", 3)], 500.0);
        let b = a.clone();
        a.image = Some(PathBuf::from("cola.png"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_product_equality_covers_ingredients() {
        let a = Product::new(1, "Cola", vec![Ingredient::new("Hielo", 3)], 500.0);
        let b = Product::new(1, "Cola", vec![Ingredient::new("Hielo", 4)], 500.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_default_product_is_empty() {
        assert!(Product::default().is_empty());
        assert!(!Product::new(1, "Cola", vec![], 500.0).is_empty());
    }

    #[test]
    fn test_user_equality_is_login_matching() {
        let mut a = User::new(1, "ana");
        a.set_password("secreto");
        let mut b = User::new(99, "ana");
        b.set_password("secreto");
        b.permissions.push(PageAccess::new(0, AccessLevel::Editable));

        // Different id and permissions, same login identity.
        assert_eq!(a, b);

        let mut c = User::new(1, "ana");
        c.set_password("otro");
        assert_ne!(a, c);
    }

    #[test]
    fn test_user_password_roundtrip() {
        let mut user = User::new(1, "ana");
        user.set_password("secreto");
        assert!(user.verify_password("secreto"));
        assert!(!user.verify_password("Secreto"));
    }

    #[test]
    fn test_page_access_defaults_to_denied() {
        let mut user = User::new(1, "ana");
        user.permissions.push(PageAccess::new(2, AccessLevel::NonEditable));
        assert_eq!(user.page_access(2), AccessLevel::NonEditable);
        assert_eq!(user.page_access(7), AccessLevel::Denied);
    }

    #[test]
    fn test_access_level_raw_roundtrip() {
        for level in [
            AccessLevel::Denied,
            AccessLevel::NonEditable,
            AccessLevel::Editable,
        ] {
            assert_eq!(AccessLevel::from_raw(level.as_raw()), Some(level));
        }
        assert_eq!(AccessLevel::from_raw(3), None);
    }

    #[test]
    fn test_payment_method_string_roundtrip() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_order_total() {
        let cola = Product::new(1, "Cola", vec![], 500.0);
        let pan = Product::new(1, "Pan", vec![], 250.5);
        let order = Order {
            items: vec![OrderItem::new(cola, 2), OrderItem::new(pan, 1)],
            payment_method: PaymentMethod::Cash,
            received: 2000.0,
        };
        assert_eq!(order.total(), 1250.5);
    }

    #[test]
    fn test_receipt_freezes_order() {
        let cola = Product::new(1, "Cola", vec![Ingredient::new("Hielo", 3)], 500.0);
        let order = Order {
            items: vec![OrderItem::new(cola, 2)],
            payment_method: PaymentMethod::Card,
            received: 1000.0,
        };
        let receipt = Receipt::from_order("La Fonda", 7, "ana", Utc::now(), &order);
        assert_eq!(receipt.id, 7);
        assert_eq!(receipt.total, 1000.0);
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.payment_method, PaymentMethod::Card);
    }
}
