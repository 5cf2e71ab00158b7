//! # Catalog Store
//!
//! The authoritative in-memory state: categories, the flattened product
//! index, supplies, users and receipts, plus the session lifecycle that
//! keeps the on-disk copies consistent across restarts.
//!
//! ## Ownership model
//! `CatalogStore` is an explicitly constructed object: the application's
//! composition root builds one and hands references to consumers. There
//! is no global instance and no interior locking - the store is accessed
//! from a single UI thread and takes `&mut self` for every mutation. An
//! embedder that introduces threads wraps it in its own lock.
//!
//! ## Persistence model
//! Every successful catalog/supply/user mutation re-serializes the whole
//! affected collection to disk before returning (no batching, no
//! transaction log). I/O latency is therefore proportional to collection
//! size on every single mutation - a known scalability ceiling.
//!
//! ## Failure surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  start/shutdown/close_cashier  → StoreResult (I/O and parse errors) │
//! │  find_product                  → StoreResult (NotFound)             │
//! │  every other mutation/query    → bool soft failure, never an Err    │
//! │                                                                     │
//! │  Persistence failures inside a boolean mutation are logged with     │
//! │  error! and the mutation still reports true: the in-memory state    │
//! │  did change, and the next successful write repairs the file.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use mesero_core::{page_window, AccessLevel, Order, Product, Receipt, Supply, User};

use crate::codec;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::inventory;

// =============================================================================
// Product Handle
// =============================================================================

/// A stable way to point at a product inside the store.
///
/// Lookups hand out handles instead of live references, so callers cannot
/// hold a reference into the category map across further mutations.
/// A handle is invalidated by any mutation of its category; re-resolve
/// with [`CatalogStore::find_product`] after mutating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductHandle {
    category: String,
    position: usize,
}

impl ProductHandle {
    /// Category key this handle points into.
    pub fn category(&self) -> &str {
        &self.category
    }
}

// =============================================================================
// Catalog Store
// =============================================================================

/// The persistent domain store. See the module docs for the ownership,
/// persistence and failure models.
#[derive(Debug)]
pub struct CatalogStore {
    config: StoreConfig,

    /// Source of truth for products. BTreeMap keeps category iteration
    /// lexicographic, which makes every paged query deterministic.
    categories: BTreeMap<String, Vec<Product>>,

    /// Flattening of `categories`, rebuilt wholesale after every category
    /// mutation. Never patched incrementally - rebuilding is cheap and
    /// cannot drift.
    product_index: Vec<(String, Product)>,

    supplies: Vec<Supply>,
    users: Vec<User>,

    /// Receipts of the current cashier session.
    ongoing_receipts: Vec<Receipt>,
    /// All-time receipts, as persisted.
    registered_receipts: Vec<Receipt>,

    current_user: User,
    started: bool,
    cashier_opened: bool,
}

impl CatalogStore {
    /// Creates an empty, not-yet-started store. No I/O happens here;
    /// call [`start`](Self::start) to load state from disk.
    pub fn new(config: StoreConfig) -> Self {
        CatalogStore {
            config,
            categories: BTreeMap::new(),
            product_index: Vec::new(),
            supplies: Vec::new(),
            users: Vec::new(),
            ongoing_receipts: Vec::new(),
            registered_receipts: Vec::new(),
            current_user: User::default(),
            started: false,
            cashier_opened: false,
        }
    }

    /// First-run helper: creates the data directory and writes the four
    /// empty data files plus the given user accounts, so that a fresh
    /// install has something for [`start`](Self::start) to load.
    pub fn initialize_data_dir(config: &StoreConfig, users: &[User]) -> StoreResult<()> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| StoreError::io(&config.data_dir, e))?;
        codec::catalog::encode(&BTreeMap::new(), &config.catalog_path())?;
        codec::supplies::encode(&[], &config.supplies_path())?;
        codec::users::encode(users, &config.users_path())?;
        codec::receipts::encode_file(&[], &config.receipts_path())?;
        codec::receipts::encode_snapshot(&[], &config.receipts_snapshot_path())?;
        Ok(())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Session Lifecycle
    // =========================================================================

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_cashier_opened(&self) -> bool {
        self.cashier_opened
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    /// Starts a session as `user`.
    ///
    /// Loads the users file and looks for an entry matching by login
    /// equality (name + password hash). On a match the *stored* entry is
    /// adopted - it carries the real id and permission table - and the
    /// remaining collections are loaded. On a miss, returns `Ok(false)`
    /// with nothing loaded. File problems surface as `Err`.
    pub fn start(&mut self, user: &User) -> StoreResult<bool> {
        if self.started {
            debug!("start called on an already-started store");
            return Ok(false);
        }

        let users = codec::users::decode(&self.config.users_path())?;
        let Some(matched) = users.iter().find(|stored| *stored == user) else {
            info!(user = %user.name, "login rejected: no matching account");
            return Ok(false);
        };
        self.current_user = matched.clone();
        self.users = users;

        self.categories = codec::catalog::decode(&self.config.catalog_path())?;
        self.rebuild_product_index();
        self.supplies = codec::supplies::decode(&self.config.supplies_path())?;
        self.registered_receipts = codec::receipts::decode_file(&self.config.receipts_path())?;

        self.started = true;
        info!(
            user = %self.current_user.name,
            categories = self.categories.len(),
            supplies = self.supplies.len(),
            receipts = self.registered_receipts.len(),
            "store started"
        );
        Ok(true)
    }

    /// Persists everything, closes the cashier and clears all in-memory
    /// state. A no-op on an already-stopped store.
    pub fn shutdown(&mut self) -> StoreResult<()> {
        if !self.started {
            return Ok(());
        }

        codec::catalog::encode(&self.categories, &self.config.catalog_path())?;
        codec::supplies::encode(&self.supplies, &self.config.supplies_path())?;
        self.close_cashier()?;
        self.persist_receipts()?;

        self.categories.clear();
        self.product_index.clear();
        self.supplies.clear();
        self.users.clear();
        self.registered_receipts.clear();
        self.current_user = User::default();
        self.started = false;
        info!("store shut down");
        Ok(())
    }

    /// Opens a cashier session. Any stale ongoing receipts are dropped.
    pub fn open_cashier(&mut self) {
        self.ongoing_receipts.clear();
        self.cashier_opened = true;
        debug!("cashier opened");
    }

    /// Closes the cashier session: moves ongoing receipts into the
    /// registered list and persists the combined list, but only writes
    /// when there was something to move. Always unsets the flag.
    pub fn close_cashier(&mut self) -> StoreResult<()> {
        if !self.ongoing_receipts.is_empty() {
            let moved = self.ongoing_receipts.len();
            self.registered_receipts.append(&mut self.ongoing_receipts);
            self.persist_receipts()?;
            debug!(moved, "cashier closed, receipts registered");
        }
        self.cashier_opened = false;
        Ok(())
    }

    // =========================================================================
    // Categories & Products
    // =========================================================================

    /// Adds an empty category. `false` if the name is empty or taken.
    pub fn add_category(&mut self, name: &str) -> bool {
        if name.is_empty() || self.categories.contains_key(name) {
            return false;
        }
        self.categories.insert(name.to_string(), Vec::new());
        self.rebuild_product_index();
        self.persist_catalog();
        true
    }

    /// Removes a category and all of its products (cascading, no orphan
    /// check). `true` iff the key existed.
    pub fn remove_category(&mut self, name: &str) -> bool {
        if self.categories.remove(name).is_none() {
            return false;
        }
        self.rebuild_product_index();
        self.persist_catalog();
        true
    }

    /// Renames a category by moving its product list to the new key.
    /// An existing list under the new name is replaced, matching the
    /// original map semantics.
    pub fn edit_category(&mut self, old: &str, new: &str) -> bool {
        if old.is_empty() || new.is_empty() {
            return false;
        }
        let Some(products) = self.categories.remove(old) else {
            return false;
        };
        self.categories.insert(new.to_string(), products);
        self.rebuild_product_index();
        self.persist_catalog();
        true
    }

    /// Adds a product to a category. Soft-fails on empty category name,
    /// the empty product, an unknown category, or a structural duplicate
    /// already in that category.
    pub fn add_product(&mut self, category: &str, product: &Product) -> bool {
        if category.is_empty() || product.is_empty() {
            return false;
        }
        let Some(products) = self.categories.get_mut(category) else {
            return false;
        };
        if products.contains(product) {
            // Silent no-op by design; the UI shows its own warning.
            return false;
        }
        products.push(product.clone());
        self.rebuild_product_index();
        self.persist_catalog();
        true
    }

    /// Removes the product equal to `product` from `category`.
    pub fn remove_product(&mut self, category: &str, product: &Product) -> bool {
        let Some(products) = self.categories.get_mut(category) else {
            return false;
        };
        let Some(position) = products.iter().position(|p| p == product) else {
            return false;
        };
        products.remove(position);
        self.rebuild_product_index();
        self.persist_catalog();
        true
    }

    /// Erase-then-insert edit. If the erase fails no insert is attempted,
    /// so a bad `old` reference leaves the catalog untouched.
    pub fn edit_product(
        &mut self,
        old_category: &str,
        old_product: &Product,
        new_category: &str,
        new_product: &Product,
    ) -> bool {
        if !self.remove_product(old_category, old_product) {
            return false;
        }
        self.add_product(new_category, new_product)
    }

    /// Finds the first product with the given name, scanning categories
    /// in lexicographic order. The one query that errors instead of
    /// returning a flag, because callers need the found value.
    pub fn find_product(&self, name: &str) -> StoreResult<ProductHandle> {
        for (category, products) in &self.categories {
            if let Some(position) = products.iter().position(|p| p.name == name) {
                return Ok(ProductHandle {
                    category: category.clone(),
                    position,
                });
            }
        }
        Err(StoreError::not_found("product", name))
    }

    /// Resolves a handle. `None` if the handle was invalidated by a
    /// mutation since it was issued.
    pub fn product(&self, handle: &ProductHandle) -> Option<&Product> {
        self.categories.get(&handle.category)?.get(handle.position)
    }

    /// Category names in their stable (lexicographic) order.
    pub fn get_registered_categories(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    /// Products of one category, if it exists.
    pub fn category_products(&self, category: &str) -> Option<&[Product]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn product_count(&self) -> usize {
        self.product_index.len()
    }

    // =========================================================================
    // Supplies
    // =========================================================================

    /// Adds a supply. Soft-fails on an empty name or when a supply with
    /// the same name and measure unit is already registered (the stock
    /// quantity is not part of that key).
    pub fn add_supply(&mut self, supply: &Supply) -> bool {
        if supply.name.is_empty() || self.collides_with_supply(supply, None) {
            return false;
        }
        self.supplies.push(supply.clone());
        self.persist_supplies();
        true
    }

    /// Removes the supply structurally equal to `supply`.
    pub fn remove_supply(&mut self, supply: &Supply) -> bool {
        let Some(position) = self.supplies.iter().position(|s| s == supply) else {
            return false;
        };
        self.supplies.remove(position);
        self.persist_supplies();
        true
    }

    /// Replaces `old` with `new`. A no-op returning `false` when the two
    /// are structurally equal, when `old` is absent, or when `new` would
    /// collide with a different entry.
    pub fn edit_supply(&mut self, old: &Supply, new: &Supply) -> bool {
        if old == new || new.name.is_empty() {
            return false;
        }
        let Some(position) = self.supplies.iter().position(|s| s == old) else {
            return false;
        };
        if self.collides_with_supply(new, Some(position)) {
            return false;
        }
        self.supplies[position] = new.clone();
        self.persist_supplies();
        true
    }

    pub fn supplies(&self) -> &[Supply] {
        &self.supplies
    }

    pub fn supply_count(&self) -> usize {
        self.supplies.len()
    }

    /// No two supplies may share `(name, measure_unit)`.
    fn collides_with_supply(&self, candidate: &Supply, skip: Option<usize>) -> bool {
        self.supplies.iter().enumerate().any(|(i, s)| {
            Some(i) != skip
                && s.name == candidate.name
                && s.measure_unit == candidate.measure_unit
        })
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Adds a user account. Dedup is by login equality: two accounts with
    /// the same name and password hash are indistinguishable.
    pub fn add_user(&mut self, user: &User) -> bool {
        if user.name.is_empty() || self.users.contains(user) {
            return false;
        }
        self.users.push(user.clone());
        self.persist_users();
        true
    }

    /// Removes the account matching `user` by login equality.
    pub fn remove_user(&mut self, user: &User) -> bool {
        let Some(position) = self.users.iter().position(|u| u == user) else {
            return false;
        };
        self.users.remove(position);
        self.persist_users();
        true
    }

    /// Replaces the account matching `old`. Fails when `old` is absent or
    /// `new` would collide with a different account.
    pub fn edit_user(&mut self, old: &User, new: &User) -> bool {
        if new.name.is_empty() {
            return false;
        }
        let Some(position) = self.users.iter().position(|u| u == old) else {
            return false;
        };
        let collides = self
            .users
            .iter()
            .enumerate()
            .any(|(i, u)| i != position && u == new);
        if collides {
            return false;
        }
        self.users[position] = new.clone();
        self.persist_users();
        true
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Access level of the current user for a UI page. `Denied` when no
    /// session is active or the page has no entry.
    pub fn get_page_access(&self, page: usize) -> AccessLevel {
        self.current_user.page_access(page)
    }

    // =========================================================================
    // Receipts & Sales
    // =========================================================================

    /// Records a sale: freezes the order into a receipt under the current
    /// user, appends it to the ongoing session and runs the inventory
    /// decrement engine.
    ///
    /// Best-effort by design: decrement misses are logged, never fatal,
    /// and there is no rollback path. The only soft failure is calling
    /// this without an open cashier, which would strand the receipt
    /// outside any session.
    pub fn generate_receipt(&mut self, order: &Order) -> bool {
        if !self.cashier_opened {
            warn!("generate_receipt called with the cashier closed");
            return false;
        }

        let id = (self.registered_receipts.len() + self.ongoing_receipts.len() + 1) as u64;
        let receipt = Receipt::from_order(
            self.config.business_name.clone(),
            id,
            self.current_user.name.clone(),
            Utc::now(),
            order,
        );

        inventory::apply_sale(&mut self.supplies, &order.items);
        self.ongoing_receipts.push(receipt);
        debug!(id, total = order.total(), "receipt recorded");
        true
    }

    pub fn ongoing_receipts(&self) -> &[Receipt] {
        &self.ongoing_receipts
    }

    pub fn registered_receipts(&self) -> &[Receipt] {
        &self.registered_receipts
    }

    pub fn receipt_count(&self) -> usize {
        self.registered_receipts.len()
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// One page of the flattened product index, in stable category order.
    pub fn get_products_for_page(&self, page_index: usize, page_size: usize) -> Vec<Product> {
        let window = page_window(self.product_index.len(), page_index, page_size);
        self.product_index[window]
            .iter()
            .map(|(_, product)| product.clone())
            .collect()
    }

    pub fn get_supplies_for_page(&self, page_index: usize, page_size: usize) -> Vec<Supply> {
        let window = page_window(self.supplies.len(), page_index, page_size);
        self.supplies[window].to_vec()
    }

    pub fn get_users_for_page(&self, page_index: usize, page_size: usize) -> Vec<User> {
        let window = page_window(self.users.len(), page_index, page_size);
        self.users[window].to_vec()
    }

    pub fn get_receipts_for_page(&self, page_index: usize, page_size: usize) -> Vec<Receipt> {
        let window = page_window(self.registered_receipts.len(), page_index, page_size);
        self.registered_receipts[window].to_vec()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Rebuilds the flattened index from scratch. Called after every
    /// category mutation; never patched incrementally.
    fn rebuild_product_index(&mut self) {
        self.product_index = self
            .categories
            .iter()
            .flat_map(|(category, products)| {
                products
                    .iter()
                    .map(move |product| (category.clone(), product.clone()))
            })
            .collect();
    }

    fn persist_catalog(&self) {
        if let Err(e) = codec::catalog::encode(&self.categories, &self.config.catalog_path()) {
            error!(error = %e, "failed to persist catalog");
        }
    }

    fn persist_supplies(&self) {
        if let Err(e) = codec::supplies::encode(&self.supplies, &self.config.supplies_path()) {
            error!(error = %e, "failed to persist supplies");
        }
    }

    fn persist_users(&self) {
        if let Err(e) = codec::users::encode(&self.users, &self.config.users_path()) {
            error!(error = %e, "failed to persist users");
        }
    }

    fn persist_receipts(&self) -> StoreResult<()> {
        codec::receipts::encode_file(&self.registered_receipts, &self.config.receipts_path())?;
        codec::receipts::encode_snapshot(
            &self.registered_receipts,
            &self.config.receipts_snapshot_path(),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mesero_core::{Ingredient, OrderItem, PageAccess, PaymentMethod};
    use tempfile::TempDir;

    fn seeded_user() -> User {
        let mut user = User::new(1, "ana");
        user.set_password("secreto");
        user.permissions = vec![
            PageAccess::new(0, AccessLevel::Editable),
            PageAccess::new(1, AccessLevel::NonEditable),
        ];
        user
    }

    /// A started store over a fresh temp data dir, logged in as "ana".
    fn started_store() -> (TempDir, CatalogStore) {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path(), "La Fonda");
        CatalogStore::initialize_data_dir(&config, &[seeded_user()]).unwrap();

        let mut store = CatalogStore::new(config);
        let mut login = User::new(0, "ana");
        login.set_password("secreto");
        assert!(store.start(&login).unwrap());
        (dir, store)
    }

    fn cola() -> Product {
        Product::new(1, "Cola", vec![Ingredient::new("Hielo", 3)], 500.0)
    }

    #[test]
    fn test_start_rejects_unknown_user() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path(), "La Fonda");
        CatalogStore::initialize_data_dir(&config, &[seeded_user()]).unwrap();

        let mut store = CatalogStore::new(config);
        let mut intruder = User::new(0, "ana");
        intruder.set_password("wrong");
        assert!(!store.start(&intruder).unwrap());
        assert!(!store.is_started());
        assert_eq!(store.get_registered_categories().len(), 0);
    }

    #[test]
    fn test_start_adopts_stored_identity() {
        let (_dir, store) = started_store();
        // The login carried id 0 and no permissions; the stored entry wins.
        assert_eq!(store.current_user().id, 1);
        assert_eq!(store.get_page_access(0), AccessLevel::Editable);
        assert_eq!(store.get_page_access(1), AccessLevel::NonEditable);
        assert_eq!(store.get_page_access(9), AccessLevel::Denied);
    }

    #[test]
    fn test_add_category_is_idempotent() {
        let (_dir, mut store) = started_store();
        assert!(store.add_category("Bebidas"));
        assert!(!store.add_category("Bebidas"));
        assert_eq!(store.get_registered_categories(), vec!["Bebidas"]);
    }

    #[test]
    fn test_add_category_rejects_empty_name() {
        let (_dir, mut store) = started_store();
        assert!(!store.add_category(""));
    }

    #[test]
    fn test_add_product_dedup() {
        let (_dir, mut store) = started_store();
        store.add_category("Bebidas");
        assert!(store.add_product("Bebidas", &cola()));
        assert!(!store.add_product("Bebidas", &cola()));
        assert_eq!(store.category_products("Bebidas").unwrap().len(), 1);
    }

    #[test]
    fn test_add_product_soft_failures() {
        let (_dir, mut store) = started_store();
        store.add_category("Bebidas");
        assert!(!store.add_product("", &cola()));
        assert!(!store.add_product("Bebidas", &Product::default()));
        assert!(!store.add_product("Postres", &cola()));
    }

    #[test]
    fn test_remove_category_cascades() {
        let (_dir, mut store) = started_store();
        store.add_category("Bebidas");
        store.add_product("Bebidas", &cola());
        assert_eq!(store.product_count(), 1);

        assert!(store.remove_category("Bebidas"));
        assert!(!store.remove_category("Bebidas"));
        assert_eq!(store.product_count(), 0);
    }

    #[test]
    fn test_edit_category_moves_products() {
        let (_dir, mut store) = started_store();
        store.add_category("Bebidas");
        store.add_product("Bebidas", &cola());

        assert!(store.edit_category("Bebidas", "Refrescos"));
        assert!(store.category_products("Bebidas").is_none());
        assert_eq!(store.category_products("Refrescos").unwrap().len(), 1);
        assert!(!store.edit_category("Bebidas", "Otra"));
        assert!(!store.edit_category("Refrescos", ""));
    }

    #[test]
    fn test_edit_product_is_erase_then_insert() {
        let (_dir, mut store) = started_store();
        store.add_category("Bebidas");
        store.add_product("Bebidas", &cola());

        let mut cheaper = cola();
        cheaper.price = 450.0;
        assert!(store.edit_product("Bebidas", &cola(), "Bebidas", &cheaper));
        assert_eq!(store.category_products("Bebidas").unwrap()[0].price, 450.0);

        // Erase failure attempts no insert.
        assert!(!store.edit_product("Bebidas", &cola(), "Bebidas", &cheaper));
        assert_eq!(store.category_products("Bebidas").unwrap().len(), 1);
    }

    #[test]
    fn test_product_index_tracks_categories() {
        let (_dir, mut store) = started_store();
        store.add_category("Bebidas");
        store.add_category("Antojitos");
        store.add_product("Bebidas", &cola());
        let tacos = Product::new(1, "Tacos", vec![], 900.0);
        store.add_product("Antojitos", &tacos);

        // Flattened in lexicographic category order.
        let page = store.get_products_for_page(0, 10);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "Tacos");
        assert_eq!(page[1].name, "Cola");
    }

    #[test]
    fn test_find_product_returns_handle() {
        let (_dir, mut store) = started_store();
        store.add_category("Bebidas");
        store.add_product("Bebidas", &cola());

        let handle = store.find_product("Cola").unwrap();
        assert_eq!(handle.category(), "Bebidas");
        assert_eq!(store.product(&handle).unwrap().price, 500.0);

        assert!(matches!(
            store.find_product("Horchata").unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[test]
    fn test_stale_handle_resolves_to_none() {
        let (_dir, mut store) = started_store();
        store.add_category("Bebidas");
        store.add_product("Bebidas", &cola());
        let handle = store.find_product("Cola").unwrap();

        store.remove_product("Bebidas", &cola());
        assert!(store.product(&handle).is_none());
    }

    #[test]
    fn test_supply_dedup_is_name_and_unit() {
        let (_dir, mut store) = started_store();
        assert!(store.add_supply(&Supply::new("Hielo", 10, "unidades")));
        // Same name+unit, different stock: still a collision.
        assert!(!store.add_supply(&Supply::new("Hielo", 99, "unidades")));
        // Same name, different unit: a distinct supply.
        assert!(store.add_supply(&Supply::new("Hielo", 5, "bolsas")));
    }

    #[test]
    fn test_edit_supply_noop_when_equal() {
        let (_dir, mut store) = started_store();
        let hielo = Supply::new("Hielo", 10, "unidades");
        store.add_supply(&hielo);
        assert!(!store.edit_supply(&hielo, &hielo));
        assert!(store.edit_supply(&hielo, &Supply::new("Hielo", 25, "unidades")));
        assert_eq!(store.supplies()[0].quantity, 25);
    }

    #[test]
    fn test_user_crud_uses_login_equality() {
        let (_dir, mut store) = started_store();
        let mut benito = User::new(2, "benito");
        benito.set_password("clave");
        assert!(store.add_user(&benito));

        // Same name+password with a different id is the same account.
        let mut clone = User::new(77, "benito");
        clone.set_password("clave");
        assert!(!store.add_user(&clone));

        assert!(store.remove_user(&clone));
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn test_edit_user_replaces_and_rejects_collisions() {
        let (_dir, mut store) = started_store();
        let mut benito = User::new(2, "benito");
        benito.set_password("clave");
        store.add_user(&benito);

        // Happy path: new credentials replace the old account in place.
        let mut renamed = User::new(2, "beto");
        renamed.set_password("otra");
        assert!(store.edit_user(&benito, &renamed));
        assert_eq!(store.user_count(), 2);
        assert!(store.users().contains(&renamed));
        assert!(!store.users().contains(&benito));

        // The account being edited no longer exists under its old login.
        assert!(!store.edit_user(&benito, &renamed));

        // Editing onto another account's credentials is a collision;
        // "ana" is the session account seeded by the fixture.
        let mut ana = User::new(9, "ana");
        ana.set_password("secreto");
        assert!(!store.edit_user(&renamed, &ana));
        assert!(store.users().contains(&renamed));

        // An empty replacement name is rejected outright.
        assert!(!store.edit_user(&renamed, &User::new(3, "")));
    }

    #[test]
    fn test_generate_receipt_requires_open_cashier() {
        let (_dir, mut store) = started_store();
        let order = Order {
            items: vec![OrderItem::new(cola(), 1)],
            payment_method: PaymentMethod::Cash,
            received: 500.0,
        };
        assert!(!store.generate_receipt(&order));
        store.open_cashier();
        assert!(store.generate_receipt(&order));
        assert_eq!(store.ongoing_receipts().len(), 1);
    }

    #[test]
    fn test_generate_receipt_decrements_stock_best_effort() {
        let (_dir, mut store) = started_store();
        store.add_supply(&Supply::new("Hielo", 10, "unidades"));
        store.open_cashier();

        let order = Order {
            items: vec![OrderItem::new(cola(), 2)],
            payment_method: PaymentMethod::Cash,
            received: 1000.0,
        };
        assert!(store.generate_receipt(&order));
        assert_eq!(store.supplies()[0].quantity, 4); // 10 - 3 - 3

        // A second sale with nothing left in stock still succeeds.
        let big_order = Order {
            items: vec![OrderItem::new(cola(), 50)],
            payment_method: PaymentMethod::Cash,
            received: 25000.0,
        };
        assert!(store.generate_receipt(&big_order));
        assert_eq!(store.supplies()[0].quantity, 0);
    }

    #[test]
    fn test_close_cashier_registers_receipts() {
        let (_dir, mut store) = started_store();
        store.open_cashier();
        let order = Order {
            items: vec![OrderItem::new(cola(), 1)],
            payment_method: PaymentMethod::Card,
            received: 500.0,
        };
        store.generate_receipt(&order);

        store.close_cashier().unwrap();
        assert!(!store.is_cashier_opened());
        assert!(store.ongoing_receipts().is_empty());
        assert_eq!(store.receipt_count(), 1);

        // Closing an empty cashier just unsets the flag.
        store.open_cashier();
        store.close_cashier().unwrap();
        assert!(!store.is_cashier_opened());
    }

    #[test]
    fn test_receipt_ids_are_sequential() {
        let (_dir, mut store) = started_store();
        store.open_cashier();
        let order = Order {
            items: vec![OrderItem::new(cola(), 1)],
            payment_method: PaymentMethod::Cash,
            received: 500.0,
        };
        store.generate_receipt(&order);
        store.generate_receipt(&order);
        store.close_cashier().unwrap();
        store.open_cashier();
        store.generate_receipt(&order);

        assert_eq!(store.registered_receipts()[0].id, 1);
        assert_eq!(store.registered_receipts()[1].id, 2);
        assert_eq!(store.ongoing_receipts()[0].id, 3);
    }

    #[test]
    fn test_pagination_boundaries() {
        let (_dir, mut store) = started_store();
        store.add_category("Todo");
        for i in 0..20 {
            let product = Product::new(1, format!("P{i:02}"), vec![], f64::from(i));
            assert!(store.add_product("Todo", &product));
        }

        assert_eq!(store.get_products_for_page(0, 9).len(), 9);
        let last = store.get_products_for_page(2, 9);
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].name, "P18");
        assert_eq!(last[1].name, "P19");
        assert!(store.get_products_for_page(3, 9).is_empty());
    }

    #[test]
    fn test_shutdown_clears_and_is_reentrant() {
        let (_dir, mut store) = started_store();
        store.add_category("Bebidas");
        store.add_product("Bebidas", &cola());

        store.shutdown().unwrap();
        assert!(!store.is_started());
        assert_eq!(store.product_count(), 0);
        assert_eq!(store.current_user().name, "");

        // Re-entrant shutdown is a no-op.
        store.shutdown().unwrap();
    }
}
