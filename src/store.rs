//! Global Application State Store
//!
//! Records fetched from the API, shared by every page. Uses Leptos
//! reactive_stores for field-level reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use bizops_core::domain::{
    remove_by_id, upsert_by_id, EmployeeLog, Entity, InventoryItem, Item, PurchaseOrder, Supplier,
};

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Current page of production items
    pub items: Vec<Item>,
    /// Server-reported total for the item search
    pub item_total: u64,
    /// Full records fetched for the item detail prefetch, by id
    pub item_details: Vec<Item>,
    pub suppliers: Vec<Supplier>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub stock: Vec<InventoryItem>,
    pub employee_logs: Vec<EmployeeLog>,
}

pub type AppStore = Store<AppState>;

pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_upsert_detail(store: &AppStore, item: Item) {
    store.item_details().update(|list| upsert_by_id(list, item));
}

pub fn store_detail(store: &AppStore, id: &str) -> Option<Item> {
    store.item_details().with(|details| details.iter().find(|i| i.id() == id).cloned())
}

pub fn store_remove_item(store: &AppStore, id: &str) {
    store.items().update(|list| {
        remove_by_id(list, id);
    });
    store.item_details().update(|list| {
        remove_by_id(list, id);
    });
}

pub fn store_upsert_supplier(store: &AppStore, supplier: Supplier) {
    store.suppliers().update(|list| upsert_by_id(list, supplier));
}

pub fn store_remove_supplier(store: &AppStore, id: &str) {
    store.suppliers().update(|list| {
        remove_by_id(list, id);
    });
}

pub fn store_upsert_stock(store: &AppStore, item: InventoryItem) {
    store.stock().update(|list| upsert_by_id(list, item));
}

pub fn store_remove_stock(store: &AppStore, id: &str) {
    store.stock().update(|list| {
        remove_by_id(list, id);
    });
}

/// Replace one log in place, used for optimistic review edits
pub fn store_update_log(store: &AppStore, log: EmployeeLog) {
    store.employee_logs().update(|list| upsert_by_id(list, log));
}

/// Current page, each item replaced by its full record once one is cached
pub fn store_items_with_details(store: &AppStore) -> Vec<Item> {
    let details = store.item_details().get();
    store
        .items()
        .get()
        .into_iter()
        .map(|item| details.iter().find(|d| d.id == item.id).cloned().unwrap_or(item))
        .collect()
}
