//! Pure catalog functions over product and category collections.
//!
//! Callers own the collections. Every function borrows its input and returns
//! a fresh collection that replaces the caller's copy; nothing here keeps
//! state between calls.

pub mod categories;
pub mod filters;
pub mod ids;
pub mod products;
pub mod stock;

pub use categories::{add_category, delete_category_cascade, rename_category_cascade};
pub use filters::{filter_by_active_state, filter_by_category, filter_global};
pub use ids::{generate_short_id, generate_unique_id};
pub use products::{
    add_product, delete_product, edit_product, find_active_by_code, find_by_code, is_low_stock,
    resolve_category_name, toggle_product_status,
};
pub use stock::{adjust_stock, apply_sale, StockChange, StockError};
