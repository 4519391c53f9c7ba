use crate::models::product::{Category, Product};

/// Category selection meaning "show everything".
pub const ALL_CATEGORIES: &str = "General";
/// State value selecting the active partition.
pub const ACTIVE_STATE: &str = "activos";

pub fn filter_by_category(
    products: &[Product],
    selected_category: &str,
    categories: &[Category],
) -> Vec<Product> {
    if selected_category.is_empty() || selected_category == ALL_CATEGORIES {
        return products.to_vec();
    }
    let Some(category) = categories.iter().find(|c| c.name == selected_category) else {
        return Vec::new();
    };
    products
        .iter()
        .filter(|p| p.category_id == category.id)
        .cloned()
        .collect()
}

/// Two partitions only: "activos" or everything inactive.
pub fn filter_by_active_state(products: &[Product], state: &str) -> Vec<Product> {
    let want_active = state == ACTIVE_STATE;
    products
        .iter()
        .filter(|p| p.is_active == want_active)
        .cloned()
        .collect()
}

/// Case-insensitive substring match on name, description or SKU.
pub fn filter_global(products: &[Product], query: &str) -> Vec<Product> {
    if query.trim().is_empty() {
        return products.to_vec();
    }
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || (!p.description.is_empty() && p.description.to_lowercase().contains(&needle))
                || (!p.sku.is_empty() && p.sku.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
