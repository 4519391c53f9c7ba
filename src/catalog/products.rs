use crate::catalog::ids::generate_unique_id;
use crate::models::product::{Category, NewProduct, Product};

pub const SKU_MAX_LEN: usize = 5;

/// Appends `new_product` at the end. A blank id gets a generated one that is
/// free in `products`; an explicit id is taken as given.
pub fn add_product(products: &[Product], new_product: NewProduct) -> Vec<Product> {
    let id = match new_product.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => generate_unique_id(|candidate| products.iter().any(|p| p.id == candidate)),
    };

    let product = Product {
        id,
        sku: truncate_sku(new_product.sku.as_deref().unwrap_or("")),
        barcode: new_product.barcode.unwrap_or_default(),
        name: new_product.name,
        description: new_product.description,
        image: new_product.image,
        stock: new_product.stock,
        price: new_product.price,
        is_active: new_product.is_active,
        category: new_product.category,
        category_id: new_product.category_id,
    };

    let mut updated = products.to_vec();
    updated.push(product);
    updated
}

pub fn truncate_sku(sku: &str) -> String {
    sku.chars().take(SKU_MAX_LEN).collect()
}

/// Replaces the product with the same id, keeping its position.
pub fn edit_product(products: &[Product], edited: &Product) -> Vec<Product> {
    products
        .iter()
        .map(|p| if p.id == edited.id { edited.clone() } else { p.clone() })
        .collect()
}

pub fn delete_product(products: &[Product], id: &str) -> Vec<Product> {
    products.iter().filter(|p| p.id != id).cloned().collect()
}

pub fn toggle_product_status(products: &[Product], id: &str) -> Vec<Product> {
    products
        .iter()
        .map(|p| {
            let mut p = p.clone();
            if p.id == id {
                p.is_active = !p.is_active;
            }
            p
        })
        .collect()
}

/// Caja lookup: barcode matches exactly, SKU matches ignoring case.
pub fn find_by_code<'a>(products: &'a [Product], code: &str) -> Option<&'a Product> {
    find_matching(products.iter(), code)
}

/// Same as [`find_by_code`] but only over active products, so an inactive
/// product never hides an active one with the same code.
pub fn find_active_by_code<'a>(products: &'a [Product], code: &str) -> Option<&'a Product> {
    find_matching(products.iter().filter(|p| p.is_active), code)
}

fn find_matching<'a, I>(mut products: I, code: &str) -> Option<&'a Product>
where
    I: Iterator<Item = &'a Product>,
{
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    let lowered = code.to_lowercase();
    products.find(|p| p.barcode == code || p.sku.to_lowercase() == lowered)
}

/// Display name through `categoria_id`, falling back to the stored copy.
pub fn resolve_category_name(product: &Product, categories: &[Category]) -> String {
    categories
        .iter()
        .find(|c| !product.category_id.is_empty() && c.id == product.category_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| product.category.clone())
}

pub fn is_low_stock(product: &Product, threshold: i64) -> bool {
    product.stock <= threshold
}
