use crate::catalog::ids::generate_unique_id;
use crate::models::product::{Category, Product};

/// Appends a category with the trimmed name. Blank or already-present names
/// leave the collection untouched.
pub fn add_category(categories: &[Category], name: &str) -> Vec<Category> {
    let name = name.trim();
    if name.is_empty() || categories.iter().any(|c| c.name == name) {
        return categories.to_vec();
    }

    let id = generate_unique_id(|candidate| categories.iter().any(|c| c.id == candidate));
    let mut updated = categories.to_vec();
    updated.push(Category {
        id,
        name: name.to_string(),
    });
    updated
}

/// Renames `old_name` to the trimmed `new_name` and rewrites the `categoria`
/// copy on every product that carried the old name. `categoria_id` is left
/// alone since the id does not change.
///
/// A blank new name, or one already held by a different category, is a no-op
/// on both collections so names stay unique.
pub fn rename_category_cascade(
    products: &[Product],
    categories: &[Category],
    old_name: &str,
    new_name: &str,
) -> (Vec<Product>, Vec<Category>) {
    let new_name = new_name.trim();
    let collides = categories
        .iter()
        .any(|c| c.name == new_name && c.name != old_name);
    if new_name.is_empty() || collides {
        return (products.to_vec(), categories.to_vec());
    }

    let updated_products = products
        .iter()
        .map(|p| {
            let mut p = p.clone();
            if p.category == old_name {
                p.category = new_name.to_string();
            }
            p
        })
        .collect();

    let updated_categories = categories
        .iter()
        .map(|c| {
            let mut c = c.clone();
            if c.name == old_name {
                c.name = new_name.to_string();
            }
            c
        })
        .collect();

    (updated_products, updated_categories)
}

/// Removes the category by id and orphans its products: `categoria` is
/// cleared where it held the category name, `categoria_id` where it held the
/// id. Products are never deleted.
pub fn delete_category_cascade(
    products: &[Product],
    categories: &[Category],
    category_id: &str,
) -> (Vec<Product>, Vec<Category>) {
    let name = categories
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.name.as_str())
        .unwrap_or("");

    let updated_products = products
        .iter()
        .map(|p| {
            let mut p = p.clone();
            if p.category == name {
                p.category.clear();
            }
            if !category_id.is_empty() && p.category_id == category_id {
                p.category_id.clear();
            }
            p
        })
        .collect();

    let updated_categories = categories
        .iter()
        .filter(|c| c.id != category_id)
        .cloned()
        .collect();

    (updated_products, updated_categories)
}
