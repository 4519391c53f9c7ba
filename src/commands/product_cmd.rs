use crate::catalog;
use crate::errors::AppError;
use crate::models::activity::{AdjustmentReason, AdjustmentType};
use crate::models::product::{
    Category, NewProduct, Product, ProductQuery, ProductWithCategory,
};
use crate::AppState;

/// Product listing by role.
///
/// Admin: a search runs across the whole catalog, otherwise the selected
/// category (all when none); then the chosen active/inactive partition.
/// User: nothing until a category is selected, then only active products.
pub fn get_products(
    state: &AppState,
    session_token: &str,
    query: &ProductQuery,
) -> Result<Vec<ProductWithCategory>, AppError> {
    let session = crate::auth::guard::validate_session(state, session_token)?;
    let store = state.catalog.lock()?;

    let search = query.search.as_deref().unwrap_or("");
    let category = query.category.as_deref().unwrap_or("");

    let matching = if session.role.is_admin() {
        let matching = if !search.trim().is_empty() {
            catalog::filter_global(&store.products, search)
        } else {
            let selected = if category.is_empty() {
                catalog::filters::ALL_CATEGORIES
            } else {
                category
            };
            catalog::filter_by_category(&store.products, selected, &store.categories)
        };
        let state_filter = query
            .state
            .as_deref()
            .unwrap_or(catalog::filters::ACTIVE_STATE);
        catalog::filter_by_active_state(&matching, state_filter)
    } else if category.is_empty() {
        Vec::new()
    } else {
        let matching = if !search.trim().is_empty() {
            catalog::filter_global(&store.products, search)
        } else {
            catalog::filter_by_category(&store.products, category, &store.categories)
        };
        catalog::filter_by_active_state(&matching, catalog::filters::ACTIVE_STATE)
    };

    Ok(with_category_names(matching, &store.categories))
}

fn with_category_names(products: Vec<Product>, categories: &[Category]) -> Vec<ProductWithCategory> {
    products
        .into_iter()
        .map(|product| {
            let category_name = catalog::resolve_category_name(&product, categories);
            ProductWithCategory {
                product,
                category_name,
            }
        })
        .collect()
}

fn resolve_category<'a>(categories: &'a [Category], name: &str) -> Result<&'a Category, AppError> {
    let name = name.trim();
    categories
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| AppError::Validation(format!("La categoría '{}' no existe", name)))
}

/// Crea un producto (solo admin).
pub fn create_product(
    state: &AppState,
    session_token: &str,
    mut payload: NewProduct,
) -> Result<Product, AppError> {
    let session = crate::auth::guard::validate_admin(state, session_token)?;
    crate::validation::validate_new_product(&payload).map_err(AppError::Validation)?;

    let mut store = state.catalog.lock()?;

    let category = resolve_category(&store.categories, &payload.category)?;
    payload.category = category.name.clone();
    payload.category_id = category.id.clone();

    if let Some(id) = payload.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        if store.products.iter().any(|p| p.id == id) {
            return Err(AppError::Validation(format!(
                "Ya existe un producto con id {}",
                id
            )));
        }
    }

    let products = catalog::add_product(&store.products, payload);
    let created = products
        .last()
        .cloned()
        .ok_or_else(|| AppError::Internal("el producto no se agregó".into()))?;
    store.products = products;
    drop(store);

    if created.stock > 0 {
        crate::commands::activity_cmd::log_stock_adjustment(
            state,
            &created.id,
            &session.user_id,
            AdjustmentType::In,
            created.stock,
            AdjustmentReason::Restock,
            created.stock,
        );
    }
    crate::commands::activity_cmd::log_activity(
        state,
        Some(&session.user_id),
        "CREATE_PRODUCT",
        &format!("Producto agregado: {} ({})", created.name, created.id),
    );

    Ok(created)
}

/// Actualiza un producto existente (solo admin).
pub fn update_product(
    state: &AppState,
    session_token: &str,
    mut edited: Product,
) -> Result<Product, AppError> {
    let session = crate::auth::guard::validate_admin(state, session_token)?;
    crate::validation::validate_edited_product(&edited).map_err(AppError::Validation)?;

    let mut store = state.catalog.lock()?;
    let Some(current) = store.products.iter().find(|p| p.id == edited.id) else {
        return Err(AppError::NotFound(format!("Producto {}", edited.id)));
    };

    let category = resolve_category(&store.categories, &edited.category)?;
    edited.category = category.name.clone();
    edited.category_id = category.id.clone();
    edited.sku = catalog::products::truncate_sku(&edited.sku);
    let stock_delta = edited.stock - current.stock;

    store.products = catalog::edit_product(&store.products, &edited);
    drop(store);

    if stock_delta != 0 {
        crate::commands::activity_cmd::log_stock_adjustment(
            state,
            &edited.id,
            &session.user_id,
            if stock_delta > 0 { AdjustmentType::In } else { AdjustmentType::Out },
            stock_delta.abs(),
            AdjustmentReason::Adjustment,
            edited.stock,
        );
    }
    crate::commands::activity_cmd::log_activity(
        state,
        Some(&session.user_id),
        "UPDATE_PRODUCT",
        &format!("Producto actualizado: {} ({})", edited.name, edited.id),
    );

    Ok(edited)
}

/// Elimina un producto del catálogo (solo admin).
pub fn delete_product(state: &AppState, session_token: &str, id: &str) -> Result<(), AppError> {
    let session = crate::auth::guard::validate_admin(state, session_token)?;

    let mut store = state.catalog.lock()?;
    if !store.products.iter().any(|p| p.id == id) {
        return Err(AppError::NotFound(format!("Producto {}", id)));
    }
    store.products = catalog::delete_product(&store.products, id);
    drop(store);

    crate::commands::activity_cmd::log_activity(
        state,
        Some(&session.user_id),
        "DELETE_PRODUCT",
        &format!("Producto eliminado: {}", id),
    );
    Ok(())
}

/// Flips the active flag (admin only) and returns the new value.
pub fn toggle_product_status(
    state: &AppState,
    session_token: &str,
    id: &str,
) -> Result<bool, AppError> {
    let session = crate::auth::guard::validate_admin(state, session_token)?;

    let mut store = state.catalog.lock()?;
    let products = catalog::toggle_product_status(&store.products, id);
    let is_active = products
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.is_active)
        .ok_or_else(|| AppError::NotFound(format!("Producto {}", id)))?;
    store.products = products;
    drop(store);

    crate::commands::activity_cmd::log_activity(
        state,
        Some(&session.user_id),
        "TOGGLE_PRODUCT",
        &format!(
            "Producto {} {}",
            id,
            if is_active { "activado" } else { "desactivado" }
        ),
    );
    Ok(is_active)
}

/// Ajusta el stock sumando o restando `delta` (solo admin).
pub fn adjust_stock(
    state: &AppState,
    session_token: &str,
    product_id: &str,
    delta: i64,
) -> Result<i64, AppError> {
    let session = crate::auth::guard::validate_admin(state, session_token)?;

    let mut store = state.catalog.lock()?;
    let change = catalog::adjust_stock(&store.products, product_id, delta)?;
    store.products = change.products;
    drop(store);

    crate::commands::activity_cmd::log_stock_adjustment(
        state,
        product_id,
        &session.user_id,
        if delta > 0 { AdjustmentType::In } else { AdjustmentType::Out },
        delta.abs(),
        AdjustmentReason::Adjustment,
        change.stock_after,
    );
    crate::commands::activity_cmd::log_activity(
        state,
        Some(&session.user_id),
        "ADJUST_STOCK",
        &format!(
            "Stock del producto {} ajustado en {} (queda {})",
            product_id, delta, change.stock_after
        ),
    );

    Ok(change.stock_after)
}

/// Productos con stock bajo el umbral configurado (solo admin).
pub fn get_low_stock_products(
    state: &AppState,
    session_token: &str,
) -> Result<Vec<ProductWithCategory>, AppError> {
    crate::auth::guard::validate_admin(state, session_token)?;
    let threshold = state.config.catalog.low_stock_threshold;

    let store = state.catalog.lock()?;
    let low: Vec<Product> = store
        .products
        .iter()
        .filter(|p| p.is_active && catalog::is_low_stock(p, threshold))
        .cloned()
        .collect();
    Ok(with_category_names(low, &store.categories))
}
