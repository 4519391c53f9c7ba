use crate::catalog;
use crate::errors::AppError;
use crate::models::product::{Category, CategoryWithCount};
use crate::AppState;

/// Categorías con el número de productos que apuntan a cada una.
pub fn get_categories(
    state: &AppState,
    session_token: &str,
) -> Result<Vec<CategoryWithCount>, AppError> {
    crate::auth::guard::validate_session(state, session_token)?;
    let store = state.catalog.lock()?;

    Ok(store
        .categories
        .iter()
        .map(|c| CategoryWithCount {
            id: c.id.clone(),
            name: c.name.clone(),
            product_count: store
                .products
                .iter()
                .filter(|p| p.category_id == c.id)
                .count(),
        })
        .collect())
}

fn ensure_name_free(categories: &[Category], name: &str) -> Result<(), AppError> {
    if categories.iter().any(|c| c.name == name) {
        return Err(AppError::Validation(format!(
            "Ya existe una categoría llamada '{}'",
            name
        )));
    }
    Ok(())
}

pub fn create_category(
    state: &AppState,
    session_token: &str,
    name: &str,
) -> Result<Category, AppError> {
    let session = crate::auth::guard::validate_admin(state, session_token)?;
    crate::validation::validate_category_name(name).map_err(AppError::Validation)?;
    let name = name.trim();

    let mut store = state.catalog.lock()?;
    ensure_name_free(&store.categories, name)?;

    let categories = catalog::add_category(&store.categories, name);
    let created = categories
        .last()
        .cloned()
        .ok_or_else(|| AppError::Internal("la categoría no se agregó".into()))?;
    store.categories = categories;
    drop(store);

    crate::commands::activity_cmd::log_activity(
        state,
        Some(&session.user_id),
        "CREATE_CATEGORY",
        &format!("Categoría agregada: {}", created.name),
    );
    Ok(created)
}

/// Renames a category and every product copy of its name.
pub fn rename_category(
    state: &AppState,
    session_token: &str,
    old_name: &str,
    new_name: &str,
) -> Result<Category, AppError> {
    let session = crate::auth::guard::validate_admin(state, session_token)?;
    crate::validation::validate_category_name(new_name).map_err(AppError::Validation)?;
    let new_name = new_name.trim();

    let mut store = state.catalog.lock()?;
    let Some(id) = store
        .categories
        .iter()
        .find(|c| c.name == old_name)
        .map(|c| c.id.clone())
    else {
        return Err(AppError::NotFound(format!("Categoría {}", old_name)));
    };
    if new_name != old_name {
        ensure_name_free(&store.categories, new_name)?;
    }

    let (products, categories) =
        catalog::rename_category_cascade(&store.products, &store.categories, old_name, new_name);
    store.products = products;
    store.categories = categories;
    drop(store);

    crate::commands::activity_cmd::log_activity(
        state,
        Some(&session.user_id),
        "RENAME_CATEGORY",
        &format!("Categoría renombrada: {} -> {}", old_name, new_name),
    );
    Ok(Category {
        id,
        name: new_name.to_string(),
    })
}

/// Removes the category; its products stay but lose their category.
pub fn delete_category(state: &AppState, session_token: &str, id: &str) -> Result<(), AppError> {
    let session = crate::auth::guard::validate_admin(state, session_token)?;

    let mut store = state.catalog.lock()?;
    let Some(name) = store
        .categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
    else {
        return Err(AppError::NotFound(format!("Categoría {}", id)));
    };

    let (products, categories) =
        catalog::delete_category_cascade(&store.products, &store.categories, id);
    store.products = products;
    store.categories = categories;
    drop(store);

    crate::commands::activity_cmd::log_activity(
        state,
        Some(&session.user_id),
        "DELETE_CATEGORY",
        &format!("Categoría eliminada: {} ({})", name, id),
    );
    Ok(())
}
