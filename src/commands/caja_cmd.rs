use crate::catalog;
use crate::errors::AppError;
use crate::models::activity::{AdjustmentReason, AdjustmentType};
use crate::models::product::{Product, SaleReceipt};
use crate::AppState;

/// Busca un producto activo por código de barras o SKU.
pub fn find_product_by_code(
    state: &AppState,
    session_token: &str,
    code: &str,
) -> Result<Product, AppError> {
    crate::auth::guard::validate_session(state, session_token)?;
    let store = state.catalog.lock()?;

    catalog::find_active_by_code(&store.products, code)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Producto no encontrado.".into()))
}

/// Records a sale (admin only).
///
/// A quantity above the current stock is rejected and the catalog is left
/// as it was.
pub fn sell_product(
    state: &AppState,
    session_token: &str,
    product_id: &str,
    quantity: i64,
) -> Result<SaleReceipt, AppError> {
    let session = crate::auth::guard::validate_admin(state, session_token)?;

    let mut store = state.catalog.lock()?;
    let Some(product) = store.products.iter().find(|p| p.id == product_id).cloned() else {
        return Err(AppError::NotFound("Producto no encontrado.".into()));
    };
    if !product.is_active {
        return Err(AppError::Validation(format!(
            "El producto {} está inactivo",
            product.name
        )));
    }

    let change = match catalog::apply_sale(&store.products, product_id, quantity) {
        Ok(change) => change,
        Err(e) => {
            crate::log_warn!("CAJA", &format!("Venta rechazada para {}: {}", product_id, e));
            return Err(e.into());
        }
    };
    store.products = change.products;
    drop(store);

    let remaining = change.stock_after;
    crate::commands::activity_cmd::log_stock_adjustment(
        state,
        product_id,
        &session.user_id,
        AdjustmentType::Out,
        quantity,
        AdjustmentReason::Sale,
        remaining,
    );
    crate::commands::activity_cmd::log_activity(
        state,
        Some(&session.user_id),
        "SALE",
        &format!("Venta de {} x {} ({})", quantity, product.name, product.id),
    );

    let threshold = state.config.catalog.low_stock_threshold;
    Ok(SaleReceipt {
        product_id: product.id,
        product_name: product.name,
        quantity,
        unit_price: product.price,
        total: product.price * quantity as f64,
        remaining_stock: remaining,
        low_stock: remaining <= threshold,
        message: format!("Venta realizada. Nuevo stock: {}", remaining),
    })
}
