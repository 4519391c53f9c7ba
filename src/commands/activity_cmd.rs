use chrono::Utc;

use crate::errors::AppError;
use crate::models::activity::{
    ActivityLog, AdjustmentReason, AdjustmentType, StockAdjustment,
};
use crate::AppState;

/// Registro de actividad (solo admin), más reciente primero.
pub fn get_activity_logs(
    state: &AppState,
    session_token: &str,
    limit: usize,
) -> Result<Vec<ActivityLog>, AppError> {
    crate::auth::guard::validate_admin(state, session_token)?;
    let store = state.activity.lock()?;
    Ok(store.recent_logs(limit))
}

/// Historial de stock (solo admin), opcionalmente de un producto.
pub fn get_stock_history(
    state: &AppState,
    session_token: &str,
    product_id: Option<&str>,
    limit: usize,
) -> Result<Vec<StockAdjustment>, AppError> {
    crate::auth::guard::validate_admin(state, session_token)?;
    let store = state.activity.lock()?;
    Ok(store.recent_adjustments(product_id, limit))
}

/// Internal helper that records an activity. Recording never fails the
/// command that triggered it.
pub fn log_activity(state: &AppState, user_id: Option<&str>, action: &str, description: &str) {
    crate::log_info!(
        "ACTIVITY",
        description,
        serde_json::json!({ "action": action, "user_id": user_id })
    );

    if let Ok(mut store) = state.activity.lock() {
        store.push_log(ActivityLog {
            user_id: user_id.map(String::from),
            action: action.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        });
    }
}

/// Helper interno para registrar un movimiento de stock.
pub fn log_stock_adjustment(
    state: &AppState,
    product_id: &str,
    user_id: &str,
    adj_type: AdjustmentType,
    quantity: i64,
    reason: AdjustmentReason,
    stock_after: i64,
) {
    let adjustment = StockAdjustment {
        product_id: product_id.to_string(),
        user_id: user_id.to_string(),
        r#type: adj_type,
        quantity,
        reason,
        stock_after,
        created_at: Utc::now(),
    };

    if let Ok(data) = serde_json::to_value(&adjustment) {
        crate::log_debug!("STOCK", "Stock adjustment recorded", data);
    }

    if let Ok(mut store) = state.activity.lock() {
        store.push_adjustment(adjustment);
    }
}
