use super::session::SessionData;
use crate::errors::AppError;
use crate::AppState;

/// Helper: valida la sesión en AppState y devuelve una copia de SessionData.
pub fn validate_session(state: &AppState, token: &str) -> Result<SessionData, AppError> {
    let store = state.sessions.lock()?;
    store.validate(token).cloned()
}

/// Helper: valida la sesión y exige rol admin.
pub fn validate_admin(state: &AppState, token: &str) -> Result<SessionData, AppError> {
    let store = state.sessions.lock()?;
    store.validate_admin(token).cloned()
}
