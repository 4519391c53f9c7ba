use thiserror::Error;

use crate::catalog::stock::StockError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Autenticación fallida: {0}")]
    Auth(String),

    #[error("Acceso denegado: {0}")]
    Forbidden(String),

    #[error("No encontrado: {0}")]
    NotFound(String),

    #[error("Validación fallida: {0}")]
    Validation(String),

    #[error("No hay suficiente stock para vender esa cantidad (disponible: {available}, solicitado: {requested})")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("Error: {0}")]
    Internal(String),
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::ProductNotFound(id) => {
                AppError::NotFound(format!("Producto {} no encontrado", id))
            }
            StockError::InvalidQuantity(qty) => {
                AppError::Validation(format!("Cantidad inválida: {}", qty))
            }
            StockError::Insufficient {
                available,
                requested,
            } => AppError::InsufficientStock {
                available,
                requested,
            },
            err @ (StockError::NegativeResult(_) | StockError::Overflow { .. }) => {
                AppError::Validation(err.to_string())
            }
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        let message = err.to_string();
        crate::log_error!("STATE", "State lock poisoned", message);
        AppError::Internal(message)
    }
}

impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
