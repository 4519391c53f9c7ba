use thiserror::Error;

use crate::models::product::Product;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    #[error("Producto {0} no encontrado")]
    ProductNotFound(String),

    #[error("La cantidad debe ser positiva, se recibió {0}")]
    InvalidQuantity(i64),

    #[error("Stock insuficiente: disponible {available}, solicitado {requested}")]
    Insufficient { available: i64, requested: i64 },

    #[error("El stock final no puede ser negativo ({0})")]
    NegativeResult(i64),

    #[error("El ajuste {delta} sobre un stock de {current} excede el máximo permitido")]
    Overflow { current: i64, delta: i64 },
}

/// Collection after a stock movement, plus the stock the product ended with.
#[derive(Debug, Clone, PartialEq)]
pub struct StockChange {
    pub products: Vec<Product>,
    pub stock_after: i64,
}

/// Sells `quantity` units. Over-stock sales are rejected, never clamped.
pub fn apply_sale(products: &[Product], id: &str, quantity: i64) -> Result<StockChange, StockError> {
    if quantity <= 0 {
        return Err(StockError::InvalidQuantity(quantity));
    }
    let current = current_stock(products, id)?;
    if quantity > current {
        return Err(StockError::Insufficient {
            available: current,
            requested: quantity,
        });
    }
    Ok(set_stock(products, id, current - quantity))
}

/// Manual correction by `delta` units in either direction.
pub fn adjust_stock(products: &[Product], id: &str, delta: i64) -> Result<StockChange, StockError> {
    if delta == 0 {
        return Err(StockError::InvalidQuantity(delta));
    }
    let current = current_stock(products, id)?;
    let new_stock = current
        .checked_add(delta)
        .ok_or(StockError::Overflow { current, delta })?;
    if new_stock < 0 {
        return Err(StockError::NegativeResult(new_stock));
    }
    Ok(set_stock(products, id, new_stock))
}

fn current_stock(products: &[Product], id: &str) -> Result<i64, StockError> {
    products
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.stock)
        .ok_or_else(|| StockError::ProductNotFound(id.to_string()))
}

fn set_stock(products: &[Product], id: &str, stock: i64) -> StockChange {
    let products = products
        .iter()
        .map(|p| {
            let mut p = p.clone();
            if p.id == id {
                p.stock = stock;
            }
            p
        })
        .collect();
    StockChange {
        products,
        stock_after: stock,
    }
}
