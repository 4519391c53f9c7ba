use serde::{Deserialize, Serialize};

/// Catalog product. Field names on the wire keep the storefront names so any
/// external store can round-trip records untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub sku: String,
    #[serde(rename = "codigo_barras", default)]
    pub barcode: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub stock: i64,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "activo")]
    pub is_active: bool,
    /// Denormalized display copy of the category name.
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "categoria_id", default)]
    pub category_id: String,
}

/// Producto con el nombre de categoría resuelto por `categoria_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Category with the number of products pointing at it by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWithCount {
    pub id: String,
    pub name: String,
    pub product_count: usize,
}

/// Payload for a product not yet in the catalog. `id`, `sku` and the barcode
/// are filled with defaults when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProduct {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(rename = "codigo_barras", default)]
    pub barcode: Option<String>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    pub stock: i64,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "activo", default = "default_active")]
    pub is_active: bool,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "categoria_id", default)]
    pub category_id: String,
}

fn default_active() -> bool {
    true
}

/// Filter parameters of the product listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    /// Selected category name; `None`, empty or "General" means all.
    pub category: Option<String>,
    /// "activos" or anything else for the inactive partition.
    pub state: Option<String>,
}

/// Resumen de una venta realizada en Caja.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total: f64,
    pub remaining_stock: i64,
    pub low_stock: bool,
    pub message: String,
}
