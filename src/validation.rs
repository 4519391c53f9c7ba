//! Input validation applied by the command layer before the catalog engine
//! runs. The engine itself only fills structural defaults.

use crate::models::product::{NewProduct, Product};
use crate::models::profile::UserProfile;

/// Validation result type
pub type ValidationResult = Result<(), String>;

/// Validate a person's name
/// - Length: 2-100 characters
/// - Allowed: letters, spaces, basic punctuation
pub fn validate_name(name: &str) -> ValidationResult {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("El nombre no puede estar vacío".into());
    }

    let len = trimmed.chars().count();
    if !(2..=100).contains(&len) {
        return Err("El nombre debe tener entre 2 y 100 caracteres".into());
    }

    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || ".-'".contains(c))
    {
        return Err("El nombre solo puede contener letras, espacios y .-'".into());
    }

    Ok(())
}

pub fn validate_email(email: &str) -> ValidationResult {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err("El email no puede estar vacío".into());
    }

    if trimmed.len() > 254 {
        return Err("Email demasiado largo (máx. 254 caracteres)".into());
    }

    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err("El email debe contener '@'".into());
    };

    if domain.contains('@') {
        return Err("Formato de email no válido".into());
    }

    if local.is_empty() || local.len() > 64 {
        return Err("La parte local del email no es válida".into());
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("El dominio del email no es válido".into());
    }

    Ok(())
}

/// Validate phone number: 7-15 digits, separators `+- ()` allowed
pub fn validate_phone(phone: &str) -> ValidationResult {
    let trimmed = phone.trim();

    if trimmed.is_empty() {
        return Err("El teléfono no puede estar vacío".into());
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || "+- ()".contains(c))
    {
        return Err("El teléfono solo puede contener dígitos y +- ()".into());
    }

    let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=15).contains(&digits) {
        return Err("El teléfono debe tener entre 7 y 15 dígitos".into());
    }

    Ok(())
}

/// Price must be a finite number above zero
pub fn validate_price(price: f64) -> ValidationResult {
    if price.is_nan() || price.is_infinite() {
        return Err("Precio no válido".into());
    }

    if price <= 0.0 {
        return Err("El precio debe ser mayor que 0".into());
    }

    Ok(())
}

pub fn validate_stock(stock: i64) -> ValidationResult {
    if stock < 0 {
        return Err("El stock no puede ser negativo".into());
    }

    Ok(())
}

pub fn validate_product_name(name: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return Err("El nombre del producto no puede estar vacío".into());
    }

    Ok(())
}

pub fn validate_description(description: &str) -> ValidationResult {
    if description.trim().is_empty() {
        return Err("La descripción no puede estar vacía".into());
    }

    Ok(())
}

/// SKU is mandatory on creation; it is truncated later, not rejected for length.
pub fn validate_sku(sku: Option<&str>) -> ValidationResult {
    match sku.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(()),
        _ => Err("El SKU no puede estar vacío".into()),
    }
}

/// Barcode is optional but must be alphanumeric when present
pub fn validate_barcode(barcode: &str) -> ValidationResult {
    if barcode.is_empty() {
        return Ok(());
    }

    if barcode.len() > 50 {
        return Err("Código de barras demasiado largo (máx. 50 caracteres)".into());
    }

    if !barcode.chars().all(|c| c.is_alphanumeric()) {
        return Err("El código de barras solo puede contener letras y números".into());
    }

    Ok(())
}

pub fn validate_category_selected(category: &str) -> ValidationResult {
    if category.trim().is_empty() {
        return Err("Selecciona una categoría".into());
    }

    Ok(())
}

pub fn validate_category_name(name: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return Err("El nombre de la categoría no puede estar vacío".into());
    }

    Ok(())
}

/// Combined validation for creating a product
pub fn validate_new_product(product: &NewProduct) -> ValidationResult {
    validate_sku(product.sku.as_deref())?;
    validate_product_name(&product.name)?;
    validate_description(&product.description)?;
    validate_price(product.price)?;
    validate_stock(product.stock)?;
    validate_category_selected(&product.category)?;

    if let Some(ref barcode) = product.barcode {
        validate_barcode(barcode)?;
    }

    Ok(())
}

/// Combined validation for editing a product
pub fn validate_edited_product(product: &Product) -> ValidationResult {
    validate_product_name(&product.name)?;
    validate_price(product.price)?;
    validate_stock(product.stock)?;
    validate_category_selected(&product.category)?;
    validate_barcode(&product.barcode)?;

    Ok(())
}

/// Validation on profile save; photo and free-text fields are unchecked.
pub fn validate_profile(profile: &UserProfile) -> ValidationResult {
    validate_name(&profile.name)?;
    validate_email(&profile.email)?;
    validate_phone(&profile.phone)?;

    if !profile.company_info.company_phone.trim().is_empty() {
        validate_phone(&profile.company_info.company_phone)?;
    }
    if !profile.company_info.company_contact.trim().is_empty() {
        validate_email(&profile.company_info.company_contact)
            .map_err(|e| format!("Contacto de la empresa: {}", e))?;
    }

    Ok(())
}
