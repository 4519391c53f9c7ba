use caja_catalogo::commands::{activity_cmd, auth_cmd, category_cmd, product_cmd};
use caja_catalogo::config::AppConfig;
use caja_catalogo::errors::AppError;
use caja_catalogo::models::product::{Category, NewProduct, Product, ProductQuery};
use caja_catalogo::AppState;

fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.into(),
        name: name.into(),
    }
}

fn product(id: &str, name: &str, category: &Category, active: bool, stock: i64) -> Product {
    Product {
        id: id.into(),
        sku: format!("S{}", id),
        name: name.into(),
        description: format!("Descripción de {}", name),
        stock,
        price: 10.0,
        is_active: active,
        category: category.name.clone(),
        category_id: category.id.clone(),
        ..Default::default()
    }
}

fn seeded_state() -> AppState {
    let bebidas = category("c1", "Bebidas");
    let snacks = category("c2", "Snacks");
    let products = vec![
        product("1", "Red Cola", &bebidas, true, 20),
        product("2", "Blue Water", &bebidas, false, 3),
        product("3", "Red Chips", &snacks, true, 2),
    ];
    AppState::with_catalog(AppConfig::from_lookup(|_| None), products, vec![bebidas, snacks])
}

fn admin(state: &AppState) -> String {
    auth_cmd::login(state, "admin@test.com", "admin")
        .unwrap()
        .session_token
}

fn cashier(state: &AppState) -> String {
    auth_cmd::login(state, "cajero@test.com", "1234")
        .unwrap()
        .session_token
}

fn new_product(name: &str, category: &str) -> NewProduct {
    NewProduct {
        sku: Some("ABCDEFG".into()),
        name: name.into(),
        description: "Nuevo".into(),
        price: 5.5,
        stock: 4,
        is_active: true,
        category: category.into(),
        ..Default::default()
    }
}

fn ids(products: &[caja_catalogo::models::product::ProductWithCategory]) -> Vec<&str> {
    products.iter().map(|p| p.product.id.as_str()).collect()
}

#[test]
fn test_login_roles_and_logout() {
    let state = seeded_state();
    let result = auth_cmd::login(&state, "admin@test.com", "admin").unwrap();
    assert!(result.user.role.is_admin());

    let user = auth_cmd::login(&state, "admin@test.com", "wrong").unwrap();
    assert!(!user.user.role.is_admin());

    assert!(matches!(
        auth_cmd::login(&state, "   ", "admin"),
        Err(AppError::Auth(_))
    ));

    let token = result.session_token;
    assert_eq!(auth_cmd::check_session(&state, &token).unwrap().email, "admin@test.com");
    auth_cmd::logout(&state, &token).unwrap();
    assert!(matches!(
        auth_cmd::check_session(&state, &token),
        Err(AppError::Auth(_))
    ));
}

#[test]
fn test_oversized_session_timeout_still_logs_in() {
    let config = AppConfig::from_lookup(|key| {
        (key == "SESSION_TIMEOUT_MINS").then(|| "100000000000000".to_string())
    });
    assert!(config.validate().is_err());

    let state = AppState::new(config);
    let token = admin(&state);
    assert!(auth_cmd::check_session(&state, &token).is_ok());
}

#[test]
fn test_admin_listing_defaults_to_active_everywhere() {
    let state = seeded_state();
    let token = admin(&state);

    let listed = product_cmd::get_products(&state, &token, &ProductQuery::default()).unwrap();
    assert_eq!(ids(&listed), vec!["1", "3"]);
    assert_eq!(listed[1].category_name, "Snacks");

    let inactive = product_cmd::get_products(
        &state,
        &token,
        &ProductQuery {
            state: Some("inactivos".into()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(ids(&inactive), vec!["2"]);
}

#[test]
fn test_admin_search_ignores_selected_category() {
    let state = seeded_state();
    let token = admin(&state);

    let query = ProductQuery {
        search: Some("RED".into()),
        category: Some("Bebidas".into()),
        state: None,
    };
    let listed = product_cmd::get_products(&state, &token, &query).unwrap();
    assert_eq!(ids(&listed), vec!["1", "3"]);
}

#[test]
fn test_user_listing_needs_category_and_sees_active_only() {
    let state = seeded_state();
    let token = cashier(&state);

    let nothing = product_cmd::get_products(&state, &token, &ProductQuery::default()).unwrap();
    assert!(nothing.is_empty());

    let query = ProductQuery {
        category: Some("Bebidas".into()),
        state: Some("inactivos".into()),
        ..Default::default()
    };
    let listed = product_cmd::get_products(&state, &token, &query).unwrap();
    assert_eq!(ids(&listed), vec!["1"]);
}

#[test]
fn test_listing_requires_session() {
    let state = seeded_state();
    let err = product_cmd::get_products(&state, "no-such-token", &ProductQuery::default());
    assert!(matches!(err, Err(AppError::Auth(_))));
}

#[test]
fn test_create_product_resolves_category_and_truncates_sku() {
    let state = seeded_state();
    let token = admin(&state);

    let created = product_cmd::create_product(&state, &token, new_product("Galletas", "Snacks")).unwrap();
    assert_eq!(created.sku, "ABCDE");
    assert_eq!(created.category_id, "c2");
    assert_eq!(created.id.len(), 5);
    assert!(created.id.chars().all(|c| c.is_ascii_digit()));

    let history = activity_cmd::get_stock_history(&state, &token, Some(&created.id), 10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].stock_after, 4);
}

#[test]
fn test_create_product_is_admin_only() {
    let state = seeded_state();
    let token = cashier(&state);
    let err = product_cmd::create_product(&state, &token, new_product("Galletas", "Snacks"));
    assert!(matches!(err, Err(AppError::Forbidden(_))));
    assert_eq!(state.catalog.lock().unwrap().products.len(), 3);
}

#[test]
fn test_create_product_validation_messages() {
    let state = seeded_state();
    let token = admin(&state);

    let mut payload = new_product("Galletas", "");
    let err = product_cmd::create_product(&state, &token, payload.clone()).unwrap_err();
    assert_eq!(err, AppError::Validation("Selecciona una categoría".into()));

    payload.category = "Lácteos".into();
    let err = product_cmd::create_product(&state, &token, payload.clone()).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    payload.category = "Snacks".into();
    payload.price = 0.0;
    let err = product_cmd::create_product(&state, &token, payload.clone()).unwrap_err();
    assert_eq!(err, AppError::Validation("El precio debe ser mayor que 0".into()));

    payload.price = 1.0;
    payload.id = Some("1".into());
    let err = product_cmd::create_product(&state, &token, payload).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_update_and_toggle_unknown_product() {
    let state = seeded_state();
    let token = admin(&state);

    let ghost = product("999", "Fantasma", &category("c1", "Bebidas"), true, 1);
    assert!(matches!(
        product_cmd::update_product(&state, &token, ghost),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        product_cmd::toggle_product_status(&state, &token, "999"),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        product_cmd::delete_product(&state, &token, "999"),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_update_moves_product_between_categories() {
    let state = seeded_state();
    let token = admin(&state);

    let mut edited = state.catalog.lock().unwrap().products[0].clone();
    edited.category = "Snacks".into();
    edited.stock = 15;
    let saved = product_cmd::update_product(&state, &token, edited).unwrap();
    assert_eq!(saved.category_id, "c2");

    let history = activity_cmd::get_stock_history(&state, &token, Some("1"), 10).unwrap();
    assert_eq!(history[0].quantity, 5);
    assert_eq!(history[0].stock_after, 15);
}

#[test]
fn test_toggle_and_delete_product() {
    let state = seeded_state();
    let token = admin(&state);

    assert!(product_cmd::toggle_product_status(&state, &token, "2").unwrap());
    product_cmd::delete_product(&state, &token, "1").unwrap();

    let listed = product_cmd::get_products(&state, &token, &ProductQuery::default()).unwrap();
    assert_eq!(ids(&listed), vec!["2", "3"]);
}

#[test]
fn test_adjust_stock_rejects_negative_result() {
    let state = seeded_state();
    let token = admin(&state);

    assert_eq!(product_cmd::adjust_stock(&state, &token, "3", 8).unwrap(), 10);
    assert!(matches!(
        product_cmd::adjust_stock(&state, &token, "3", -11),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        product_cmd::adjust_stock(&state, &token, "404", 1),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_low_stock_uses_configured_threshold() {
    let state = seeded_state();
    let token = admin(&state);
    let low = product_cmd::get_low_stock_products(&state, &token).unwrap();
    // the inactive product "2" is also low but hidden
    assert_eq!(ids(&low), vec!["3"]);
}

#[test]
fn test_category_counts_and_create() {
    let state = seeded_state();
    let token = admin(&state);

    let counts = category_cmd::get_categories(&state, &token).unwrap();
    assert_eq!(counts[0].product_count, 2);
    assert_eq!(counts[1].product_count, 1);

    let created = category_cmd::create_category(&state, &token, "  Lácteos ").unwrap();
    assert_eq!(created.name, "Lácteos");

    assert!(matches!(
        category_cmd::create_category(&state, &token, "Snacks"),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        category_cmd::create_category(&state, &token, "   "),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn test_rename_category_cascades_to_products() {
    let state = seeded_state();
    let token = admin(&state);

    let renamed = category_cmd::rename_category(&state, &token, "Bebidas", "Refrescos").unwrap();
    assert_eq!(renamed.id, "c1");

    let store = state.catalog.lock().unwrap();
    assert!(store.categories.iter().any(|c| c.name == "Refrescos"));
    assert!(store.products.iter().all(|p| p.category != "Bebidas"));
    assert_eq!(store.products[0].category, "Refrescos");
}

#[test]
fn test_rename_category_to_taken_name_fails() {
    let state = seeded_state();
    let token = admin(&state);

    assert!(matches!(
        category_cmd::rename_category(&state, &token, "Bebidas", "Snacks"),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        category_cmd::rename_category(&state, &token, "Nada", "Algo"),
        Err(AppError::NotFound(_))
    ));
    assert_eq!(state.catalog.lock().unwrap().categories[0].name, "Bebidas");
}

#[test]
fn test_delete_category_orphans_products() {
    let state = seeded_state();
    let token = admin(&state);

    category_cmd::delete_category(&state, &token, "c1").unwrap();

    let store = state.catalog.lock().unwrap();
    assert_eq!(store.categories.len(), 1);
    assert_eq!(store.products.len(), 3);
    let orphans: Vec<&Product> = store.products.iter().filter(|p| p.category.is_empty()).collect();
    assert_eq!(orphans.len(), 2);
    assert!(orphans.iter().all(|p| p.category_id.is_empty()));
}

#[test]
fn test_category_mutations_are_admin_only() {
    let state = seeded_state();
    let token = cashier(&state);

    assert!(category_cmd::get_categories(&state, &token).is_ok());
    assert!(matches!(
        category_cmd::delete_category(&state, &token, "c1"),
        Err(AppError::Forbidden(_))
    ));
}

#[test]
fn test_activity_log_is_newest_first_and_admin_only() {
    let state = seeded_state();
    let token = admin(&state);
    category_cmd::create_category(&state, &token, "Lácteos").unwrap();

    let logs = activity_cmd::get_activity_logs(&state, &token, 10).unwrap();
    assert_eq!(logs[0].action, "CREATE_CATEGORY");
    assert_eq!(logs[1].action, "LOGIN");

    let user = cashier(&state);
    assert!(matches!(
        activity_cmd::get_activity_logs(&state, &user, 10),
        Err(AppError::Forbidden(_))
    ));
}

#[test]
fn test_poisoned_catalog_reports_internal_error() {
    let state = std::sync::Arc::new(seeded_state());
    let token = admin(&state);

    let holder = std::sync::Arc::clone(&state);
    let _ = std::thread::spawn(move || {
        let _guard = holder.catalog.lock().unwrap();
        panic!("catalog writer crashed");
    })
    .join();

    assert!(matches!(
        product_cmd::get_products(&state, &token, &ProductQuery::default()),
        Err(AppError::Internal(_))
    ));
}
