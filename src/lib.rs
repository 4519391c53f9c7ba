pub mod auth;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod errors;
pub mod logger;
pub mod models;
pub mod validation;

use auth::session::SessionStore;
use config::AppConfig;
use models::activity::ActivityStore;
use models::product::{Category, Product};
use models::profile::UserProfile;
use std::path::Path;
use std::sync::Mutex;

/// Canonical catalog collections. Only the command layer replaces them,
/// always with the output of a catalog function.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

/// Perfil en edición y bandera del modo edición.
#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub profile: UserProfile,
    pub editing: bool,
}

/// Estado global de la aplicación, compartido por todos los comandos.
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Mutex<CatalogState>,
    pub sessions: Mutex<SessionStore>,
    pub profile: Mutex<ProfileState>,
    pub activity: Mutex<ActivityStore>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_catalog(config, Vec::new(), Vec::new())
    }

    pub fn with_catalog(config: AppConfig, products: Vec<Product>, categories: Vec<Category>) -> Self {
        let mins = config
            .security
            .session_timeout_mins
            .clamp(1, crate::config::MAX_SESSION_TIMEOUT_MINS);
        let ttl = chrono::Duration::minutes(mins);
        let capacity = config.catalog.activity_log_capacity;
        Self {
            config,
            catalog: Mutex::new(CatalogState {
                products,
                categories,
            }),
            sessions: Mutex::new(SessionStore::new(ttl)),
            profile: Mutex::new(ProfileState::default()),
            activity: Mutex::new(ActivityStore::new(capacity)),
        }
    }
}

/// Loads and validates the global configuration, starts the logger and
/// returns a fresh state. Log files go to `<app_data_dir>/logs` when file
/// logging is on.
pub fn init(app_data_dir: Option<&Path>) -> Result<AppState, String> {
    let config = config::init_config();
    config.validate()?;

    let log_dir = app_data_dir.map(|dir| config.get_log_dir(dir));
    if let Err(e) = logger::init_global_logger(log_dir.as_deref(), &config.logging) {
        eprintln!("Warning: failed to initialize logger: {}", e);
    }

    log_info!(
        "APP",
        "Application starting",
        serde_json::json!({
            "version": config.version,
            "environment": config.environment.as_str(),
            "app_name": config.app_name,
        })
    );

    Ok(AppState::new(config.clone()))
}
