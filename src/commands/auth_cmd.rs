use crate::errors::AppError;
use crate::models::user::{AuthUserData, LoginResult, Role};
use crate::AppState;

/// Local login simulation: any credentials open a session, but only the
/// configured admin email and password get the admin role.
pub fn login(state: &AppState, email: &str, password: &str) -> Result<LoginResult, AppError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::Auth("El email no puede estar vacío".into()));
    }

    let security = &state.config.security;
    let role = if email == security.admin_email && password == security.admin_password {
        Role::Admin
    } else {
        Role::User
    };
    let user_id = "1".to_string();

    let token = state
        .sessions
        .lock()?
        .create(user_id.clone(), email.to_string(), role);

    crate::log_audit!(
        "LOGIN",
        &serde_json::json!({ "email": email, "role": role.as_str(), "session_token": token })
    );
    crate::commands::activity_cmd::log_activity(
        state,
        Some(&user_id),
        "LOGIN",
        &format!("Usuario {} inició sesión como {}", email, role.as_str()),
    );

    Ok(LoginResult {
        user: AuthUserData {
            user_id,
            email: email.to_string(),
            role,
        },
        session_token: token,
        login_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Logout: elimina la sesión. Los tokens desconocidos se ignoran.
pub fn logout(state: &AppState, session_token: &str) -> Result<(), AppError> {
    let user_id = crate::auth::guard::validate_session(state, session_token)
        .ok()
        .map(|s| s.user_id);

    state.sessions.lock()?.destroy(session_token);

    if let Some(id) = user_id {
        crate::commands::activity_cmd::log_activity(
            state,
            Some(&id),
            "LOGOUT",
            "El usuario cerró sesión",
        );
    }

    Ok(())
}

/// Comprueba si la sesión sigue válida (auto-login al recargar).
pub fn check_session(state: &AppState, session_token: &str) -> Result<AuthUserData, AppError> {
    let session = crate::auth::guard::validate_session(state, session_token)?;
    Ok(AuthUserData {
        user_id: session.user_id,
        email: session.email,
        role: session.role,
    })
}
