use serde::{Deserialize, Serialize};

/// Rol del usuario en la simulación de login local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }
}

/// Resultado del login enviado al frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub user: AuthUserData,
    pub session_token: String,
    pub login_at: String,
}

/// Datos del usuario dentro de `LoginResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUserData {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}
