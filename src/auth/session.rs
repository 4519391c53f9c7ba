use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::AppError;
use crate::models::user::Role;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub login_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub struct SessionStore {
    sessions: HashMap<String, SessionData>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
        }
    }

    /// Crea una sesión nueva y devuelve su token (UUID v4).
    pub fn create(&mut self, user_id: String, email: String, role: Role) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        self.sessions.insert(
            token.clone(),
            SessionData {
                user_id,
                email,
                role,
                login_at: now,
                expires_at: now
                    .checked_add_signed(self.ttl)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            },
        );
        token
    }

    /// Valida el token: debe existir y no haber expirado.
    pub fn validate(&self, token: &str) -> Result<&SessionData, AppError> {
        match self.sessions.get(token) {
            None => Err(AppError::Auth(
                "Sesión no válida, inicia sesión de nuevo".into(),
            )),
            Some(s) if Utc::now() > s.expires_at => Err(AppError::Auth(
                "Sesión expirada, inicia sesión de nuevo".into(),
            )),
            Some(s) => Ok(s),
        }
    }

    /// Valida el token y exige rol admin.
    pub fn validate_admin(&self, token: &str) -> Result<&SessionData, AppError> {
        let s = self.validate(token)?;
        if !s.role.is_admin() {
            return Err(AppError::Forbidden(
                "solo un administrador puede hacer esto".into(),
            ));
        }
        Ok(s)
    }

    pub fn destroy(&mut self, token: &str) {
        self.sessions.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_validate() {
        let mut store = SessionStore::new(Duration::hours(8));
        let token = store.create("1".into(), "caja@test.com".into(), Role::User);
        let session = store.validate(&token).unwrap();
        assert_eq!(session.email, "caja@test.com");
        assert!(matches!(
            store.validate_admin(&token),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_expired_session() {
        let mut store = SessionStore::new(Duration::seconds(-1));
        let token = store.create("1".into(), "admin@test.com".into(), Role::Admin);
        assert!(matches!(store.validate(&token), Err(AppError::Auth(_))));
    }

    #[test]
    fn test_destroy() {
        let mut store = SessionStore::new(Duration::hours(8));
        let token = store.create("1".into(), "admin@test.com".into(), Role::Admin);
        assert!(store.validate_admin(&token).is_ok());
        store.destroy(&token);
        assert!(store.validate(&token).is_err());
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let mut store = SessionStore::new(Duration::weeks(1_000_000_000));
        let token = store.create("1".into(), "admin@test.com".into(), Role::Admin);
        let session = store.validate(&token).unwrap();
        assert_eq!(session.expires_at, DateTime::<Utc>::MAX_UTC);
    }
}
