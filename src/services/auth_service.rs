//! Servicio de autenticación
//!
//! Autenticación mock: un chequeo de credenciales contra usuarios en
//! memoria (con hash bcrypt), más registro y login demo. En producción
//! sería un proveedor de identidad real; aquí solo alimenta el scoping
//! del almacén. La sesión activa se persiste en `auth-user.json` y se
//! restaura al arranque.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::auth::{LoginRequest, SignupRequest, User, UserRole};
use crate::utils::errors::{conflict_error, storage_error, AppError, AppResult};

const SESSION_FILE: &str = "auth-user.json";

/// Email y password del admin demo
pub const DEMO_ADMIN_EMAIL: &str = "admin@fleetguard.co.zw";
const DEMO_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

pub struct AuthService {
    data_dir: PathBuf,
    current_user: Option<User>,
    // Base de usuarios en memoria (en producción sería una BD real)
    registered_users: HashMap<String, StoredUser>,
}

impl AuthService {
    pub fn new(data_dir: PathBuf) -> Self {
        let mut service = Self {
            data_dir,
            current_user: None,
            registered_users: HashMap::new(),
        };

        service.initialize_admin_users();
        service.restore_session();
        service
    }

    /// Inicializa el usuario admin de ejemplo
    fn initialize_admin_users(&mut self) {
        let admin = StoredUser {
            user: User {
                id: "1".to_string(),
                name: "Tendai Mukamuri".to_string(),
                email: DEMO_ADMIN_EMAIL.to_string(),
                role: UserRole::Admin,
            },
            password_hash: hash(DEMO_ADMIN_PASSWORD, DEFAULT_COST).unwrap(),
        };

        self.registered_users.insert(admin.user.email.clone(), admin);
    }

    /// Restaura la sesión persistida si existe
    fn restore_session(&mut self) {
        let path = self.data_dir.join(SESSION_FILE);
        if !path.exists() {
            return;
        }

        let restored = fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str::<User>(&s).ok());
        match restored {
            Some(user) => {
                info!("🔓 Sesión restaurada para {}", user.email);
                self.current_user = Some(user);
            }
            None => warn!("⚠️ Sesión persistida ilegible en {:?}, ignorada", path),
        }
    }

    fn persist_session(&self, user: &User) -> AppResult<()> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| storage_error("creating data directory", e))?;
        let contents = serde_json::to_string_pretty(user)?;
        fs::write(self.data_dir.join(SESSION_FILE), contents)
            .map_err(|e| storage_error("writing session", e))
    }

    /// Autentica con email y password
    pub fn login(&mut self, request: &LoginRequest) -> AppResult<User> {
        let Some(stored) = self.registered_users.get(&request.email) else {
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        };

        let matches = verify(&request.password, &stored.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !matches {
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        }

        let user = stored.user.clone();
        self.persist_session(&user)?;
        info!("✅ Login exitoso: {}", user.email);
        self.current_user = Some(user.clone());
        Ok(user)
    }

    /// Registra un usuario nuevo con rol manager y abre sesión
    pub fn signup(&mut self, request: &SignupRequest) -> AppResult<User> {
        if self.registered_users.contains_key(&request.email) {
            return Err(conflict_error("User", "email", &request.email));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: request.name.clone(),
            email: request.email.clone(),
            role: UserRole::Manager,
        };

        let stored = StoredUser {
            user: user.clone(),
            password_hash: hash(&request.password, DEFAULT_COST)
                .map_err(|e| AppError::Hash(e.to_string()))?,
        };
        self.registered_users.insert(user.email.clone(), stored);

        self.persist_session(&user)?;
        info!("✅ Usuario registrado: {}", user.email);
        self.current_user = Some(user.clone());
        Ok(user)
    }

    /// Abre una sesión demo sin credenciales
    pub fn login_demo(&mut self) -> AppResult<User> {
        let user = User {
            id: "demo".to_string(),
            name: "Demo User".to_string(),
            email: "demo@fleetguard.co.zw".to_string(),
            role: UserRole::Admin,
        };

        self.persist_session(&user)?;
        info!("✅ Sesión demo abierta");
        self.current_user = Some(user.clone());
        Ok(user)
    }

    /// Cierra la sesión y borra la persistida
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!("👋 Sesión cerrada: {}", user.email);
        }
        let path = self.data_dir.join(SESSION_FILE);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                warn!("⚠️ No se pudo borrar la sesión persistida: {}", e);
            }
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service() -> (TempDir, AuthService) {
        let dir = TempDir::new().unwrap();
        let service = AuthService::new(dir.path().to_path_buf());
        (dir, service)
    }

    #[test]
    fn test_admin_login_succeeds() {
        let (_dir, mut auth) = service();
        let user = auth
            .login(&LoginRequest {
                email: DEMO_ADMIN_EMAIL.to_string(),
                password: "admin123".to_string(),
            })
            .unwrap();

        assert_eq!(user.name, "Tendai Mukamuri");
        assert_eq!(user.role, UserRole::Admin);
        assert!(auth.is_authenticated());
    }

    #[test]
    fn test_wrong_password_is_unauthorized() {
        let (_dir, mut auth) = service();
        let result = auth.login(&LoginRequest {
            email: DEMO_ADMIN_EMAIL.to_string(),
            password: "wrong".to_string(),
        });

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_duplicate_signup_conflicts() {
        let (_dir, mut auth) = service();
        let result = auth.signup(&SignupRequest {
            name: "Otro Admin".to_string(),
            email: DEMO_ADMIN_EMAIL.to_string(),
            password: "secret1".to_string(),
        });

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_session_persists_across_restarts() {
        let dir = TempDir::new().unwrap();

        let mut auth = AuthService::new(dir.path().to_path_buf());
        auth.signup(&SignupRequest {
            name: "Hope Chuma".to_string(),
            email: "hope.chuma@company.co.zw".to_string(),
            password: "secret1".to_string(),
        })
        .unwrap();
        drop(auth);

        let restored = AuthService::new(dir.path().to_path_buf());
        assert_eq!(
            restored.current_user().map(|u| u.email.as_str()),
            Some("hope.chuma@company.co.zw")
        );
    }

    #[test]
    fn test_logout_clears_persisted_session() {
        let dir = TempDir::new().unwrap();

        let mut auth = AuthService::new(dir.path().to_path_buf());
        auth.login_demo().unwrap();
        auth.logout();
        drop(auth);

        let restored = AuthService::new(dir.path().to_path_buf());
        assert!(!restored.is_authenticated());
    }
}
