//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación y el
//! pegamento de sesión: el almacén de flota se construye al iniciar
//! sesión (la identidad pasa de ausente a presente) y se destruye al
//! cerrarla. Los consumidores reciben el estado por inyección, no por
//! lookup global.

use std::sync::Arc;

use tracing::info;

use crate::config::environment::{EnvironmentConfig, StorageMode};
use crate::database;
use crate::models::auth::{LoginRequest, SignupRequest, User};
use crate::repositories::backend::FleetBackend;
use crate::repositories::local_backend::LocalBackend;
use crate::repositories::remote_backend::RemoteBackend;
use crate::services::auth_service::AuthService;
use crate::services::fleet_service::FleetService;
use crate::utils::errors::AppResult;

pub struct AppState {
    pub config: EnvironmentConfig,
    backend: Arc<dyn FleetBackend>,
    auth: AuthService,
    fleet: Option<FleetService>,
}

impl AppState {
    /// Construye el estado, selecciona el backend según la configuración
    /// y reabre el almacén si había una sesión persistida.
    pub async fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let backend: Arc<dyn FleetBackend> = match config.storage_mode {
            StorageMode::Local => {
                Arc::new(LocalBackend::open(&config.data_dir, config.seed_demo_data)?)
            }
            StorageMode::Remote => {
                let pool = database::create_pool(config.database_url.as_deref()).await?;
                database::ensure_schema(&pool).await?;
                info!("✅ Postgres conectado y schema verificado");
                Arc::new(RemoteBackend::new(pool))
            }
        };

        let auth = AuthService::new(config.data_dir.clone());

        let mut state = Self {
            config,
            backend,
            auth,
            fleet: None,
        };

        if let Some(user) = state.auth.current_user().cloned() {
            state.open_store(&user).await?;
        }

        Ok(state)
    }

    async fn open_store(&mut self, user: &User) -> AppResult<()> {
        let mut fleet = FleetService::new(Arc::clone(&self.backend), user.id.clone());
        fleet.load_all().await?;
        self.fleet = Some(fleet);
        Ok(())
    }

    /// Login con credenciales; al confirmar, carga la flota del usuario
    pub async fn sign_in(&mut self, request: &LoginRequest) -> AppResult<User> {
        let user = self.auth.login(request)?;
        self.open_store(&user).await?;
        Ok(user)
    }

    /// Registro de usuario nuevo; abre sesión y carga su flota (vacía)
    pub async fn sign_up(&mut self, request: &SignupRequest) -> AppResult<User> {
        let user = self.auth.signup(request)?;
        self.open_store(&user).await?;
        Ok(user)
    }

    /// Sesión demo sin credenciales
    pub async fn sign_in_demo(&mut self) -> AppResult<User> {
        let user = self.auth.login_demo()?;
        self.open_store(&user).await?;
        Ok(user)
    }

    /// Cierra la sesión: las colecciones se vacían y el almacén se destruye
    pub fn sign_out(&mut self) {
        self.auth.logout();
        if let Some(fleet) = self.fleet.as_mut() {
            fleet.clear();
        }
        self.fleet = None;
    }

    pub fn current_user(&self) -> Option<&User> {
        self.auth.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Almacén de la sesión activa; `None` si no hay sesión
    pub fn fleet(&self) -> Option<&FleetService> {
        self.fleet.as_ref()
    }

    pub fn fleet_mut(&mut self) -> Option<&mut FleetService> {
        self.fleet.as_mut()
    }
}
