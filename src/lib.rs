//! FleetGuard — almacén de datos de flota
//!
//! Almacén de dominio para un dashboard de gestión de flota: tres
//! colecciones (vehículos, conductores, mantenimientos) con operaciones
//! CRUD, consistencia entre entidades al borrar, y persistencia
//! intercambiable (archivos locales o Postgres) con scoping por
//! identidad. La capa de presentación queda fuera: consume snapshots y
//! envía requests.

pub mod config;
pub mod database;
pub mod dto;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;

pub use config::environment::{EnvironmentConfig, StorageMode};
pub use repositories::backend::FleetBackend;
pub use services::auth_service::AuthService;
pub use services::fleet_service::FleetService;
pub use state::AppState;
pub use utils::errors::{AppError, AppResult};
