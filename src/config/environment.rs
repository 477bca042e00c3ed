//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y la selección de la
//! estrategia de persistencia al arranque.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Estrategia de persistencia
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Archivos JSON locales con datos demo sembrados
    Local,
    /// Postgres remoto con scoping por identidad
    Remote,
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            other => Err(format!("unknown storage mode '{}'", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub storage_mode: StorageMode,
    pub data_dir: PathBuf,
    pub database_url: Option<String>,
    pub seed_demo_data: bool,
}

impl EnvironmentConfig {
    /// Lee la configuración del entorno; la variante local es el default.
    pub fn from_env() -> Self {
        let storage_mode = env::var("FLEET_STORAGE_MODE")
            .unwrap_or_else(|_| "local".to_string())
            .parse()
            .expect("FLEET_STORAGE_MODE must be 'local' or 'remote'");

        Self {
            storage_mode,
            data_dir: env::var("FLEET_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./fleet-data")),
            database_url: env::var("DATABASE_URL").ok(),
            seed_demo_data: env::var("FLEET_SEED_DEMO_DATA")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    /// Configuración local apuntando a un directorio concreto
    pub fn local(data_dir: impl Into<PathBuf>, seed_demo_data: bool) -> Self {
        Self {
            storage_mode: StorageMode::Local,
            data_dir: data_dir.into(),
            database_url: None,
            seed_demo_data,
        }
    }

    /// Verificar si usamos la variante remota
    pub fn is_remote(&self) -> bool {
        self.storage_mode == StorageMode::Remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_mode_parse() {
        assert_eq!("local".parse::<StorageMode>().unwrap(), StorageMode::Local);
        assert_eq!("REMOTE".parse::<StorageMode>().unwrap(), StorageMode::Remote);
        assert!("supabase".parse::<StorageMode>().is_err());
    }

    #[test]
    fn test_local_config() {
        let config = EnvironmentConfig::local("/tmp/fleet", true);
        assert_eq!(config.storage_mode, StorageMode::Local);
        assert!(config.seed_demo_data);
        assert!(!config.is_remote());
    }
}
