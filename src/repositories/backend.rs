//! Seam de persistencia del almacén de flota
//!
//! Las dos implementaciones (archivos locales y Postgres remoto) son
//! intercambiables detrás de este trait; el resto del sistema es
//! agnóstico a la estrategia elegida al arranque.

use async_trait::async_trait;

use crate::models::driver::{Driver, UpdateDriverRequest};
use crate::models::maintenance::{MaintenanceRecord, UpdateMaintenanceRequest};
use crate::models::vehicle::{UpdateVehicleRequest, Vehicle};
use crate::utils::errors::AppResult;

/// Backend de persistencia para las tres colecciones.
///
/// Contrato de `update_*`: `Ok(Some)` devuelve la entidad ya actualizada,
/// `Ok(None)` indica que el id no existe y la operación se tolera como
/// no-op (variante local); la variante remota convierte ese caso en
/// `AppError::NotFound`. `delete_*` es idempotente en ambas variantes.
#[async_trait]
pub trait FleetBackend: Send + Sync {
    async fn load_vehicles(&self, user_id: &str) -> AppResult<Vec<Vehicle>>;
    async fn load_drivers(&self, user_id: &str) -> AppResult<Vec<Driver>>;
    async fn load_maintenance_records(&self, user_id: &str) -> AppResult<Vec<MaintenanceRecord>>;

    async fn insert_vehicle(&self, user_id: &str, vehicle: &Vehicle) -> AppResult<Vehicle>;
    async fn update_vehicle(
        &self,
        user_id: &str,
        id: &str,
        changes: &UpdateVehicleRequest,
    ) -> AppResult<Option<Vehicle>>;
    async fn delete_vehicle(&self, user_id: &str, id: &str) -> AppResult<()>;

    async fn insert_driver(&self, user_id: &str, driver: &Driver) -> AppResult<Driver>;
    async fn update_driver(
        &self,
        user_id: &str,
        id: &str,
        changes: &UpdateDriverRequest,
    ) -> AppResult<Option<Driver>>;
    async fn delete_driver(&self, user_id: &str, id: &str) -> AppResult<()>;

    async fn insert_maintenance_record(
        &self,
        user_id: &str,
        record: &MaintenanceRecord,
    ) -> AppResult<MaintenanceRecord>;
    async fn update_maintenance_record(
        &self,
        user_id: &str,
        id: &str,
        changes: &UpdateMaintenanceRequest,
    ) -> AppResult<Option<MaintenanceRecord>>;
    async fn delete_maintenance_record(&self, user_id: &str, id: &str) -> AppResult<()>;

    /// Cascada de borrado de vehículo: elimina sus registros de mantenimiento
    async fn delete_maintenance_for_vehicle(&self, user_id: &str, vehicle_id: &str) -> AppResult<()>;

    /// Cascada de borrado de vehículo: limpia `assigned_vehicle` en los
    /// conductores que lo referencian
    async fn clear_driver_assignment(&self, user_id: &str, vehicle_id: &str) -> AppResult<()>;

    /// Cascada de borrado de conductor: limpia el resumen embebido en los
    /// vehículos que lo nombran
    async fn clear_vehicle_driver(&self, user_id: &str, driver_id: &str) -> AppResult<()>;
}
