//! Backend de persistencia remota (Postgres)
//!
//! Cada mutación viaja primero al servidor; el snapshot en memoria solo se
//! actualiza después de que la escritura remota confirme. No hay update
//! optimista. A diferencia de la variante local, un update sobre un id
//! inexistente se reporta como `NotFound`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::dto::driver_dto::DriverRow;
use crate::dto::maintenance_dto::MaintenanceRecordRow;
use crate::dto::vehicle_dto::VehicleRow;
use crate::models::driver::{Driver, UpdateDriverRequest};
use crate::models::maintenance::{MaintenanceRecord, UpdateMaintenanceRequest};
use crate::models::vehicle::{UpdateVehicleRequest, Vehicle};
use crate::repositories::backend::FleetBackend;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppResult};

pub struct RemoteBackend {
    vehicles: VehicleRepository,
    drivers: DriverRepository,
    maintenance: MaintenanceRepository,
}

impl RemoteBackend {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool),
        }
    }
}

#[async_trait]
impl FleetBackend for RemoteBackend {
    async fn load_vehicles(&self, user_id: &str) -> AppResult<Vec<Vehicle>> {
        let rows = self.vehicles.find_by_owner(user_id).await?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn load_drivers(&self, user_id: &str) -> AppResult<Vec<Driver>> {
        let rows = self.drivers.find_by_owner(user_id).await?;
        Ok(rows.into_iter().map(Driver::from).collect())
    }

    async fn load_maintenance_records(&self, user_id: &str) -> AppResult<Vec<MaintenanceRecord>> {
        let rows = self.maintenance.find_by_owner(user_id).await?;
        Ok(rows.into_iter().map(MaintenanceRecord::from).collect())
    }

    async fn insert_vehicle(&self, user_id: &str, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let row = VehicleRow::from_vehicle(vehicle, user_id, Utc::now());
        let created = self.vehicles.insert(&row).await?;
        Ok(Vehicle::from(created))
    }

    async fn update_vehicle(
        &self,
        user_id: &str,
        id: &str,
        changes: &UpdateVehicleRequest,
    ) -> AppResult<Option<Vehicle>> {
        let current = self
            .vehicles
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        let mut vehicle = Vehicle::from(current.clone());
        changes.apply_to(&mut vehicle);
        let row = VehicleRow::from_vehicle(&vehicle, user_id, current.created_at);

        let updated = self
            .vehicles
            .update(&row)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;
        Ok(Some(Vehicle::from(updated)))
    }

    async fn delete_vehicle(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.vehicles.delete(user_id, id).await
    }

    async fn insert_driver(&self, user_id: &str, driver: &Driver) -> AppResult<Driver> {
        let row = DriverRow::from_driver(driver, user_id, Utc::now());
        let created = self.drivers.insert(&row).await?;
        Ok(Driver::from(created))
    }

    async fn update_driver(
        &self,
        user_id: &str,
        id: &str,
        changes: &UpdateDriverRequest,
    ) -> AppResult<Option<Driver>> {
        let current = self
            .drivers
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))?;

        let mut driver = Driver::from(current.clone());
        changes.apply_to(&mut driver);
        let row = DriverRow::from_driver(&driver, user_id, current.created_at);

        let updated = self
            .drivers
            .update(&row)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))?;
        Ok(Some(Driver::from(updated)))
    }

    async fn delete_driver(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.drivers.delete(user_id, id).await
    }

    async fn insert_maintenance_record(
        &self,
        user_id: &str,
        record: &MaintenanceRecord,
    ) -> AppResult<MaintenanceRecord> {
        let row = MaintenanceRecordRow::from_record(record, user_id, Utc::now());
        let created = self.maintenance.insert(&row).await?;
        Ok(MaintenanceRecord::from(created))
    }

    async fn update_maintenance_record(
        &self,
        user_id: &str,
        id: &str,
        changes: &UpdateMaintenanceRequest,
    ) -> AppResult<Option<MaintenanceRecord>> {
        let current = self
            .maintenance
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| not_found_error("MaintenanceRecord", id))?;

        let mut record = MaintenanceRecord::from(current.clone());
        changes.apply_to(&mut record);
        let row = MaintenanceRecordRow::from_record(&record, user_id, current.created_at);

        let updated = self
            .maintenance
            .update(&row)
            .await?
            .ok_or_else(|| not_found_error("MaintenanceRecord", id))?;
        Ok(Some(MaintenanceRecord::from(updated)))
    }

    async fn delete_maintenance_record(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.maintenance.delete(user_id, id).await
    }

    async fn delete_maintenance_for_vehicle(&self, user_id: &str, vehicle_id: &str) -> AppResult<()> {
        self.maintenance.delete_for_vehicle(user_id, vehicle_id).await
    }

    async fn clear_driver_assignment(&self, user_id: &str, vehicle_id: &str) -> AppResult<()> {
        self.drivers.clear_assignment(user_id, vehicle_id).await
    }

    async fn clear_vehicle_driver(&self, user_id: &str, driver_id: &str) -> AppResult<()> {
        self.vehicles.clear_driver(user_id, driver_id).await
    }
}
