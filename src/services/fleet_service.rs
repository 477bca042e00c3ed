//! Almacén de datos de flota
//!
//! Este servicio es el dueño exclusivo de las tres colecciones. Se
//! construye al iniciar sesión, carga todo desde el backend, y se destruye
//! al cerrar sesión. La capa de presentación lee los snapshots y envía
//! requests tipados; nunca muta las entidades directamente.
//!
//! Las colecciones conservan el orden de inserción; cada mutación viaja
//! primero al backend y el snapshot se actualiza solo si la persistencia
//! confirma.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::models::driver::{CreateDriverRequest, Driver, UpdateDriverRequest};
use crate::models::maintenance::{
    CreateMaintenanceRequest, MaintenanceRecord, UpdateMaintenanceRequest,
};
use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle};
use crate::repositories::backend::FleetBackend;
use crate::utils::errors::{not_found_error, AppResult};

pub struct FleetService {
    backend: Arc<dyn FleetBackend>,
    user_id: String,
    vehicles: Vec<Vehicle>,
    drivers: Vec<Driver>,
    maintenance_records: Vec<MaintenanceRecord>,
}

impl FleetService {
    pub fn new(backend: Arc<dyn FleetBackend>, user_id: impl Into<String>) -> Self {
        Self {
            backend,
            user_id: user_id.into(),
            vehicles: Vec::new(),
            drivers: Vec::new(),
            maintenance_records: Vec::new(),
        }
    }

    /// Carga las tres colecciones desde el backend (en paralelo) y
    /// reemplaza los snapshots. Se invoca cuando la identidad pasa de
    /// ausente a presente.
    pub async fn load_all(&mut self) -> AppResult<()> {
        let (vehicles, drivers, maintenance_records) = tokio::try_join!(
            self.backend.load_vehicles(&self.user_id),
            self.backend.load_drivers(&self.user_id),
            self.backend.load_maintenance_records(&self.user_id),
        )?;

        info!(
            "📦 Flota cargada: {} vehículos, {} conductores, {} mantenimientos",
            vehicles.len(),
            drivers.len(),
            maintenance_records.len()
        );

        self.vehicles = vehicles;
        self.drivers = drivers;
        self.maintenance_records = maintenance_records;
        Ok(())
    }

    /// Vacía los snapshots sin tocar el estado persistido. Se invoca
    /// cuando la identidad pasa de presente a ausente.
    pub fn clear(&mut self) {
        self.vehicles.clear();
        self.drivers.clear();
        self.maintenance_records.clear();
    }

    // ── Snapshots ──

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn maintenance_records(&self) -> &[MaintenanceRecord] {
        &self.maintenance_records
    }

    // ── Vehículos ──

    pub async fn add_vehicle(&mut self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        let vehicle = request.into_vehicle(Uuid::new_v4().to_string());
        let created = self.backend.insert_vehicle(&self.user_id, &vehicle).await?;
        info!("🚗 Vehículo creado: {} ({})", created.vehicle_number, created.id);
        self.vehicles.push(created.clone());
        Ok(created)
    }

    pub async fn update_vehicle(
        &mut self,
        id: &str,
        changes: UpdateVehicleRequest,
    ) -> AppResult<()> {
        match self.backend.update_vehicle(&self.user_id, id, &changes).await? {
            Some(updated) => {
                if let Some(vehicle) = self.vehicles.iter_mut().find(|v| v.id == id) {
                    *vehicle = updated;
                }
            }
            None => warn!("⚠️ Vehículo '{}' no encontrado, update ignorado", id),
        }
        Ok(())
    }

    /// Borra un vehículo con cascada: sus registros de mantenimiento se
    /// eliminan y los conductores que lo tenían asignado quedan libres.
    pub async fn delete_vehicle(&mut self, id: &str) -> AppResult<()> {
        self.backend.delete_maintenance_for_vehicle(&self.user_id, id).await?;
        self.backend.clear_driver_assignment(&self.user_id, id).await?;
        self.backend.delete_vehicle(&self.user_id, id).await?;

        self.maintenance_records.retain(|r| r.vehicle_id != id);
        for driver in self.drivers.iter_mut() {
            if driver.assigned_vehicle.as_deref() == Some(id) {
                driver.assigned_vehicle = None;
            }
        }
        self.vehicles.retain(|v| v.id != id);
        info!("🗑️ Vehículo '{}' eliminado (con cascada)", id);
        Ok(())
    }

    // ── Conductores ──

    pub async fn add_driver(&mut self, request: CreateDriverRequest) -> AppResult<Driver> {
        let driver = request.into_driver(Uuid::new_v4().to_string());
        let created = self.backend.insert_driver(&self.user_id, &driver).await?;
        info!("🧑‍✈️ Conductor creado: {} ({})", created.name, created.id);
        self.drivers.push(created.clone());
        Ok(created)
    }

    pub async fn update_driver(&mut self, id: &str, changes: UpdateDriverRequest) -> AppResult<()> {
        match self.backend.update_driver(&self.user_id, id, &changes).await? {
            Some(updated) => {
                if let Some(driver) = self.drivers.iter_mut().find(|d| d.id == id) {
                    *driver = updated;
                }
            }
            None => warn!("⚠️ Conductor '{}' no encontrado, update ignorado", id),
        }
        Ok(())
    }

    /// Borra un conductor con cascada: los vehículos que lo nombran
    /// pierden su resumen embebido.
    pub async fn delete_driver(&mut self, id: &str) -> AppResult<()> {
        self.backend.clear_vehicle_driver(&self.user_id, id).await?;
        self.backend.delete_driver(&self.user_id, id).await?;

        for vehicle in self.vehicles.iter_mut() {
            if vehicle.driver.as_ref().is_some_and(|d| d.id == id) {
                vehicle.driver = None;
            }
        }
        self.drivers.retain(|d| d.id != id);
        info!("🗑️ Conductor '{}' eliminado (con cascada)", id);
        Ok(())
    }

    // ── Mantenimiento ──

    /// El vehículo referenciado debe existir al momento de la creación;
    /// la referencia no se re-valida en updates posteriores.
    pub async fn add_maintenance_record(
        &mut self,
        request: CreateMaintenanceRequest,
    ) -> AppResult<MaintenanceRecord> {
        if !self.vehicles.iter().any(|v| v.id == request.vehicle_id) {
            return Err(not_found_error("Vehicle", &request.vehicle_id));
        }

        let record = request.into_record(Uuid::new_v4().to_string());
        let created = self
            .backend
            .insert_maintenance_record(&self.user_id, &record)
            .await?;
        info!("🔧 Mantenimiento creado: {} ({})", created.kind, created.id);
        self.maintenance_records.push(created.clone());
        Ok(created)
    }

    pub async fn update_maintenance_record(
        &mut self,
        id: &str,
        changes: UpdateMaintenanceRequest,
    ) -> AppResult<()> {
        match self
            .backend
            .update_maintenance_record(&self.user_id, id, &changes)
            .await?
        {
            Some(updated) => {
                if let Some(record) = self.maintenance_records.iter_mut().find(|r| r.id == id) {
                    *record = updated;
                }
            }
            None => warn!("⚠️ Mantenimiento '{}' no encontrado, update ignorado", id),
        }
        Ok(())
    }

    pub async fn delete_maintenance_record(&mut self, id: &str) -> AppResult<()> {
        self.backend.delete_maintenance_record(&self.user_id, id).await?;
        self.maintenance_records.retain(|r| r.id != id);
        Ok(())
    }
}
