//! Backend de persistencia local
//!
//! Las tres colecciones viven en memoria y se espejan a tres archivos JSON
//! (un slot por colección) después de cada mutación. Cuando no existe
//! estado previo se siembra la flota demo. A diferencia de la variante
//! remota, la persistencia local es global: el `user_id` queda registrado
//! en la fila pero las lecturas no filtran por él.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::dto::driver_dto::DriverRow;
use crate::dto::maintenance_dto::MaintenanceRecordRow;
use crate::dto::vehicle_dto::VehicleRow;
use crate::models::driver::{Driver, UpdateDriverRequest};
use crate::models::maintenance::{MaintenanceRecord, UpdateMaintenanceRequest};
use crate::models::vehicle::{UpdateVehicleRequest, Vehicle};
use crate::repositories::backend::FleetBackend;
use crate::repositories::seed;
use crate::utils::errors::{storage_error, AppResult};

const VEHICLES_SLOT: &str = "vehicles.json";
const DRIVERS_SLOT: &str = "drivers.json";
const MAINTENANCE_SLOT: &str = "maintenance_records.json";

/// Propietario registrado en las filas sembradas
const SEED_OWNER: &str = "1";

#[derive(Default)]
struct Slots {
    vehicles: Vec<VehicleRow>,
    drivers: Vec<DriverRow>,
    maintenance_records: Vec<MaintenanceRecordRow>,
}

pub struct LocalBackend {
    data_dir: PathBuf,
    slots: RwLock<Slots>,
}

impl LocalBackend {
    /// Abre el directorio de datos, cargando el estado previo o sembrando
    /// la flota demo si ningún slot existe todavía.
    pub fn open(data_dir: &Path, seed_demo: bool) -> AppResult<Self> {
        fs::create_dir_all(data_dir)
            .map_err(|e| storage_error("creating data directory", e))?;

        let vehicles: Option<Vec<VehicleRow>> = read_slot(&data_dir.join(VEHICLES_SLOT))?;
        let drivers: Option<Vec<DriverRow>> = read_slot(&data_dir.join(DRIVERS_SLOT))?;
        let records: Option<Vec<MaintenanceRecordRow>> =
            read_slot(&data_dir.join(MAINTENANCE_SLOT))?;

        let no_prior_state = vehicles.is_none() && drivers.is_none() && records.is_none();

        let slots = if no_prior_state && seed_demo {
            info!("🌱 Sin estado previo en {:?}, sembrando flota demo", data_dir);
            let now = Utc::now();
            let seeded = Slots {
                vehicles: seed::demo_vehicles()
                    .iter()
                    .map(|v| VehicleRow::from_vehicle(v, SEED_OWNER, now))
                    .collect(),
                drivers: seed::demo_drivers()
                    .iter()
                    .map(|d| DriverRow::from_driver(d, SEED_OWNER, now))
                    .collect(),
                maintenance_records: seed::demo_maintenance_records()
                    .iter()
                    .map(|r| MaintenanceRecordRow::from_record(r, SEED_OWNER, now))
                    .collect(),
            };
            write_slot(&data_dir.join(VEHICLES_SLOT), &seeded.vehicles)?;
            write_slot(&data_dir.join(DRIVERS_SLOT), &seeded.drivers)?;
            write_slot(&data_dir.join(MAINTENANCE_SLOT), &seeded.maintenance_records)?;
            seeded
        } else {
            Slots {
                vehicles: vehicles.unwrap_or_default(),
                drivers: drivers.unwrap_or_default(),
                maintenance_records: records.unwrap_or_default(),
            }
        };

        info!(
            "📂 Backend local abierto: {} vehículos, {} conductores, {} mantenimientos",
            slots.vehicles.len(),
            slots.drivers.len(),
            slots.maintenance_records.len()
        );

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            slots: RwLock::new(slots),
        })
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.data_dir.join(slot)
    }
}

/// Lee un slot serializado; `None` si el archivo no existe todavía
fn read_slot<T: DeserializeOwned>(path: &Path) -> AppResult<Option<Vec<T>>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|e| storage_error("reading slot", e))?;
    let rows = serde_json::from_str(&contents)?;
    Ok(Some(rows))
}

/// Sobrescribe un slot completo después de una mutación
fn write_slot<T: Serialize>(path: &Path, rows: &[T]) -> AppResult<()> {
    let contents = serde_json::to_string_pretty(rows)?;
    fs::write(path, contents).map_err(|e| storage_error("writing slot", e))
}

#[async_trait]
impl FleetBackend for LocalBackend {
    async fn load_vehicles(&self, _user_id: &str) -> AppResult<Vec<Vehicle>> {
        let slots = self.slots.read().await;
        Ok(slots.vehicles.iter().cloned().map(Vehicle::from).collect())
    }

    async fn load_drivers(&self, _user_id: &str) -> AppResult<Vec<Driver>> {
        let slots = self.slots.read().await;
        Ok(slots.drivers.iter().cloned().map(Driver::from).collect())
    }

    async fn load_maintenance_records(&self, _user_id: &str) -> AppResult<Vec<MaintenanceRecord>> {
        let slots = self.slots.read().await;
        Ok(slots
            .maintenance_records
            .iter()
            .cloned()
            .map(MaintenanceRecord::from)
            .collect())
    }

    async fn insert_vehicle(&self, user_id: &str, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut slots = self.slots.write().await;
        let row = VehicleRow::from_vehicle(vehicle, user_id, Utc::now());
        slots.vehicles.push(row.clone());
        write_slot(&self.slot_path(VEHICLES_SLOT), &slots.vehicles)?;
        Ok(Vehicle::from(row))
    }

    async fn update_vehicle(
        &self,
        _user_id: &str,
        id: &str,
        changes: &UpdateVehicleRequest,
    ) -> AppResult<Option<Vehicle>> {
        let mut slots = self.slots.write().await;
        let Some(row) = slots.vehicles.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        let owner = row.user_id.clone();
        let created_at = row.created_at;
        let mut vehicle = Vehicle::from(row.clone());
        changes.apply_to(&mut vehicle);
        *row = VehicleRow::from_vehicle(&vehicle, &owner, created_at);

        write_slot(&self.slot_path(VEHICLES_SLOT), &slots.vehicles)?;
        Ok(Some(vehicle))
    }

    async fn delete_vehicle(&self, _user_id: &str, id: &str) -> AppResult<()> {
        let mut slots = self.slots.write().await;
        let before = slots.vehicles.len();
        slots.vehicles.retain(|r| r.id != id);
        if slots.vehicles.len() == before {
            // Idempotente: borrar un id inexistente no es un error
            return Ok(());
        }
        write_slot(&self.slot_path(VEHICLES_SLOT), &slots.vehicles)
    }

    async fn insert_driver(&self, user_id: &str, driver: &Driver) -> AppResult<Driver> {
        let mut slots = self.slots.write().await;
        let row = DriverRow::from_driver(driver, user_id, Utc::now());
        slots.drivers.push(row.clone());
        write_slot(&self.slot_path(DRIVERS_SLOT), &slots.drivers)?;
        Ok(Driver::from(row))
    }

    async fn update_driver(
        &self,
        _user_id: &str,
        id: &str,
        changes: &UpdateDriverRequest,
    ) -> AppResult<Option<Driver>> {
        let mut slots = self.slots.write().await;
        let Some(row) = slots.drivers.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        let owner = row.user_id.clone();
        let created_at = row.created_at;
        let mut driver = Driver::from(row.clone());
        changes.apply_to(&mut driver);
        *row = DriverRow::from_driver(&driver, &owner, created_at);

        write_slot(&self.slot_path(DRIVERS_SLOT), &slots.drivers)?;
        Ok(Some(driver))
    }

    async fn delete_driver(&self, _user_id: &str, id: &str) -> AppResult<()> {
        let mut slots = self.slots.write().await;
        let before = slots.drivers.len();
        slots.drivers.retain(|r| r.id != id);
        if slots.drivers.len() == before {
            return Ok(());
        }
        write_slot(&self.slot_path(DRIVERS_SLOT), &slots.drivers)
    }

    async fn insert_maintenance_record(
        &self,
        user_id: &str,
        record: &MaintenanceRecord,
    ) -> AppResult<MaintenanceRecord> {
        let mut slots = self.slots.write().await;
        let row = MaintenanceRecordRow::from_record(record, user_id, Utc::now());
        slots.maintenance_records.push(row.clone());
        write_slot(&self.slot_path(MAINTENANCE_SLOT), &slots.maintenance_records)?;
        Ok(MaintenanceRecord::from(row))
    }

    async fn update_maintenance_record(
        &self,
        _user_id: &str,
        id: &str,
        changes: &UpdateMaintenanceRequest,
    ) -> AppResult<Option<MaintenanceRecord>> {
        let mut slots = self.slots.write().await;
        let Some(row) = slots.maintenance_records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        let owner = row.user_id.clone();
        let created_at = row.created_at;
        let mut record = MaintenanceRecord::from(row.clone());
        changes.apply_to(&mut record);
        *row = MaintenanceRecordRow::from_record(&record, &owner, created_at);

        write_slot(&self.slot_path(MAINTENANCE_SLOT), &slots.maintenance_records)?;
        Ok(Some(record))
    }

    async fn delete_maintenance_record(&self, _user_id: &str, id: &str) -> AppResult<()> {
        let mut slots = self.slots.write().await;
        let before = slots.maintenance_records.len();
        slots.maintenance_records.retain(|r| r.id != id);
        if slots.maintenance_records.len() == before {
            return Ok(());
        }
        write_slot(&self.slot_path(MAINTENANCE_SLOT), &slots.maintenance_records)
    }

    async fn delete_maintenance_for_vehicle(
        &self,
        _user_id: &str,
        vehicle_id: &str,
    ) -> AppResult<()> {
        let mut slots = self.slots.write().await;
        let before = slots.maintenance_records.len();
        slots.maintenance_records.retain(|r| r.vehicle_id != vehicle_id);
        let removed = before - slots.maintenance_records.len();
        if removed > 0 {
            warn!("🔧 Cascada: {} registros de mantenimiento eliminados", removed);
            write_slot(&self.slot_path(MAINTENANCE_SLOT), &slots.maintenance_records)?;
        }
        Ok(())
    }

    async fn clear_driver_assignment(&self, _user_id: &str, vehicle_id: &str) -> AppResult<()> {
        let mut slots = self.slots.write().await;
        let mut touched = false;
        for row in slots.drivers.iter_mut() {
            if row.assigned_vehicle.as_deref() == Some(vehicle_id) {
                row.assigned_vehicle = None;
                touched = true;
            }
        }
        if touched {
            write_slot(&self.slot_path(DRIVERS_SLOT), &slots.drivers)?;
        }
        Ok(())
    }

    async fn clear_vehicle_driver(&self, _user_id: &str, driver_id: &str) -> AppResult<()> {
        let mut slots = self.slots.write().await;
        let mut touched = false;
        for row in slots.vehicles.iter_mut() {
            if row.driver_id.as_deref() == Some(driver_id) {
                row.driver_id = None;
                row.driver_name = None;
                touched = true;
            }
        }
        if touched {
            write_slot(&self.slot_path(VEHICLES_SLOT), &slots.vehicles)?;
        }
        Ok(())
    }
}
