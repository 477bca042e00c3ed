//! DTO de persistencia para Vehicle
//!
//! La fila persistida usa snake_case (columnas Postgres y archivos JSON
//! locales comparten esta forma); el dominio usa camelCase. La traducción
//! bidireccional vive aquí y se testea de forma aislada.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::vehicle::{DriverRef, Location, Vehicle, VehicleStatus};

/// Fila persistida de vehículo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct VehicleRow {
    pub id: String,
    pub user_id: String,
    pub vehicle_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: String,
    pub location: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub driver_id: Option<String>,
    pub driver_name: Option<String>,
    pub fuel_level: i32,
    pub mileage: i64,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl VehicleRow {
    /// Traducción dominio → fila persistida
    pub fn from_vehicle(vehicle: &Vehicle, user_id: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: vehicle.id.clone(),
            user_id: user_id.to_string(),
            vehicle_number: vehicle.vehicle_number.clone(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            status: vehicle.status.to_string(),
            location: vehicle.location.as_ref().map(|l| l.address.clone()),
            location_lat: vehicle.location.as_ref().and_then(|l| l.lat),
            location_lng: vehicle.location.as_ref().and_then(|l| l.lng),
            driver_id: vehicle.driver.as_ref().map(|d| d.id.clone()),
            driver_name: vehicle.driver.as_ref().map(|d| d.name.clone()),
            fuel_level: vehicle.fuel_level,
            mileage: vehicle.mileage,
            last_maintenance: vehicle.last_maintenance,
            next_maintenance: vehicle.next_maintenance,
            created_at,
        }
    }
}

/// Traducción fila persistida → dominio
impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        let location = row.location.map(|address| Location {
            address,
            lat: row.location_lat,
            lng: row.location_lng,
        });

        let driver = row.driver_id.map(|id| DriverRef {
            id,
            name: row.driver_name.unwrap_or_default(),
        });

        Self {
            id: row.id,
            vehicle_number: row.vehicle_number,
            make: row.make,
            model: row.model,
            year: row.year,
            status: VehicleStatus::parse_lenient(&row.status),
            location,
            driver,
            fuel_level: row.fuel_level,
            mileage: row.mileage,
            last_maintenance: row.last_maintenance,
            next_maintenance: row.next_maintenance,
        }
    }
}
