//! DTO de persistencia para Driver

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::driver::{Driver, DriverStatus};

/// Fila persistida de conductor
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct DriverRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub license_number: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: String,
    pub assigned_vehicle: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DriverRow {
    /// Traducción dominio → fila persistida
    pub fn from_driver(driver: &Driver, user_id: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: driver.id.clone(),
            user_id: user_id.to_string(),
            name: driver.name.clone(),
            license_number: driver.license_number.clone(),
            phone: driver.phone.clone(),
            email: driver.email.clone(),
            status: driver.status.to_string(),
            assigned_vehicle: driver.assigned_vehicle.clone(),
            created_at,
        }
    }
}

/// Traducción fila persistida → dominio
impl From<DriverRow> for Driver {
    fn from(row: DriverRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            license_number: row.license_number,
            phone: row.phone,
            email: row.email,
            status: DriverStatus::parse_lenient(&row.status),
            assigned_vehicle: row.assigned_vehicle,
        }
    }
}
