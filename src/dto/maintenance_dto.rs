//! DTO de persistencia para MaintenanceRecord
//!
//! La columna persistida se llama `type`; el campo Rust es `kind`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::maintenance::{MaintenanceRecord, MaintenanceStatus};

/// Fila persistida de registro de mantenimiento
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MaintenanceRecordRow {
    pub id: String,
    pub user_id: String,
    pub vehicle_id: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub date: NaiveDate,
    pub status: String,
    pub next_due: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceRecordRow {
    /// Traducción dominio → fila persistida
    pub fn from_record(record: &MaintenanceRecord, user_id: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: record.id.clone(),
            user_id: user_id.to_string(),
            vehicle_id: record.vehicle_id.clone(),
            kind: record.kind.clone(),
            description: record.description.clone(),
            cost: record.cost,
            date: record.date,
            status: record.status.to_string(),
            next_due: record.next_due,
            created_at,
        }
    }
}

/// Traducción fila persistida → dominio
impl From<MaintenanceRecordRow> for MaintenanceRecord {
    fn from(row: MaintenanceRecordRow) -> Self {
        Self {
            id: row.id,
            vehicle_id: row.vehicle_id,
            kind: row.kind,
            description: row.description,
            cost: row.cost,
            date: row.date,
            status: MaintenanceStatus::parse_lenient(&row.status),
            next_due: row.next_due,
        }
    }
}
