//! Modelo de MaintenanceRecord
//!
//! Este módulo contiene el struct MaintenanceRecord y sus variantes para
//! CRUD operations. El campo `kind` se serializa como `type` para mantener
//! el contrato del snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Estado del registro de mantenimiento - enumeración canónica
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parsea un estado persistido; valores desconocidos caen a `pending`.
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            "in-progress" => Self::InProgress,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            other => {
                tracing::warn!(
                    "⚠️ Estado de mantenimiento desconocido '{}', usando 'pending'",
                    other
                );
                Self::Pending
            }
        }
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// MaintenanceRecord principal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub vehicle_id: String,
    /// Tipo de servicio: texto libre (los datos demo usan scheduled|repair|inspection)
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub date: NaiveDate,
    pub status: MaintenanceStatus,
    pub next_due: Option<NaiveDate>,
}

/// Request para crear un registro de mantenimiento
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    #[validate(length(min = 1))]
    pub vehicle_id: String,

    #[validate(length(min = 1, max = 50))]
    #[serde(rename = "type")]
    pub kind: String,

    pub description: Option<String>,

    pub cost: Option<Decimal>,

    pub date: NaiveDate,

    pub status: MaintenanceStatus,

    pub next_due: Option<NaiveDate>,
}

impl CreateMaintenanceRequest {
    /// Materializa el registro con el id asignado por el almacén.
    pub fn into_record(self, id: String) -> MaintenanceRecord {
        MaintenanceRecord {
            id,
            vehicle_id: self.vehicle_id,
            kind: self.kind,
            description: self.description,
            cost: self.cost,
            date: self.date,
            status: self.status,
            next_due: self.next_due,
        }
    }
}

/// Request para actualizar un registro de mantenimiento
///
/// Un campo en `None` significa "sin cambios". La referencia al vehículo
/// no se re-valida después de la creación.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceRequest {
    #[validate(length(min = 1))]
    pub vehicle_id: Option<String>,

    #[validate(length(min = 1, max = 50))]
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub description: Option<String>,

    pub cost: Option<Decimal>,

    pub date: Option<NaiveDate>,

    pub status: Option<MaintenanceStatus>,

    pub next_due: Option<NaiveDate>,
}

impl UpdateMaintenanceRequest {
    /// Aplica los campos presentes; los ausentes conservan su valor anterior.
    pub fn apply_to(&self, record: &mut MaintenanceRecord) {
        if let Some(value) = &self.vehicle_id {
            record.vehicle_id = value.clone();
        }
        if let Some(value) = &self.kind {
            record.kind = value.clone();
        }
        if let Some(value) = &self.description {
            record.description = Some(value.clone());
        }
        if let Some(value) = self.cost {
            record.cost = Some(value);
        }
        if let Some(value) = self.date {
            record.date = value;
        }
        if let Some(value) = self.status {
            record.status = value;
        }
        if let Some(value) = self.next_due {
            record.next_due = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_as_type() {
        let record = MaintenanceRecord {
            id: "1".to_string(),
            vehicle_id: "1".to_string(),
            kind: "scheduled".to_string(),
            description: Some("Oil Change & Filter Replacement".to_string()),
            cost: Some(Decimal::from_str_exact("85").unwrap()),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: MaintenanceStatus::Completed,
            next_due: NaiveDate::from_ymd_opt(2024, 4, 15),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "scheduled");
        assert_eq!(value["vehicleId"], "1");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_status_parse_lenient_maps_overdue_to_pending() {
        assert_eq!(MaintenanceStatus::parse_lenient("overdue"), MaintenanceStatus::Pending);
        assert_eq!(
            MaintenanceStatus::parse_lenient("in-progress"),
            MaintenanceStatus::InProgress
        );
    }

    #[test]
    fn test_free_status_transitions() {
        // No hay validación de orden: completed puede volver a pending
        let mut record = MaintenanceRecord {
            id: "1".to_string(),
            vehicle_id: "1".to_string(),
            kind: "repair".to_string(),
            description: None,
            cost: None,
            date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
            status: MaintenanceStatus::Completed,
            next_due: None,
        };

        let update = UpdateMaintenanceRequest {
            status: Some(MaintenanceStatus::Pending),
            ..Default::default()
        };
        update.apply_to(&mut record);

        assert_eq!(record.status, MaintenanceStatus::Pending);
    }
}
