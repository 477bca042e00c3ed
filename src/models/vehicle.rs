//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! El snapshot que consume la capa de presentación usa camelCase.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Estado del vehículo - enumeración canónica
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
    OutOfService,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InUse => "in-use",
            Self::Maintenance => "maintenance",
            Self::OutOfService => "out-of-service",
        }
    }

    /// Parsea un estado persistido; valores desconocidos caen a `available`.
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "available" => Self::Available,
            "in-use" => Self::InUse,
            "maintenance" => Self::Maintenance,
            "out-of-service" => Self::OutOfService,
            other => {
                tracing::warn!("⚠️ Estado de vehículo desconocido '{}', usando 'available'", other);
                Self::Available
            }
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ubicación del vehículo: dirección libre con coordenadas opcionales
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Resumen del conductor asignado, embebido en el vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverRef {
    pub id: String,
    pub name: String,
}

/// Vehicle principal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub vehicle_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
    pub location: Option<Location>,
    pub driver: Option<DriverRef>,
    pub fuel_level: i32,
    pub mileage: i64,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 20))]
    pub vehicle_number: String,

    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2030))]
    pub year: i32,

    pub status: VehicleStatus,

    pub location: Option<Location>,

    pub driver: Option<DriverRef>,

    #[validate(range(min = 0, max = 100))]
    pub fuel_level: i32,

    #[validate(range(min = 0))]
    pub mileage: i64,

    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
}

impl CreateVehicleRequest {
    /// Materializa el vehículo con el id asignado por el almacén.
    pub fn into_vehicle(self, id: String) -> Vehicle {
        Vehicle {
            id,
            vehicle_number: self.vehicle_number,
            make: self.make,
            model: self.model,
            year: self.year,
            status: self.status,
            location: self.location,
            driver: self.driver,
            fuel_level: self.fuel_level,
            mileage: self.mileage,
            last_maintenance: self.last_maintenance,
            next_maintenance: self.next_maintenance,
        }
    }
}

/// Request para actualizar un vehículo existente
///
/// Un campo en `None` significa "sin cambios"; limpiar la asignación de
/// conductor solo ocurre vía cascada de borrado.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 20))]
    pub vehicle_number: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2030))]
    pub year: Option<i32>,

    pub status: Option<VehicleStatus>,

    pub location: Option<Location>,

    pub driver: Option<DriverRef>,

    #[validate(range(min = 0, max = 100))]
    pub fuel_level: Option<i32>,

    #[validate(range(min = 0))]
    pub mileage: Option<i64>,

    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
}

impl UpdateVehicleRequest {
    /// Aplica los campos presentes; los ausentes conservan su valor anterior.
    pub fn apply_to(&self, vehicle: &mut Vehicle) {
        if let Some(value) = &self.vehicle_number {
            vehicle.vehicle_number = value.clone();
        }
        if let Some(value) = &self.make {
            vehicle.make = value.clone();
        }
        if let Some(value) = &self.model {
            vehicle.model = value.clone();
        }
        if let Some(value) = self.year {
            vehicle.year = value;
        }
        if let Some(value) = self.status {
            vehicle.status = value;
        }
        if let Some(value) = &self.location {
            vehicle.location = Some(value.clone());
        }
        if let Some(value) = &self.driver {
            vehicle.driver = Some(value.clone());
        }
        if let Some(value) = self.fuel_level {
            vehicle.fuel_level = value;
        }
        if let Some(value) = self.mileage {
            vehicle.mileage = value;
        }
        if let Some(value) = self.last_maintenance {
            vehicle.last_maintenance = Some(value);
        }
        if let Some(value) = self.next_maintenance {
            vehicle.next_maintenance = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vehicle() -> Vehicle {
        Vehicle {
            id: "1".to_string(),
            vehicle_number: "ABD 1110".to_string(),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2022,
            status: VehicleStatus::Available,
            location: Some(Location {
                address: "Harare CBD, Zimbabwe".to_string(),
                lat: Some(-17.8252),
                lng: Some(31.0335),
            }),
            driver: Some(DriverRef {
                id: "1".to_string(),
                name: "Gideon Zimano".to_string(),
            }),
            fuel_level: 85,
            mileage: 25000,
            last_maintenance: NaiveDate::from_ymd_opt(2024, 1, 15),
            next_maintenance: NaiveDate::from_ymd_opt(2024, 4, 15),
        }
    }

    #[test]
    fn test_status_serde_kebab_case() {
        let json = serde_json::to_string(&VehicleStatus::InUse).unwrap();
        assert_eq!(json, "\"in-use\"");

        let status: VehicleStatus = serde_json::from_str("\"out-of-service\"").unwrap();
        assert_eq!(status, VehicleStatus::OutOfService);
    }

    #[test]
    fn test_status_parse_lenient_defaults_unknown() {
        assert_eq!(VehicleStatus::parse_lenient("in-use"), VehicleStatus::InUse);
        assert_eq!(VehicleStatus::parse_lenient("online"), VehicleStatus::Available);
        assert_eq!(VehicleStatus::parse_lenient(""), VehicleStatus::Available);
    }

    #[test]
    fn test_snapshot_uses_camel_case() {
        let value = serde_json::to_value(sample_vehicle()).unwrap();
        assert!(value.get("vehicleNumber").is_some());
        assert!(value.get("fuelLevel").is_some());
        assert!(value.get("vehicle_number").is_none());
    }

    #[test]
    fn test_apply_update_changes_only_supplied_fields() {
        let mut vehicle = sample_vehicle();
        let before = vehicle.clone();

        let update = UpdateVehicleRequest {
            status: Some(VehicleStatus::Maintenance),
            fuel_level: Some(40),
            ..Default::default()
        };
        update.apply_to(&mut vehicle);

        assert_eq!(vehicle.status, VehicleStatus::Maintenance);
        assert_eq!(vehicle.fuel_level, 40);
        assert_eq!(vehicle.vehicle_number, before.vehicle_number);
        assert_eq!(vehicle.driver, before.driver);
        assert_eq!(vehicle.location, before.location);
        assert_eq!(vehicle.mileage, before.mileage);
    }

    #[test]
    fn test_create_request_range_validation() {
        use validator::Validate;

        let request = CreateVehicleRequest {
            vehicle_number: "ABD 1110".to_string(),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2022,
            status: VehicleStatus::Available,
            location: None,
            driver: None,
            fuel_level: 150,
            mileage: 25000,
            last_maintenance: None,
            next_maintenance: None,
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("fuel_level"));
    }
}
