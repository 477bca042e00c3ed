//! Modelo de Driver
//!
//! Este módulo contiene el struct Driver y sus variantes para CRUD operations.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Estado del conductor - enumeración canónica
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DriverStatus {
    #[default]
    Available,
    Busy,
    OffDuty,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::OffDuty => "off-duty",
        }
    }

    /// Parsea un estado persistido; valores desconocidos caen a `available`.
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "available" => Self::Available,
            "busy" => Self::Busy,
            "off-duty" => Self::OffDuty,
            other => {
                tracing::warn!("⚠️ Estado de conductor desconocido '{}', usando 'available'", other);
                Self::Available
            }
        }
    }
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Driver principal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub license_number: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: DriverStatus,
    /// Id del vehículo asignado; autoritativo desde el lado que escribió último
    pub assigned_vehicle: Option<String>,
}

/// Request para crear un nuevo conductor
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 5, max = 20))]
    pub license_number: String,

    pub phone: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub status: DriverStatus,

    pub assigned_vehicle: Option<String>,
}

impl CreateDriverRequest {
    /// Materializa el conductor con el id asignado por el almacén.
    pub fn into_driver(self, id: String) -> Driver {
        Driver {
            id,
            name: self.name,
            license_number: self.license_number,
            phone: self.phone,
            email: self.email,
            status: self.status,
            assigned_vehicle: self.assigned_vehicle,
        }
    }
}

/// Request para actualizar un conductor existente
///
/// Un campo en `None` significa "sin cambios".
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub license_number: Option<String>,

    pub phone: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub status: Option<DriverStatus>,

    pub assigned_vehicle: Option<String>,
}

impl UpdateDriverRequest {
    /// Aplica los campos presentes; los ausentes conservan su valor anterior.
    pub fn apply_to(&self, driver: &mut Driver) {
        if let Some(value) = &self.name {
            driver.name = value.clone();
        }
        if let Some(value) = &self.license_number {
            driver.license_number = value.clone();
        }
        if let Some(value) = &self.phone {
            driver.phone = Some(value.clone());
        }
        if let Some(value) = &self.email {
            driver.email = Some(value.clone());
        }
        if let Some(value) = self.status {
            driver.status = value;
        }
        if let Some(value) = &self.assigned_vehicle {
            driver.assigned_vehicle = Some(value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_status_serde_kebab_case() {
        let json = serde_json::to_string(&DriverStatus::OffDuty).unwrap();
        assert_eq!(json, "\"off-duty\"");
    }

    #[test]
    fn test_status_parse_lenient_defaults_unknown() {
        assert_eq!(DriverStatus::parse_lenient("busy"), DriverStatus::Busy);
        assert_eq!(DriverStatus::parse_lenient("inactive"), DriverStatus::Available);
    }

    #[test]
    fn test_create_request_rejects_bad_email() {
        let request = CreateDriverRequest {
            name: "Gideon Zimano".to_string(),
            license_number: "ZW123456789".to_string(),
            phone: Some("+263-77-123-4567".to_string()),
            email: Some("not-an-email".to_string()),
            status: DriverStatus::Available,
            assigned_vehicle: None,
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_apply_update_keeps_assignment_when_absent() {
        let mut driver = Driver {
            id: "1".to_string(),
            name: "Gideon Zimano".to_string(),
            license_number: "ZW123456789".to_string(),
            phone: None,
            email: None,
            status: DriverStatus::Available,
            assigned_vehicle: Some("1".to_string()),
        };

        let update = UpdateDriverRequest {
            status: Some(DriverStatus::Busy),
            ..Default::default()
        };
        update.apply_to(&mut driver);

        assert_eq!(driver.status, DriverStatus::Busy);
        assert_eq!(driver.assigned_vehicle.as_deref(), Some("1"));
    }
}
