//! Tests de integración del almacén de flota sobre el backend local

use std::sync::Arc;

use fleetguard::models::driver::{CreateDriverRequest, DriverStatus, UpdateDriverRequest};
use fleetguard::models::maintenance::{
    CreateMaintenanceRequest, MaintenanceStatus, UpdateMaintenanceRequest,
};
use fleetguard::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, VehicleStatus};
use fleetguard::repositories::local_backend::LocalBackend;
use fleetguard::{AppError, FleetService};
use tempfile::TempDir;
use validator::Validate;

async fn seeded_store() -> (TempDir, FleetService) {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(LocalBackend::open(dir.path(), true).unwrap());
    let mut fleet = FleetService::new(backend, "1");
    fleet.load_all().await.unwrap();
    (dir, fleet)
}

fn sample_vehicle_request() -> CreateVehicleRequest {
    CreateVehicleRequest {
        vehicle_number: "AEF 9012".to_string(),
        make: "Isuzu".to_string(),
        model: "D-Max".to_string(),
        year: 2023,
        status: VehicleStatus::Available,
        location: None,
        driver: None,
        fuel_level: 90,
        mileage: 5000,
        last_maintenance: None,
        next_maintenance: None,
    }
}

#[tokio::test]
async fn add_vehicle_appears_once_with_fresh_id() {
    let (_dir, mut fleet) = seeded_store().await;
    let existing_ids: Vec<String> = fleet.vehicles().iter().map(|v| v.id.clone()).collect();

    let created = fleet.add_vehicle(sample_vehicle_request()).await.unwrap();

    assert_eq!(fleet.vehicles().len(), 5);
    let matches: Vec<_> = fleet
        .vehicles()
        .iter()
        .filter(|v| v.id == created.id)
        .collect();
    assert_eq!(matches.len(), 1);

    assert!(!existing_ids.contains(&created.id));
    assert_eq!(created.vehicle_number, "AEF 9012");
    assert_eq!(created.make, "Isuzu");
    assert_eq!(created.fuel_level, 90);
    assert_eq!(created.mileage, 5000);

    // Orden de inserción: el nuevo vehículo queda al final
    assert_eq!(fleet.vehicles().last().unwrap().id, created.id);
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let (_dir, mut fleet) = seeded_store().await;
    let before = fleet.vehicles()[0].clone();

    fleet
        .update_vehicle(
            "1",
            UpdateVehicleRequest {
                fuel_level: Some(60),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let after = &fleet.vehicles()[0];
    assert_eq!(after.fuel_level, 60);
    assert_eq!(after.vehicle_number, before.vehicle_number);
    assert_eq!(after.make, before.make);
    assert_eq!(after.model, before.model);
    assert_eq!(after.year, before.year);
    assert_eq!(after.status, before.status);
    assert_eq!(after.location, before.location);
    assert_eq!(after.driver, before.driver);
    assert_eq!(after.mileage, before.mileage);
    assert_eq!(after.last_maintenance, before.last_maintenance);
    assert_eq!(after.next_maintenance, before.next_maintenance);
}

#[tokio::test]
async fn driver_status_update_preserves_identity_fields() {
    let (_dir, mut fleet) = seeded_store().await;

    let created = fleet
        .add_driver(CreateDriverRequest {
            name: "Rudo Moyo".to_string(),
            license_number: "ZW111222333".to_string(),
            phone: Some("+263-77-567-8901".to_string()),
            email: Some("rudo.moyo@company.co.zw".to_string()),
            status: DriverStatus::Available,
            assigned_vehicle: None,
        })
        .await
        .unwrap();

    fleet
        .update_driver(
            &created.id,
            UpdateDriverRequest {
                status: Some(DriverStatus::Busy),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let driver = fleet
        .drivers()
        .iter()
        .find(|d| d.id == created.id)
        .unwrap();
    assert_eq!(driver.status, DriverStatus::Busy);
    assert_eq!(driver.name, "Rudo Moyo");
    assert_eq!(driver.license_number, "ZW111222333");
    assert_eq!(driver.phone.as_deref(), Some("+263-77-567-8901"));
    assert_eq!(driver.email.as_deref(), Some("rudo.moyo@company.co.zw"));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (_dir, mut fleet) = seeded_store().await;

    fleet.delete_vehicle("3").await.unwrap();
    let after_first: Vec<String> = fleet.vehicles().iter().map(|v| v.id.clone()).collect();

    fleet.delete_vehicle("3").await.unwrap();
    let after_second: Vec<String> = fleet.vehicles().iter().map(|v| v.id.clone()).collect();

    assert_eq!(after_first, after_second);
    assert_eq!(after_first, vec!["1", "2", "4"]);
}

#[tokio::test]
async fn deleting_vehicle_cascades_to_records_and_drivers() {
    let (_dir, mut fleet) = seeded_store().await;

    // El vehículo "4" tiene el registro "4" y a Hope Chuma ("2") asignada
    let hope = fleet.drivers().iter().find(|d| d.id == "2").unwrap();
    assert_eq!(hope.assigned_vehicle.as_deref(), Some("4"));

    fleet.delete_vehicle("4").await.unwrap();

    assert!(fleet.vehicles().iter().all(|v| v.id != "4"));
    assert!(fleet.maintenance_records().iter().all(|r| r.vehicle_id != "4"));

    let hope = fleet.drivers().iter().find(|d| d.id == "2").unwrap();
    assert_eq!(hope.assigned_vehicle, None);
}

#[tokio::test]
async fn seeded_scenario_deleting_vehicle_2_removes_its_maintenance() {
    let (_dir, mut fleet) = seeded_store().await;

    let ranger = fleet.vehicles().iter().find(|v| v.id == "2").unwrap();
    assert_eq!(ranger.status, VehicleStatus::Maintenance);

    fleet.delete_vehicle("2").await.unwrap();

    assert!(fleet.vehicles().iter().all(|v| v.id != "2"));
    let record_ids: Vec<&str> = fleet
        .maintenance_records()
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(record_ids, vec!["1", "3", "4"]);
}

#[tokio::test]
async fn deleting_driver_clears_vehicle_summary() {
    let (_dir, mut fleet) = seeded_store().await;

    let camry = fleet.vehicles().iter().find(|v| v.id == "1").unwrap();
    assert_eq!(camry.driver.as_ref().map(|d| d.id.as_str()), Some("1"));

    fleet.delete_driver("1").await.unwrap();

    assert!(fleet.drivers().iter().all(|d| d.id != "1"));
    let camry = fleet.vehicles().iter().find(|v| v.id == "1").unwrap();
    assert_eq!(camry.driver, None);
}

#[tokio::test]
async fn round_trip_reload_reproduces_collections() -> anyhow::Result<()> {
    let dir = TempDir::new()?;

    let backend = Arc::new(LocalBackend::open(dir.path(), true)?);
    let mut fleet = FleetService::new(backend, "1");
    fleet.load_all().await?;

    fleet.add_vehicle(sample_vehicle_request()).await?;
    fleet
        .update_maintenance_record(
            "2",
            UpdateMaintenanceRequest {
                status: Some(MaintenanceStatus::InProgress),
                ..Default::default()
            },
        )
        .await?;

    let vehicles_before = fleet.vehicles().to_vec();
    let drivers_before = fleet.drivers().to_vec();
    let records_before = fleet.maintenance_records().to_vec();
    drop(fleet);

    // Reabrir el mismo directorio reproduce las colecciones (orden y valores)
    let backend = Arc::new(LocalBackend::open(dir.path(), true)?);
    let mut reloaded = FleetService::new(backend, "1");
    reloaded.load_all().await?;

    assert_eq!(reloaded.vehicles(), vehicles_before.as_slice());
    assert_eq!(reloaded.drivers(), drivers_before.as_slice());
    assert_eq!(reloaded.maintenance_records(), records_before.as_slice());
    Ok(())
}

#[tokio::test]
async fn local_update_of_missing_id_is_a_noop() {
    let (_dir, mut fleet) = seeded_store().await;
    let before = fleet.vehicles().to_vec();

    fleet
        .update_vehicle(
            "999",
            UpdateVehicleRequest {
                fuel_level: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(fleet.vehicles(), before.as_slice());
}

#[tokio::test]
async fn out_of_range_fuel_is_a_form_boundary_concern() {
    let (_dir, mut fleet) = seeded_store().await;

    let mut request = sample_vehicle_request();
    request.fuel_level = 150;

    // El formulario rechaza el valor antes de llegar al almacén
    let errors = request.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("fuel_level"));

    // El almacén no re-valida rangos: si el límite de formulario se
    // salta, el valor se persiste tal cual. Documentamos ese contrato.
    let created = fleet.add_vehicle(request).await.unwrap();
    assert_eq!(created.fuel_level, 150);
}

#[tokio::test]
async fn driver_reassignment_leaves_stale_vehicle_summary() {
    let (_dir, mut fleet) = seeded_store().await;

    // Estado inicial consistente: Gideon ("1") ↔ Camry ("1")
    let camry = fleet.vehicles().iter().find(|v| v.id == "1").unwrap();
    assert_eq!(camry.driver.as_ref().map(|d| d.id.as_str()), Some("1"));

    // Reasignación solo del lado del conductor
    fleet
        .update_driver(
            "1",
            UpdateDriverRequest {
                assigned_vehicle: Some("3".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let gideon = fleet.drivers().iter().find(|d| d.id == "1").unwrap();
    assert_eq!(gideon.assigned_vehicle.as_deref(), Some("3"));

    // Deriva conocida: el resumen embebido del Camry queda obsoleto y el
    // Honda ("3") no se entera. Solo los deletes reconcilian ambos lados.
    let camry = fleet.vehicles().iter().find(|v| v.id == "1").unwrap();
    assert_eq!(camry.driver.as_ref().map(|d| d.id.as_str()), Some("1"));
    let fit = fleet.vehicles().iter().find(|v| v.id == "3").unwrap();
    assert_eq!(fit.driver, None);
}

#[tokio::test]
async fn maintenance_record_requires_existing_vehicle_at_creation() {
    let (_dir, mut fleet) = seeded_store().await;

    let result = fleet
        .add_maintenance_record(CreateMaintenanceRequest {
            vehicle_id: "999".to_string(),
            kind: "repair".to_string(),
            description: None,
            cost: None,
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            status: MaintenanceStatus::Pending,
            next_due: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(fleet.maintenance_records().len(), 4);
}

#[tokio::test]
async fn maintenance_record_for_existing_vehicle_is_added() {
    let (_dir, mut fleet) = seeded_store().await;

    let created = fleet
        .add_maintenance_record(CreateMaintenanceRequest {
            vehicle_id: "1".to_string(),
            kind: "inspection".to_string(),
            description: Some("Quarterly Check".to_string()),
            cost: None,
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            status: MaintenanceStatus::Pending,
            next_due: None,
        })
        .await
        .unwrap();

    assert_eq!(fleet.maintenance_records().len(), 5);
    assert_eq!(fleet.maintenance_records().last().unwrap().id, created.id);
}
