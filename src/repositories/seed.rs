//! Datos demo de la flota
//!
//! Flota de ejemplo que se siembra en el backend local cuando no existe
//! estado previo: cuatro vehículos, cuatro conductores y cuatro registros
//! de mantenimiento con ids "1" a "4".

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::driver::{Driver, DriverStatus};
use crate::models::maintenance::{MaintenanceRecord, MaintenanceStatus};
use crate::models::vehicle::{DriverRef, Location, Vehicle, VehicleStatus};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fecha demo inválida")
}

pub fn demo_vehicles() -> Vec<Vehicle> {
    vec![
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
            last_maintenance: Some(date(2024, 1, 15)),
            next_maintenance: Some(date(2024, 4, 15)),
        },
        Vehicle {
            id: "2".to_string(),
            vehicle_number: "ABC 2345".to_string(),
            make: "Ford".to_string(),
            model: "Ranger".to_string(),
            year: 2021,
            status: VehicleStatus::Maintenance,
            location: Some(Location {
                address: "Avondale, Harare".to_string(),
                lat: Some(-17.8292),
                lng: Some(31.0522),
            }),
            driver: None,
            fuel_level: 45,
            mileage: 45000,
            last_maintenance: Some(date(2024, 2, 20)),
            next_maintenance: Some(date(2024, 5, 20)),
        },
        Vehicle {
            id: "3".to_string(),
            vehicle_number: "ACD 5678".to_string(),
            make: "Honda".to_string(),
            model: "Fit".to_string(),
            year: 2023,
            status: VehicleStatus::OutOfService,
            location: Some(Location {
                address: "Borrowdale, Harare".to_string(),
                lat: Some(-17.8145),
                lng: Some(31.0067),
            }),
            driver: None,
            fuel_level: 20,
            mileage: 15000,
            last_maintenance: Some(date(2024, 1, 10)),
            next_maintenance: Some(date(2024, 4, 10)),
        },
        Vehicle {
            id: "4".to_string(),
            vehicle_number: "ADE 1234".to_string(),
            make: "Nissan".to_string(),
            model: "Navara".to_string(),
            year: 2022,
            status: VehicleStatus::InUse,
            location: Some(Location {
                address: "Warren Park, Harare".to_string(),
                lat: Some(-17.8739),
                lng: Some(31.0297),
            }),
            driver: Some(DriverRef {
                id: "2".to_string(),
                name: "Hope Chuma".to_string(),
            }),
            fuel_level: 70,
            mileage: 32000,
            last_maintenance: Some(date(2024, 2, 1)),
            next_maintenance: Some(date(2024, 5, 1)),
        },
    ]
}

pub fn demo_drivers() -> Vec<Driver> {
    vec![
        Driver {
            id: "1".to_string(),
            name: "Gideon Zimano".to_string(),
            license_number: "ZW123456789".to_string(),
            phone: Some("+263-77-123-4567".to_string()),
            email: Some("gideon.zimano@company.co.zw".to_string()),
            status: DriverStatus::Available,
            assigned_vehicle: Some("1".to_string()),
        },
        Driver {
            id: "2".to_string(),
            name: "Hope Chuma".to_string(),
            license_number: "ZW987654321".to_string(),
            phone: Some("+263-77-234-5678".to_string()),
            email: Some("hope.chuma@company.co.zw".to_string()),
            status: DriverStatus::Busy,
            assigned_vehicle: Some("4".to_string()),
        },
        Driver {
            id: "3".to_string(),
            name: "Tino Chandengenda".to_string(),
            license_number: "ZW456789123".to_string(),
            phone: Some("+263-77-345-6789".to_string()),
            email: Some("tino.chandengenda@company.co.zw".to_string()),
            status: DriverStatus::Available,
            assigned_vehicle: None,
        },
        Driver {
            id: "4".to_string(),
            name: "Leeroy Sibanda".to_string(),
            license_number: "ZW789123456".to_string(),
            phone: Some("+263-77-456-7890".to_string()),
            email: Some("leeroy.sibanda@company.co.zw".to_string()),
            status: DriverStatus::OffDuty,
            assigned_vehicle: None,
        },
    ]
}

pub fn demo_maintenance_records() -> Vec<MaintenanceRecord> {
    vec![
        MaintenanceRecord {
            id: "1".to_string(),
            vehicle_id: "1".to_string(),
            kind: "scheduled".to_string(),
            description: Some("Oil Change & Filter Replacement".to_string()),
            cost: Some(Decimal::from_str_exact("85").expect("costo demo inválido")),
            date: date(2024, 1, 15),
            status: MaintenanceStatus::Completed,
            next_due: Some(date(2024, 4, 15)),
        },
        MaintenanceRecord {
            id: "2".to_string(),
            vehicle_id: "2".to_string(),
            kind: "repair".to_string(),
            description: Some("Brake Pad Replacement".to_string()),
            cost: Some(Decimal::from_str_exact("320").expect("costo demo inválido")),
            date: date(2024, 2, 20),
            status: MaintenanceStatus::Pending,
            next_due: None,
        },
        MaintenanceRecord {
            id: "3".to_string(),
            vehicle_id: "3".to_string(),
            kind: "inspection".to_string(),
            description: Some("Annual Safety Inspection".to_string()),
            cost: Some(Decimal::from_str_exact("150").expect("costo demo inválido")),
            date: date(2024, 1, 10),
            status: MaintenanceStatus::Cancelled,
            next_due: Some(date(2024, 4, 10)),
        },
        MaintenanceRecord {
            id: "4".to_string(),
            vehicle_id: "4".to_string(),
            kind: "scheduled".to_string(),
            description: Some("Transmission Service & Fluid Change".to_string()),
            cost: Some(Decimal::from_str_exact("220").expect("costo demo inválido")),
            date: date(2024, 3, 1),
            status: MaintenanceStatus::Completed,
            next_due: Some(date(2024, 6, 1)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_fleet_shape() {
        assert_eq!(demo_vehicles().len(), 4);
        assert_eq!(demo_drivers().len(), 4);
        assert_eq!(demo_maintenance_records().len(), 4);
    }

    #[test]
    fn test_demo_references_are_consistent() {
        let vehicles = demo_vehicles();
        let records = demo_maintenance_records();

        // Cada registro demo apunta a un vehículo demo existente
        for record in &records {
            assert!(vehicles.iter().any(|v| v.id == record.vehicle_id));
        }

        // El vehículo "2" en mantenimiento tiene su registro "2" pendiente
        let ranger = vehicles.iter().find(|v| v.id == "2").unwrap();
        assert_eq!(ranger.status, crate::models::vehicle::VehicleStatus::Maintenance);
        let brake_job = records.iter().find(|r| r.id == "2").unwrap();
        assert_eq!(brake_job.vehicle_id, "2");
    }
}
