use anyhow::Result;
use colored::*;
use std::io::{self, Write};

use fleetguard::models::auth::LoginRequest;
use fleetguard::models::driver::{CreateDriverRequest, DriverStatus};
use fleetguard::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, VehicleStatus};
use fleetguard::utils::validation::{
    validate_email, validate_fuel_level, validate_non_negative, validate_not_empty, validate_phone,
    validate_year,
};
use fleetguard::{AppState, EnvironmentConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("{}", "🚚 FleetGuard Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    // Paso 1: Abrir el estado (backend según FLEET_STORAGE_MODE)
    let mut state = AppState::new(EnvironmentConfig::from_env()).await?;

    // Paso 2: Iniciar sesión si no hay una persistida
    while !state.is_authenticated() {
        login_menu(&mut state).await?;
    }

    if let Some(user) = state.current_user() {
        println!("{}", format!("🔓 Sesión activa: {}", user.email).bright_green());
    }

    // Paso 3: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 📋 Ver flota");
        println!("2. 🚗 Agregar vehículo");
        println!("3. 🧑‍✈️ Agregar conductor");
        println!("4. 🔧 Cambiar estado de vehículo");
        println!("5. 🗑️  Eliminar vehículo (con cascada)");
        println!("6. 🚪 Cerrar sesión y salir");
        print!("{}", "Selecciona una opción (1-6): ".bright_yellow());
        io::stdout().flush()?;

        let choice = read_line()?;
        match choice.as_str() {
            "1" => print_fleet(&state),
            "2" => add_vehicle(&mut state).await?,
            "3" => add_driver(&mut state).await?,
            "4" => change_vehicle_status(&mut state).await?,
            "5" => delete_vehicle(&mut state).await?,
            "6" => {
                state.sign_out();
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red()),
        }
    }

    Ok(())
}

async fn login_menu(state: &mut AppState) -> Result<()> {
    println!("{}", "🔐 INICIAR SESIÓN".bright_cyan().bold());
    println!("{}", "==================".bright_cyan());
    println!("1. Email y password");
    println!("2. Sesión demo");
    print!("{}", "Selecciona una opción (1-2): ".bright_yellow());
    io::stdout().flush()?;

    match read_line()?.as_str() {
        "1" => {
            print!("{}", "Email: ".bright_yellow());
            io::stdout().flush()?;
            let email = read_line()?;

            print!("{}", "Password: ".bright_yellow());
            io::stdout().flush()?;
            let password = read_line()?;

            match state.sign_in(&LoginRequest { email, password }).await {
                Ok(user) => println!("{}", format!("✅ Bienvenido, {}", user.name).bright_green()),
                Err(e) => println!("{}", format!("❌ Login fallido: {}", e).bright_red()),
            }
        }
        "2" => {
            state.sign_in_demo().await?;
            println!("{}", "✅ Sesión demo abierta".bright_green());
        }
        _ => println!("{}", "❌ Opción inválida.".bright_red()),
    }

    Ok(())
}

fn print_fleet(state: &AppState) {
    let Some(fleet) = state.fleet() else {
        println!("{}", "❌ No hay sesión activa".bright_red());
        return;
    };

    println!();
    println!("{}", format!("🚗 VEHÍCULOS ({})", fleet.vehicles().len()).bright_blue().bold());
    for vehicle in fleet.vehicles() {
        let status = match vehicle.status {
            VehicleStatus::Available => "available".green(),
            VehicleStatus::InUse => "in-use".blue(),
            VehicleStatus::Maintenance => "maintenance".yellow(),
            VehicleStatus::OutOfService => "out-of-service".red(),
        };
        let driver = vehicle
            .driver
            .as_ref()
            .map(|d| d.name.as_str())
            .unwrap_or("—");
        println!(
            "  [{}] {} {} {} · {} · ⛽ {}% · conductor: {}",
            vehicle.id, vehicle.vehicle_number, vehicle.make, vehicle.model, status,
            vehicle.fuel_level, driver
        );
    }

    println!();
    println!("{}", format!("🧑‍✈️ CONDUCTORES ({})", fleet.drivers().len()).bright_blue().bold());
    for driver in fleet.drivers() {
        let assigned = driver.assigned_vehicle.as_deref().unwrap_or("—");
        println!(
            "  [{}] {} · {} · vehículo: {}",
            driver.id,
            driver.name,
            driver.status.as_str(),
            assigned
        );
    }

    println!();
    println!(
        "{}",
        format!("🔧 MANTENIMIENTOS ({})", fleet.maintenance_records().len())
            .bright_blue()
            .bold()
    );
    for record in fleet.maintenance_records() {
        println!(
            "  [{}] vehículo {} · {} · {} · {}",
            record.id,
            record.vehicle_id,
            record.kind,
            record.date,
            record.status.as_str()
        );
    }
}

async fn add_vehicle(state: &mut AppState) -> Result<()> {
    println!("{}", "🚗 NUEVO VEHÍCULO".bright_cyan().bold());

    let vehicle_number = prompt("Número de vehículo (ej: ABD 1110): ")?;
    if let Err(e) = validate_not_empty(&vehicle_number) {
        println!("{}", format!("❌ Número inválido: {:?}", e).bright_red());
        return Ok(());
    }

    let make = prompt("Marca: ")?;
    let model = prompt("Modelo: ")?;

    let year: i32 = match prompt("Año: ")?.parse() {
        Ok(value) => value,
        Err(_) => {
            println!("{}", "❌ Año inválido".bright_red());
            return Ok(());
        }
    };
    if let Err(e) = validate_year(year) {
        println!("{}", format!("❌ Año fuera de rango: {:?}", e).bright_red());
        return Ok(());
    }

    let fuel_level: i32 = prompt("Nivel de combustible (0-100): ")?.parse().unwrap_or(-1);
    if let Err(e) = validate_fuel_level(fuel_level) {
        println!("{}", format!("❌ Combustible fuera de rango: {:?}", e).bright_red());
        return Ok(());
    }

    let mileage: i64 = prompt("Kilometraje: ")?.parse().unwrap_or(-1);
    if let Err(e) = validate_non_negative(mileage) {
        println!("{}", format!("❌ Kilometraje inválido: {:?}", e).bright_red());
        return Ok(());
    }

    let Some(fleet) = state.fleet_mut() else {
        println!("{}", "❌ No hay sesión activa".bright_red());
        return Ok(());
    };

    let request = CreateVehicleRequest {
        vehicle_number,
        make,
        model,
        year,
        status: VehicleStatus::Available,
        location: None,
        driver: None,
        fuel_level,
        mileage,
        last_maintenance: None,
        next_maintenance: None,
    };

    match fleet.add_vehicle(request).await {
        Ok(created) => println!(
            "{}",
            format!("✅ Vehículo creado con id {}", created.id).bright_green()
        ),
        Err(e) => println!("{}", format!("❌ Error al crear: {}", e).bright_red()),
    }

    Ok(())
}

async fn add_driver(state: &mut AppState) -> Result<()> {
    println!("{}", "🧑‍✈️ NUEVO CONDUCTOR".bright_cyan().bold());

    let name = prompt("Nombre: ")?;
    if let Err(e) = validate_not_empty(&name) {
        println!("{}", format!("❌ Nombre inválido: {:?}", e).bright_red());
        return Ok(());
    }

    let license_number = prompt("Número de licencia: ")?;
    if let Err(e) = validate_not_empty(&license_number) {
        println!("{}", format!("❌ Licencia inválida: {:?}", e).bright_red());
        return Ok(());
    }

    let email = prompt("Email: ")?;
    if let Err(e) = validate_email(&email) {
        println!("{}", format!("❌ Email inválido: {:?}", e).bright_red());
        return Ok(());
    }

    let phone = prompt("Teléfono: ")?;
    if let Err(e) = validate_phone(&phone) {
        println!("{}", format!("❌ Teléfono inválido: {:?}", e).bright_red());
        return Ok(());
    }

    let Some(fleet) = state.fleet_mut() else {
        println!("{}", "❌ No hay sesión activa".bright_red());
        return Ok(());
    };

    let request = CreateDriverRequest {
        name,
        license_number,
        phone: Some(phone),
        email: Some(email),
        status: DriverStatus::Available,
        assigned_vehicle: None,
    };

    match fleet.add_driver(request).await {
        Ok(created) => println!(
            "{}",
            format!("✅ Conductor creado con id {}", created.id).bright_green()
        ),
        Err(e) => println!("{}", format!("❌ Error al crear: {}", e).bright_red()),
    }

    Ok(())
}

async fn change_vehicle_status(state: &mut AppState) -> Result<()> {
    let id = prompt("Id del vehículo: ")?;

    println!("1. available  2. in-use  3. maintenance  4. out-of-service");
    let status = match prompt("Nuevo estado (1-4): ")?.as_str() {
        "1" => VehicleStatus::Available,
        "2" => VehicleStatus::InUse,
        "3" => VehicleStatus::Maintenance,
        "4" => VehicleStatus::OutOfService,
        _ => {
            println!("{}", "❌ Estado inválido".bright_red());
            return Ok(());
        }
    };

    let Some(fleet) = state.fleet_mut() else {
        println!("{}", "❌ No hay sesión activa".bright_red());
        return Ok(());
    };

    let changes = UpdateVehicleRequest {
        status: Some(status),
        ..Default::default()
    };

    match fleet.update_vehicle(&id, changes).await {
        Ok(()) => println!("{}", "✅ Estado actualizado".bright_green()),
        Err(e) => println!("{}", format!("❌ Error al actualizar: {}", e).bright_red()),
    }

    Ok(())
}

async fn delete_vehicle(state: &mut AppState) -> Result<()> {
    let id = prompt("Id del vehículo a eliminar: ")?;

    let Some(fleet) = state.fleet_mut() else {
        println!("{}", "❌ No hay sesión activa".bright_red());
        return Ok(());
    };

    let records_before = fleet.maintenance_records().len();
    let assigned_before = fleet
        .drivers()
        .iter()
        .filter(|d| d.assigned_vehicle.as_deref() == Some(id.as_str()))
        .count();

    match fleet.delete_vehicle(&id).await {
        Ok(()) => {
            let records_removed = records_before - fleet.maintenance_records().len();
            println!(
                "{}",
                format!(
                    "✅ Vehículo eliminado · {} mantenimientos borrados · {} conductores liberados",
                    records_removed, assigned_before
                )
                .bright_green()
            );
        }
        Err(e) => println!("{}", format!("❌ Error al eliminar: {}", e).bright_red()),
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    read_line()
}

fn read_line() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}
