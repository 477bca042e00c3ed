//! Servicios del sistema
//!
//! `FleetService` es el almacén de datos; `AuthService` el flujo de
//! autenticación mock que gobierna su ciclo de vida.

pub mod auth_service;
pub mod fleet_service;
