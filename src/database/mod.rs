//! Acceso a la base de datos (variante remota)

pub mod connection;

pub use connection::{create_pool, ensure_schema};
