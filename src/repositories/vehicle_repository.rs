//! Repositorio Postgres de vehículos
//!
//! Toda consulta va filtrada por `user_id`: cada identidad autenticada ve
//! solo su propia flota.

use sqlx::PgPool;

use crate::dto::vehicle_dto::VehicleRow;
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_owner(&self, user_id: &str) -> AppResult<Vec<VehicleRow>> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            "SELECT * FROM vehicles WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing vehicles: {}", e)))?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<VehicleRow>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            "SELECT * FROM vehicles WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finding vehicle: {}", e)))?;

        Ok(row)
    }

    pub async fn insert(&self, row: &VehicleRow) -> AppResult<VehicleRow> {
        let created = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (id, user_id, vehicle_number, make, model, year, status,
                                  location, location_lat, location_lng, driver_id, driver_name,
                                  fuel_level, mileage, last_maintenance, next_maintenance, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.vehicle_number)
        .bind(&row.make)
        .bind(&row.model)
        .bind(row.year)
        .bind(&row.status)
        .bind(&row.location)
        .bind(row.location_lat)
        .bind(row.location_lng)
        .bind(&row.driver_id)
        .bind(&row.driver_name)
        .bind(row.fuel_level)
        .bind(row.mileage)
        .bind(row.last_maintenance)
        .bind(row.next_maintenance)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating vehicle: {}", e)))?;

        Ok(created)
    }

    pub async fn update(&self, row: &VehicleRow) -> AppResult<Option<VehicleRow>> {
        let updated = sqlx::query_as::<_, VehicleRow>(
            r#"
            UPDATE vehicles
            SET vehicle_number = $3, make = $4, model = $5, year = $6, status = $7,
                location = $8, location_lat = $9, location_lng = $10,
                driver_id = $11, driver_name = $12, fuel_level = $13, mileage = $14,
                last_maintenance = $15, next_maintenance = $16
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.vehicle_number)
        .bind(&row.make)
        .bind(&row.model)
        .bind(row.year)
        .bind(&row.status)
        .bind(&row.location)
        .bind(row.location_lat)
        .bind(row.location_lng)
        .bind(&row.driver_id)
        .bind(&row.driver_name)
        .bind(row.fuel_level)
        .bind(row.mileage)
        .bind(row.last_maintenance)
        .bind(row.next_maintenance)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating vehicle: {}", e)))?;

        Ok(updated)
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        // Idempotente: cero filas afectadas no es un error
        sqlx::query("DELETE FROM vehicles WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting vehicle: {}", e)))?;

        Ok(())
    }

    /// Cascada de borrado de conductor: limpia el resumen embebido
    pub async fn clear_driver(&self, user_id: &str, driver_id: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE vehicles SET driver_id = NULL, driver_name = NULL \
             WHERE user_id = $1 AND driver_id = $2",
        )
        .bind(user_id)
        .bind(driver_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error clearing vehicle driver: {}", e)))?;

        Ok(())
    }
}
