//! Repositorio Postgres de conductores

use sqlx::PgPool;

use crate::dto::driver_dto::DriverRow;
use crate::utils::errors::{AppError, AppResult};

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_owner(&self, user_id: &str) -> AppResult<Vec<DriverRow>> {
        let rows = sqlx::query_as::<_, DriverRow>(
            "SELECT * FROM drivers WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing drivers: {}", e)))?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<DriverRow>> {
        let row = sqlx::query_as::<_, DriverRow>(
            "SELECT * FROM drivers WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finding driver: {}", e)))?;

        Ok(row)
    }

    pub async fn insert(&self, row: &DriverRow) -> AppResult<DriverRow> {
        let created = sqlx::query_as::<_, DriverRow>(
            r#"
            INSERT INTO drivers (id, user_id, name, license_number, phone, email,
                                 status, assigned_vehicle, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.name)
        .bind(&row.license_number)
        .bind(&row.phone)
        .bind(&row.email)
        .bind(&row.status)
        .bind(&row.assigned_vehicle)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating driver: {}", e)))?;

        Ok(created)
    }

    pub async fn update(&self, row: &DriverRow) -> AppResult<Option<DriverRow>> {
        let updated = sqlx::query_as::<_, DriverRow>(
            r#"
            UPDATE drivers
            SET name = $3, license_number = $4, phone = $5, email = $6,
                status = $7, assigned_vehicle = $8
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.name)
        .bind(&row.license_number)
        .bind(&row.phone)
        .bind(&row.email)
        .bind(&row.status)
        .bind(&row.assigned_vehicle)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating driver: {}", e)))?;

        Ok(updated)
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM drivers WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting driver: {}", e)))?;

        Ok(())
    }

    /// Cascada de borrado de vehículo: limpia la asignación
    pub async fn clear_assignment(&self, user_id: &str, vehicle_id: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE drivers SET assigned_vehicle = NULL \
             WHERE user_id = $1 AND assigned_vehicle = $2",
        )
        .bind(user_id)
        .bind(vehicle_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error clearing driver assignment: {}", e)))?;

        Ok(())
    }
}
