//! Repositorio Postgres de registros de mantenimiento

use sqlx::PgPool;

use crate::dto::maintenance_dto::MaintenanceRecordRow;
use crate::utils::errors::{AppError, AppResult};

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_owner(&self, user_id: &str) -> AppResult<Vec<MaintenanceRecordRow>> {
        let rows = sqlx::query_as::<_, MaintenanceRecordRow>(
            "SELECT * FROM maintenance_records WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing maintenance records: {}", e)))?;

        Ok(rows)
    }

    pub async fn find_by_id(
        &self,
        user_id: &str,
        id: &str,
    ) -> AppResult<Option<MaintenanceRecordRow>> {
        let row = sqlx::query_as::<_, MaintenanceRecordRow>(
            "SELECT * FROM maintenance_records WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finding maintenance record: {}", e)))?;

        Ok(row)
    }

    pub async fn insert(&self, row: &MaintenanceRecordRow) -> AppResult<MaintenanceRecordRow> {
        let created = sqlx::query_as::<_, MaintenanceRecordRow>(
            r#"
            INSERT INTO maintenance_records (id, user_id, vehicle_id, "type", description,
                                             cost, date, status, next_due, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.vehicle_id)
        .bind(&row.kind)
        .bind(&row.description)
        .bind(row.cost)
        .bind(row.date)
        .bind(&row.status)
        .bind(row.next_due)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating maintenance record: {}", e)))?;

        Ok(created)
    }

    pub async fn update(&self, row: &MaintenanceRecordRow) -> AppResult<Option<MaintenanceRecordRow>> {
        let updated = sqlx::query_as::<_, MaintenanceRecordRow>(
            r#"
            UPDATE maintenance_records
            SET vehicle_id = $3, "type" = $4, description = $5, cost = $6,
                date = $7, status = $8, next_due = $9
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.vehicle_id)
        .bind(&row.kind)
        .bind(&row.description)
        .bind(row.cost)
        .bind(row.date)
        .bind(&row.status)
        .bind(row.next_due)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating maintenance record: {}", e)))?;

        Ok(updated)
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM maintenance_records WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting maintenance record: {}", e)))?;

        Ok(())
    }

    /// Cascada de borrado de vehículo: elimina todos sus registros
    pub async fn delete_for_vehicle(&self, user_id: &str, vehicle_id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM maintenance_records WHERE user_id = $1 AND vehicle_id = $2")
            .bind(user_id)
            .bind(vehicle_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::Database(format!("Error deleting maintenance for vehicle: {}", e))
            })?;

        Ok(())
    }
}
