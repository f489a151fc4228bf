// src/db/unit_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::unit::BusinessUnit};

#[derive(Clone)]
pub struct UnitRepository {
    pool: PgPool,
}

impl UnitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_unit(&self, name: &str, city: Option<&str>) -> Result<BusinessUnit, AppError> {
        let unit = sqlx::query_as::<_, BusinessUnit>(
            r#"
            INSERT INTO business_units (name, city)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(city)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Já existe uma unidade com esse nome.".to_string(),
                    );
                }
            }
            e.into()
        })?;

        Ok(unit)
    }

    pub async fn list_units(&self) -> Result<Vec<BusinessUnit>, AppError> {
        let units = sqlx::query_as::<_, BusinessUnit>(
            "SELECT * FROM business_units ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(units)
    }
}
