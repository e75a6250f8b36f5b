use sqlx::PgPool;

use crate::models::{Car, CarCreate, CarStatus, CarUpdate};

const CAR_COLUMNS: &str = "id, vin, brand, model, year, color, price, status, created_at, updated_at";

/// Optional filters shared by the list and count queries.
#[derive(Debug, Default, Clone)]
pub struct CarFilter {
    pub status: Option<CarStatus>,
    pub brand: Option<String>,
    pub search: Option<String>,
}

const FILTER_CLAUSE: &str = "($1::car_status IS NULL OR status = $1)
       AND ($2::text IS NULL OR brand ILIKE '%' || $2 || '%')
       AND ($3::text IS NULL
            OR vin ILIKE '%' || $3 || '%'
            OR brand ILIKE '%' || $3 || '%'
            OR model ILIKE '%' || $3 || '%')";

#[derive(Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filter: &CarFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Car>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM cars WHERE {} ORDER BY created_at DESC LIMIT $4 OFFSET $5",
            CAR_COLUMNS, FILTER_CLAUSE
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(filter.status)
            .bind(filter.brand.as_deref())
            .bind(filter.search.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn count(&self, filter: &CarFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(id) FROM cars WHERE {}", FILTER_CLAUSE);
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.status)
            .bind(filter.brand.as_deref())
            .bind(filter.search.as_deref())
            .fetch_one(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Car>, sqlx::Error> {
        let query = format!("SELECT {} FROM cars WHERE id = $1", CAR_COLUMNS);
        sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(&self, car: &CarCreate) -> Result<Car, sqlx::Error> {
        let query = format!(
            "INSERT INTO cars (vin, brand, model, year, color, price, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            CAR_COLUMNS
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(&car.vin)
            .bind(&car.brand)
            .bind(&car.model)
            .bind(car.year)
            .bind(car.color.as_deref())
            .bind(car.price)
            .bind(car.status)
            .fetch_one(&self.pool)
            .await
    }

    /// Partial update: absent fields keep their current value.
    pub async fn update(&self, id: i64, car: &CarUpdate) -> Result<Option<Car>, sqlx::Error> {
        let query = format!(
            "UPDATE cars SET
                brand = COALESCE($2, brand),
                model = COALESCE($3, model),
                year = COALESCE($4, year),
                color = COALESCE($5, color),
                price = COALESCE($6, price),
                status = COALESCE($7, status),
                updated_at = now()
             WHERE id = $1
             RETURNING {}",
            CAR_COLUMNS
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .bind(car.brand.as_deref())
            .bind(car.model.as_deref())
            .bind(car.year)
            .bind(car.color.as_deref())
            .bind(car.price)
            .bind(car.status)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
