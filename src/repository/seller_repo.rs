use sqlx::PgPool;

use crate::models::{Seller, SellerCreate, SellerResponse, SellerUpdate};

const SELLER_COLUMNS: &str = "id, full_name, phone, is_active, created_at";

// Aggregates are computed at read time from the sales table, one grouped
// query for the whole page rather than a query per seller.
const SELLER_WITH_STATS: &str = "SELECT s.id, s.full_name, s.phone, s.is_active, s.created_at,
            COUNT(sa.id) AS sales_count,
            COALESCE(SUM(sa.sale_price), 0) AS total_revenue
       FROM sellers s
       LEFT JOIN sales sa ON sa.seller_id = s.id";

#[derive(Clone)]
pub struct SellerRepository {
    pool: PgPool,
}

impl SellerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        is_active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SellerResponse>, sqlx::Error> {
        let query = format!(
            "{} WHERE ($1::bool IS NULL OR s.is_active = $1)
             GROUP BY s.id
             ORDER BY s.created_at DESC
             LIMIT $2 OFFSET $3",
            SELLER_WITH_STATS
        );
        sqlx::query_as::<_, SellerResponse>(&query)
            .bind(is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn count(&self, is_active: Option<bool>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(id) FROM sellers WHERE ($1::bool IS NULL OR is_active = $1)",
        )
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<SellerResponse>, sqlx::Error> {
        let query = format!("{} WHERE s.id = $1 GROUP BY s.id", SELLER_WITH_STATS);
        sqlx::query_as::<_, SellerResponse>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(&self, seller: &SellerCreate) -> Result<Seller, sqlx::Error> {
        let query = format!(
            "INSERT INTO sellers (full_name, phone, is_active)
             VALUES ($1, $2, $3)
             RETURNING {}",
            SELLER_COLUMNS
        );
        sqlx::query_as::<_, Seller>(&query)
            .bind(&seller.full_name)
            .bind(&seller.phone)
            .bind(seller.is_active)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn update(
        &self,
        id: i64,
        seller: &SellerUpdate,
    ) -> Result<Option<Seller>, sqlx::Error> {
        let query = format!(
            "UPDATE sellers SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {}",
            SELLER_COLUMNS
        );
        sqlx::query_as::<_, Seller>(&query)
            .bind(id)
            .bind(seller.full_name.as_deref())
            .bind(seller.phone.as_deref())
            .bind(seller.is_active)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sellers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
