use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::models::{Car, CarStatus, Client, Sale, SaleResponse, Seller};

/// Optional filters shared by the list and count queries.
#[derive(Debug, Default, Clone, Copy)]
pub struct SaleFilter {
    pub seller_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

const FILTER_CLAUSE: &str = "($1::bigint IS NULL OR sa.seller_id = $1)
       AND ($2::date IS NULL OR sa.sale_date::date >= $2)
       AND ($3::date IS NULL OR sa.sale_date::date <= $3)";

// One flat row per sale with its car, client, and seller joined in. The
// prefixed aliases keep FromRow unambiguous across the four tables.
const DETAIL_SELECT: &str = "SELECT sa.id, sa.car_id, sa.client_id, sa.seller_id, sa.sale_price, sa.sale_date,
            c.vin AS car_vin, c.brand AS car_brand, c.model AS car_model,
            c.year AS car_year, c.color AS car_color, c.price AS car_price,
            c.status AS car_status, c.created_at AS car_created_at, c.updated_at AS car_updated_at,
            cl.full_name AS client_full_name, cl.phone AS client_phone,
            cl.email AS client_email, cl.document_id AS client_document_id,
            cl.created_at AS client_created_at,
            se.full_name AS seller_full_name, se.phone AS seller_phone,
            se.is_active AS seller_is_active, se.created_at AS seller_created_at
       FROM sales sa
       JOIN cars c ON c.id = sa.car_id
       JOIN clients cl ON cl.id = sa.client_id
       JOIN sellers se ON se.id = sa.seller_id";

#[derive(Debug, FromRow)]
struct SaleDetailRow {
    id: i64,
    car_id: i64,
    client_id: i64,
    seller_id: i64,
    sale_price: f64,
    sale_date: DateTime<Utc>,
    car_vin: String,
    car_brand: String,
    car_model: String,
    car_year: i32,
    car_color: Option<String>,
    car_price: f64,
    car_status: CarStatus,
    car_created_at: DateTime<Utc>,
    car_updated_at: Option<DateTime<Utc>>,
    client_full_name: String,
    client_phone: String,
    client_email: Option<String>,
    client_document_id: Option<String>,
    client_created_at: DateTime<Utc>,
    seller_full_name: String,
    seller_phone: String,
    seller_is_active: bool,
    seller_created_at: DateTime<Utc>,
}

impl From<SaleDetailRow> for SaleResponse {
    fn from(row: SaleDetailRow) -> Self {
        SaleResponse {
            id: row.id,
            car_id: row.car_id,
            client_id: row.client_id,
            seller_id: row.seller_id,
            sale_price: row.sale_price,
            sale_date: row.sale_date,
            car: Car {
                id: row.car_id,
                vin: row.car_vin,
                brand: row.car_brand,
                model: row.car_model,
                year: row.car_year,
                color: row.car_color,
                price: row.car_price,
                status: row.car_status,
                created_at: row.car_created_at,
                updated_at: row.car_updated_at,
            },
            client: Client {
                id: row.client_id,
                full_name: row.client_full_name,
                phone: row.client_phone,
                email: row.client_email,
                document_id: row.client_document_id,
                created_at: row.client_created_at,
            },
            seller: Seller {
                id: row.seller_id,
                full_name: row.seller_full_name,
                phone: row.seller_phone,
                is_active: row.seller_is_active,
                created_at: row.seller_created_at,
            },
        }
    }
}

#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filter: &SaleFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SaleResponse>, sqlx::Error> {
        let query = format!(
            "{} WHERE {} ORDER BY sa.sale_date DESC LIMIT $4 OFFSET $5",
            DETAIL_SELECT, FILTER_CLAUSE
        );
        let rows = sqlx::query_as::<_, SaleDetailRow>(&query)
            .bind(filter.seller_id)
            .bind(filter.date_from)
            .bind(filter.date_to)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(SaleResponse::from).collect())
    }

    pub async fn count(&self, filter: &SaleFilter) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(sa.id) FROM sales sa WHERE {}",
            FILTER_CLAUSE
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.seller_id)
            .bind(filter.date_from)
            .bind(filter.date_to)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<SaleResponse>, sqlx::Error> {
        let query = format!("{} WHERE sa.id = $1", DETAIL_SELECT);
        let row = sqlx::query_as::<_, SaleDetailRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(SaleResponse::from))
    }

    // The helpers below run inside the sale-creation transaction.

    pub async fn find_car(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        car_id: i64,
    ) -> Result<Option<Car>, sqlx::Error> {
        sqlx::query_as::<_, Car>(
            "SELECT id, vin, brand, model, year, color, price, status, created_at, updated_at
             FROM cars WHERE id = $1",
        )
        .bind(car_id)
        .fetch_optional(&mut **tx)
        .await
    }

    pub async fn client_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)")
                .bind(client_id)
                .fetch_optional(&mut **tx)
                .await?;
        Ok(exists.unwrap_or(false))
    }

    pub async fn find_seller(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller_id: i64,
    ) -> Result<Option<Seller>, sqlx::Error> {
        sqlx::query_as::<_, Seller>(
            "SELECT id, full_name, phone, is_active, created_at FROM sellers WHERE id = $1",
        )
        .bind(seller_id)
        .fetch_optional(&mut **tx)
        .await
    }

    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        car_id: i64,
        client_id: i64,
        seller_id: i64,
        sale_price: f64,
    ) -> Result<Sale, sqlx::Error> {
        sqlx::query_as::<_, Sale>(
            "INSERT INTO sales (car_id, client_id, seller_id, sale_price)
             VALUES ($1, $2, $3, $4)
             RETURNING id, car_id, client_id, seller_id, sale_price, sale_date",
        )
        .bind(car_id)
        .bind(client_id)
        .bind(seller_id)
        .bind(sale_price)
        .fetch_one(&mut **tx)
        .await
    }

    /// Flip the car to sold, conditioned on it still being available. Returns
    /// false when another transaction already sold it; the caller must abort.
    pub async fn mark_car_sold(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        car_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cars SET status = 'sold', updated_at = now()
             WHERE id = $1 AND status = 'available'",
        )
        .bind(car_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
