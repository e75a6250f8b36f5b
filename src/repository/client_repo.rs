use sqlx::PgPool;

use crate::models::{Client, ClientCreate, ClientUpdate};

const CLIENT_COLUMNS: &str = "id, full_name, phone, email, document_id, created_at";

const FILTER_CLAUSE: &str = "($1::text IS NULL
            OR full_name ILIKE '%' || $1 || '%'
            OR phone ILIKE '%' || $1 || '%'
            OR email ILIKE '%' || $1 || '%')";

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM clients WHERE {} ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            CLIENT_COLUMNS, FILTER_CLAUSE
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn count(&self, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(id) FROM clients WHERE {}", FILTER_CLAUSE);
        sqlx::query_scalar::<_, i64>(&query)
            .bind(search)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {} FROM clients WHERE id = $1", CLIENT_COLUMNS);
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(&self, client: &ClientCreate) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (full_name, phone, email, document_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            CLIENT_COLUMNS
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&client.full_name)
            .bind(&client.phone)
            .bind(client.email.as_deref())
            .bind(client.document_id.as_deref())
            .fetch_one(&self.pool)
            .await
    }

    pub async fn update(
        &self,
        id: i64,
        client: &ClientUpdate,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                document_id = COALESCE($5, document_id)
             WHERE id = $1
             RETURNING {}",
            CLIENT_COLUMNS
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(client.full_name.as_deref())
            .bind(client.phone.as_deref())
            .bind(client.email.as_deref())
            .bind(client.document_id.as_deref())
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
