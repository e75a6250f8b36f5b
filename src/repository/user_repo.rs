use sqlx::PgPool;

use crate::models::{User, UserRole};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, hashed_password, full_name, role, is_active, created_at, updated_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, hashed_password, full_name, role, is_active, created_at, updated_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn create(
        &self,
        username: &str,
        email: Option<&str>,
        hashed_password: &str,
        full_name: Option<&str>,
        role: UserRole,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, hashed_password, full_name, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, username, email, hashed_password, full_name, role, is_active, created_at, updated_at",
        )
        .bind(username)
        .bind(email)
        .bind(hashed_password)
        .bind(full_name)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }
}
