use crate::domain::{models::host::Host, ports::HostRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteHostRepo {
    pool: SqlitePool,
}

impl SqliteHostRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HostRepository for SqliteHostRepo {
    async fn create(&self, host: &Host) -> Result<Host, AppError> {
        sqlx::query_as::<_, Host>(
            "INSERT INTO hosts (id, username, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *")
            .bind(&host.id).bind(&host.username).bind(&host.email).bind(&host.password_hash).bind(host.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Host>, AppError> {
        sqlx::query_as::<_, Host>("SELECT * FROM hosts WHERE username = ?").bind(username).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Host>, AppError> {
        sqlx::query_as::<_, Host>("SELECT * FROM hosts WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
