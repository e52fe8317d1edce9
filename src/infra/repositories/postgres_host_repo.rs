use crate::domain::{models::host::Host, ports::HostRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresHostRepo {
    pool: PgPool,
}

impl PostgresHostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HostRepository for PostgresHostRepo {
    async fn create(&self, host: &Host) -> Result<Host, AppError> {
        sqlx::query_as::<_, Host>(
            "INSERT INTO hosts (id, username, email, password_hash, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *")
            .bind(&host.id).bind(&host.username).bind(&host.email).bind(&host.password_hash).bind(host.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Host>, AppError> {
        sqlx::query_as::<_, Host>("SELECT * FROM hosts WHERE username = $1").bind(username).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Host>, AppError> {
        sqlx::query_as::<_, Host>("SELECT * FROM hosts WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
