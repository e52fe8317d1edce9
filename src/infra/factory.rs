use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgConnectOptions, PgPoolOptions}, sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}};
use sqlx::ConnectOptions;
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::auth_service::AuthService;
use crate::infra::notify::broadcast::BroadcastNotifier;
use crate::infra::repositories::{
    postgres_host_repo::PostgresHostRepo, postgres_slot_repo::PostgresSlotRepo,
    sqlite_host_repo::SqliteHostRepo, sqlite_slot_repo::SqliteSlotRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let auth_service = Arc::new(AuthService::new(config));
    let notifier = Arc::new(BroadcastNotifier::new());

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        sqlx::migrate!("./migrations/postgres")
            .run(&pool)
            .await
            .expect("Failed to run Postgres migrations");

        AppState {
            config: config.clone(),
            slot_repo: Arc::new(PostgresSlotRepo::new(pool.clone())),
            host_repo: Arc::new(PostgresHostRepo::new(pool)),
            notifier,
            auth_service,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug);

        let pool = SqlitePoolOptions::new()
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to run SQLite migrations");

        AppState {
            config: config.clone(),
            slot_repo: Arc::new(SqliteSlotRepo::new(pool.clone())),
            host_repo: Arc::new(SqliteHostRepo::new(pool)),
            notifier,
            auth_service,
        }
    }
}
