// SQL Host Registry
// Stores host records in PostgreSQL or SQLite through sqlx

use crate::Result;
use crate::error::DeadlineError;
use crate::registry::{HostRecord, HostRegistry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Sqlite};
use std::str::FromStr;
use std::time::Duration;

const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS hostnames (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    hostname TEXT NOT NULL UNIQUE,
    timelimit TEXT NOT NULL,
    remaining_days BIGINT NOT NULL,
    notification_days BIGINT NOT NULL DEFAULT 45,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

const POSTGRES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS hostnames (
    id BIGSERIAL PRIMARY KEY,
    hostname TEXT NOT NULL UNIQUE,
    timelimit TEXT NOT NULL,
    remaining_days BIGINT NOT NULL,
    notification_days BIGINT NOT NULL DEFAULT 45,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)
"#;

const SELECT_COLUMNS: &str =
    "id, hostname, timelimit, remaining_days, notification_days, created_at, updated_at";

/// Database pool enum supporting both PostgreSQL and SQLite
#[derive(Clone)]
pub enum DatabasePool {
    Postgres(Pool<Postgres>),
    Sqlite(Pool<Sqlite>),
}

impl DatabasePool {
    /// Open a pool for `url`, choosing the backend from its scheme
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(Duration::from_secs(30))
                .connect(url)
                .await
                .map_err(|e| {
                    DeadlineError::RegistryRead(format!("PostgreSQL connection failed: {}", e))
                })?;

            return Ok(DatabasePool::Postgres(pool));
        }

        if url.starts_with("sqlite:") {
            let connect_options = sqlx::sqlite::SqliteConnectOptions::from_str(url)
                .map_err(|e| DeadlineError::Configuration {
                    message: format!("Failed to parse SQLite connection string: {}", e),
                })?
                .create_if_missing(true);

            let pool = sqlx::sqlite::SqlitePoolOptions::new()
                .max_connections(1) // SQLite is single-writer
                .acquire_timeout(Duration::from_secs(30))
                .connect_with(connect_options)
                .await
                .map_err(|e| {
                    DeadlineError::RegistryRead(format!("SQLite connection failed: {}", e))
                })?;

            return Ok(DatabasePool::Sqlite(pool));
        }

        crate::config_bail!("Unsupported database url: {}", url)
    }

    /// Create the hostnames table if needed
    pub async fn ensure_schema(&self) -> Result<()> {
        let result = match self {
            DatabasePool::Postgres(pool) => sqlx::query(POSTGRES_SCHEMA)
                .execute(pool)
                .await
                .map(|_| ()),
            DatabasePool::Sqlite(pool) => sqlx::query(SQLITE_SCHEMA)
                .execute(pool)
                .await
                .map(|_| ()),
        };

        result.map_err(|e| DeadlineError::RegistryWrite(format!("Schema creation failed: {}", e)))?;
        Ok(())
    }

    /// Close the connection pool
    pub async fn close(&self) {
        match self {
            DatabasePool::Postgres(pool) => pool.close().await,
            DatabasePool::Sqlite(pool) => pool.close().await,
        }
    }
}

/// Row shape of the hostnames table
#[derive(Debug, sqlx::FromRow)]
struct HostRow {
    id: i64,
    hostname: String,
    timelimit: String,
    remaining_days: i64,
    notification_days: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HostRow> for HostRecord {
    fn from(row: HostRow) -> Self {
        HostRecord {
            id: Some(row.id),
            hostname: row.hostname,
            expiry_display: row.timelimit,
            remaining_days: row.remaining_days,
            notification_threshold: row.notification_days,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

fn read_error(context: &str, e: sqlx::Error) -> DeadlineError {
    DeadlineError::RegistryRead(format!("{}: {}", context, e))
}

fn write_error(hostname: &str, e: sqlx::Error) -> DeadlineError {
    let unique_violation = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if unique_violation {
        DeadlineError::HostAlreadyRegistered {
            hostname: hostname.to_string(),
        }
    } else {
        DeadlineError::RegistryWrite(format!("Failed to write {}: {}", hostname, e))
    }
}

/// Host registry backed by a SQL database
pub struct SqlRegistry {
    pool: DatabasePool,
}

impl SqlRegistry {
    /// Connect and make sure the schema exists
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = DatabasePool::connect(url, max_connections).await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: DatabasePool) -> Result<Self> {
        pool.ensure_schema().await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl HostRegistry for SqlRegistry {
    async fn list_hostnames(&self) -> Result<Vec<String>> {
        let query = "SELECT hostname FROM hostnames ORDER BY id";

        let hostnames: Vec<String> = match &self.pool {
            DatabasePool::Postgres(pool) => sqlx::query_scalar(query).fetch_all(pool).await,
            DatabasePool::Sqlite(pool) => sqlx::query_scalar(query).fetch_all(pool).await,
        }
        .map_err(|e| read_error("Failed to list hostnames", e))?;

        Ok(hostnames)
    }

    async fn list(&self) -> Result<Vec<HostRecord>> {
        let query = format!("SELECT {} FROM hostnames ORDER BY id", SELECT_COLUMNS);

        let rows: Vec<HostRow> = match &self.pool {
            DatabasePool::Postgres(pool) => sqlx::query_as(&query).fetch_all(pool).await,
            DatabasePool::Sqlite(pool) => sqlx::query_as(&query).fetch_all(pool).await,
        }
        .map_err(|e| read_error("Failed to list hosts", e))?;

        Ok(rows.into_iter().map(HostRecord::from).collect())
    }

    async fn get(&self, hostname: &str) -> Result<HostRecord> {
        let row: Option<HostRow> = match &self.pool {
            DatabasePool::Postgres(pool) => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM hostnames WHERE hostname = $1",
                    SELECT_COLUMNS
                ))
                .bind(hostname)
                .fetch_optional(pool)
                .await
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM hostnames WHERE hostname = ?",
                    SELECT_COLUMNS
                ))
                .bind(hostname)
                .fetch_optional(pool)
                .await
            }
        }
        .map_err(|e| read_error("Failed to load host", e))?;

        row.map(HostRecord::from)
            .ok_or_else(|| DeadlineError::HostNotFound {
                hostname: hostname.to_string(),
            })
    }

    async fn insert(&self, record: &HostRecord) -> Result<HostRecord> {
        let now = Utc::now();

        match &self.pool {
            DatabasePool::Postgres(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO hostnames (hostname, timelimit, remaining_days, notification_days, created_at, updated_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(&record.hostname)
                .bind(&record.expiry_display)
                .bind(record.remaining_days)
                .bind(record.notification_threshold)
                .bind(now)
                .bind(now)
                .execute(pool)
                .await
                .map(|_| ())
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO hostnames (hostname, timelimit, remaining_days, notification_days, created_at, updated_at)
                    VALUES (?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(&record.hostname)
                .bind(&record.expiry_display)
                .bind(record.remaining_days)
                .bind(record.notification_threshold)
                .bind(now)
                .bind(now)
                .execute(pool)
                .await
                .map(|_| ())
            }
        }
        .map_err(|e| write_error(&record.hostname, e))?;

        self.get(&record.hostname).await
    }

    async fn update_expiry(
        &self,
        hostname: &str,
        display_date: &str,
        remaining_days: i64,
    ) -> Result<()> {
        let now = Utc::now();

        let result = match &self.pool {
            DatabasePool::Postgres(pool) => {
                sqlx::query(
                    "UPDATE hostnames SET timelimit = $1, remaining_days = $2, updated_at = $3 WHERE hostname = $4",
                )
                .bind(display_date)
                .bind(remaining_days)
                .bind(now)
                .bind(hostname)
                .execute(pool)
                .await
                .map(|r| r.rows_affected())
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query(
                    "UPDATE hostnames SET timelimit = ?, remaining_days = ?, updated_at = ? WHERE hostname = ?",
                )
                .bind(display_date)
                .bind(remaining_days)
                .bind(now)
                .bind(hostname)
                .execute(pool)
                .await
                .map(|r| r.rows_affected())
            }
        };

        let rows_affected = result.map_err(|e| write_error(hostname, e))?;
        if rows_affected == 0 {
            return Err(DeadlineError::HostNotFound {
                hostname: hostname.to_string(),
            });
        }

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        match self.pool {
            DatabasePool::Postgres(_) => "postgres",
            DatabasePool::Sqlite(_) => "sqlite",
        }
    }
}
