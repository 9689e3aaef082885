//! SQLite-backed device store for durable guest data.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Row, SqlitePool};
use tokio::runtime::Runtime;
use tokio::sync::Mutex;

use crate::{DeviceStore, StoreError, StoreKey};

/// SQLite-backed device store (lazy initialization).
///
/// The synchronous [`DeviceStore`] surface drives the async pool through a
/// one-off runtime per call, so this type must not be used from inside an
/// async context; use [`crate::MemoryStore`] there.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: Arc<Mutex<Option<SqlitePool>>>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Store under the OS data directory (`{app_data_dir}/dzcart/device.db`).
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::at_path(default_db_path()?))
    }

    /// Store at an explicit path (tests, portable installs).
    pub fn at_path(db_path: PathBuf) -> Self {
        Self {
            pool: Arc::new(Mutex::new(None)),
            db_path,
        }
    }

    async fn ensure_initialized(&self) -> anyhow::Result<()> {
        let mut pool_guard = self.pool.lock().await;
        if pool_guard.is_some() {
            return Ok(());
        }

        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create store directory at {:?}", parent))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&self.db_path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("failed to open device store at {:?}", self.db_path))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS device_records (
                key       TEXT NOT NULL PRIMARY KEY,
                data      TEXT NOT NULL,
                stored_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create device_records table")?;

        *pool_guard = Some(pool);
        Ok(())
    }

    async fn get_pool(&self) -> anyhow::Result<SqlitePool> {
        self.ensure_initialized().await?;
        let pool_guard = self.pool.lock().await;
        Ok(pool_guard
            .as_ref()
            .context("device store pool missing after initialization")?
            .clone())
    }

    fn run<T, Fut>(&self, op: impl FnOnce(SqlitePool) -> Fut) -> Result<T, StoreError>
    where
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let rt = Runtime::new()
            .map_err(|e| StoreError::Backend(format!("failed to create runtime: {e}")))?;

        rt.block_on(async {
            let pool = self
                .get_pool()
                .await
                .map_err(|e| StoreError::Backend(format!("{e:#}")))?;
            op(pool)
                .await
                .map_err(|e| StoreError::Backend(format!("{e:#}")))
        })
    }
}

impl DeviceStore for SqliteStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        self.run(|pool| async move {
            let row = sqlx::query(
                r#"
                SELECT data
                FROM device_records
                WHERE key = ?1
                "#,
            )
            .bind(key.as_str())
            .fetch_optional(&pool)
            .await
            .context("failed to fetch device record")?;

            match row {
                Some(row) => {
                    let data: String = row.try_get("data")?;
                    Ok(Some(data))
                }
                None => Ok(None),
            }
        })
    }

    fn put(&self, key: StoreKey, value: String) -> Result<(), StoreError> {
        self.run(|pool| async move {
            let now = Utc::now().to_rfc3339();

            sqlx::query(
                r#"
                INSERT INTO device_records (key, data, stored_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key)
                DO UPDATE SET
                    data = excluded.data,
                    stored_at = excluded.stored_at
                "#,
            )
            .bind(key.as_str())
            .bind(&value)
            .bind(&now)
            .execute(&pool)
            .await
            .context("failed to upsert device record")?;

            Ok(())
        })
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        self.run(|pool| async move {
            sqlx::query(
                r#"
                DELETE FROM device_records
                WHERE key = ?1
                "#,
            )
            .bind(key.as_str())
            .execute(&pool)
            .await
            .context("failed to delete device record")?;

            Ok(())
        })
    }
}

/// Resolve the default database path: `{app_data_dir}/dzcart/device.db`.
fn default_db_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory")?;

    let mut path = base;
    path.push("dzcart");
    path.push("device.db");
    Ok(path)
}
