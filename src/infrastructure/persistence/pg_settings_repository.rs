//! PostgreSQL implementation of the settings repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{PREVENTION_MODE_KEY, PreventionSetting};
use crate::domain::repositories::SettingsRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct SettingRow {
    enabled: bool,
    updated_at: DateTime<Utc>,
}

/// PostgreSQL repository over the `waf_settings` key/flag table.
pub struct PgSettingsRepository {
    pool: Arc<PgPool>,
}

impl PgSettingsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn get_prevention_mode(&self) -> Result<Option<PreventionSetting>, AppError> {
        let row = sqlx::query_as::<_, SettingRow>(
            "SELECT enabled, updated_at FROM waf_settings WHERE key = $1",
        )
        .bind(PREVENTION_MODE_KEY)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| PreventionSetting::new(r.enabled, r.updated_at)))
    }

    async fn set_prevention_mode(&self, enabled: bool) -> Result<PreventionSetting, AppError> {
        let row = sqlx::query_as::<_, SettingRow>(
            r#"
            INSERT INTO waf_settings (key, enabled, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE
                SET enabled = EXCLUDED.enabled,
                    updated_at = NOW()
            RETURNING enabled, updated_at
            "#,
        )
        .bind(PREVENTION_MODE_KEY)
        .bind(enabled)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(PreventionSetting::new(row.enabled, row.updated_at))
    }
}
