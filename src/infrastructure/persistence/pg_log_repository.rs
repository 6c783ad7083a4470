//! PostgreSQL implementation of the WAF log repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::domain::entities::{
    ActivityPoint, AnomalousIp, IpAttackSummary, TimelineBucket, WafLog,
};
use crate::domain::repositories::LogRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct WafLogRow {
    id: i64,
    logged_at: DateTime<Utc>,
    ip: String,
    method: String,
    path: String,
    query: Option<String>,
    user_agent: Option<String>,
    injection_detected: bool,
    matched_rules: Vec<String>,
}

impl From<WafLogRow> for WafLog {
    fn from(r: WafLogRow) -> Self {
        Self {
            id: r.id,
            logged_at: r.logged_at,
            ip: r.ip,
            method: r.method,
            path: r.path,
            query: r.query,
            user_agent: r.user_agent,
            injection_detected: r.injection_detected,
            matched_rules: r.matched_rules,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    logged_at: DateTime<Utc>,
    injection_detected: bool,
}

#[derive(sqlx::FromRow)]
struct TimelineRow {
    bucket: String,
    total_requests: i64,
    attacks: i64,
}

#[derive(sqlx::FromRow)]
struct AnomalousIpRow {
    ip: String,
    total_requests: i64,
    anomalous_requests: i64,
    last_detected: DateTime<Utc>,
    threat_level: f64,
    matched_rules: Vec<String>,
}

#[derive(sqlx::FromRow)]
struct IpAttackRow {
    ip: String,
    attack_count: i64,
    last_attack: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct RuleHitRow {
    ip: String,
    rule: String,
    hits: i64,
}

/// PostgreSQL repository over the `waf_logs` table.
///
/// Aggregations run inside the database; only summarized rows cross the wire.
pub struct PgLogRepository {
    pool: Arc<PgPool>,
}

impl PgLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogRepository for PgLogRepository {
    async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM waf_logs")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_attacks(&self) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM waf_logs WHERE injection_detected")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn latest_activity(&self, limit: i64) -> Result<Vec<ActivityPoint>, AppError> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT logged_at, injection_detected
            FROM waf_logs
            ORDER BY logged_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ActivityPoint {
                logged_at: r.logged_at,
                injection_detected: r.injection_detected,
            })
            .collect())
    }

    async fn recent_logs(
        &self,
        since: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<WafLog>, AppError> {
        let rows = sqlx::query_as::<_, WafLogRow>(
            r#"
            SELECT id, logged_at, ip, method, path, query, user_agent,
                   injection_detected, matched_rules
            FROM waf_logs
            WHERE ($1::timestamptz IS NULL OR logged_at > $1)
            ORDER BY logged_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(since)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(WafLog::from).collect())
    }

    async fn hourly_timeline(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        timezone: &str,
    ) -> Result<Vec<TimelineBucket>, AppError> {
        let rows = sqlx::query_as::<_, TimelineRow>(
            r#"
            SELECT
                to_char(logged_at AT TIME ZONE $3, 'YYYY-MM-DD HH24:00') AS bucket,
                COUNT(*) AS total_requests,
                COUNT(*) FILTER (WHERE injection_detected) AS attacks
            FROM waf_logs
            WHERE logged_at >= $1 AND logged_at <= $2
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(timezone)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| TimelineBucket {
                bucket: r.bucket,
                total_requests: r.total_requests,
                attacks: r.attacks,
            })
            .collect())
    }

    async fn anomalous_ips(&self, limit: i64) -> Result<Vec<AnomalousIp>, AppError> {
        let rows = sqlx::query_as::<_, AnomalousIpRow>(
            r#"
            WITH per_ip AS (
                SELECT
                    ip,
                    COUNT(*) AS total_requests,
                    COUNT(*) FILTER (WHERE injection_detected) AS anomalous_requests,
                    MAX(logged_at) AS last_detected
                FROM waf_logs
                GROUP BY ip
            )
            SELECT
                p.ip,
                p.total_requests,
                p.anomalous_requests,
                p.last_detected,
                (p.anomalous_requests::float8 / p.total_requests::float8) * 100.0 AS threat_level,
                ARRAY(
                    SELECT DISTINCT r
                    FROM waf_logs w
                    CROSS JOIN LATERAL unnest(w.matched_rules) AS r
                    WHERE w.ip = p.ip AND w.injection_detected
                    ORDER BY r
                ) AS matched_rules
            FROM per_ip p
            WHERE p.anomalous_requests > 0
            ORDER BY threat_level DESC, p.anomalous_requests DESC, p.ip
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AnomalousIp {
                ip: r.ip,
                total_requests: r.total_requests,
                anomalous_requests: r.anomalous_requests,
                last_detected: r.last_detected,
                threat_level: r.threat_level,
                matched_rules: r.matched_rules,
            })
            .collect())
    }

    async fn attacks_by_ip(&self, since: DateTime<Utc>) -> Result<Vec<IpAttackSummary>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Both reads must see the same snapshot while the WAF keeps inserting.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let ip_rows = sqlx::query_as::<_, IpAttackRow>(
            r#"
            SELECT ip, COUNT(*) AS attack_count, MAX(logged_at) AS last_attack
            FROM waf_logs
            WHERE injection_detected AND logged_at >= $1
            GROUP BY ip
            ORDER BY ip
            "#,
        )
        .bind(since)
        .fetch_all(&mut *tx)
        .await?;

        let rule_rows = sqlx::query_as::<_, RuleHitRow>(
            r#"
            SELECT w.ip, rule, COUNT(*) AS hits
            FROM waf_logs w
            CROSS JOIN LATERAL unnest(w.matched_rules) AS rule
            WHERE w.injection_detected AND w.logged_at >= $1
            GROUP BY w.ip, rule
            "#,
        )
        .bind(since)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut rules_by_ip: HashMap<String, BTreeMap<String, i64>> = HashMap::new();
        for row in rule_rows {
            rules_by_ip
                .entry(row.ip)
                .or_default()
                .insert(row.rule, row.hits);
        }

        Ok(ip_rows
            .into_iter()
            .map(|r| {
                let rule_counts = rules_by_ip.remove(&r.ip).unwrap_or_default();
                IpAttackSummary {
                    ip: r.ip,
                    attack_count: r.attack_count,
                    last_attack: r.last_attack,
                    rule_counts,
                }
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
