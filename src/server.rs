//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, GeoIP and WAF client setup, and the Axum
//! server lifecycle.

use crate::api::middleware::cors;
use crate::config::Config;
use crate::infrastructure::geoip::{GeoLocator, MaxMindLocator, NullLocator};
use crate::infrastructure::persistence::{PgLogRepository, PgSettingsRepository};
use crate::infrastructure::waf::{HttpWafClient, NullWafClient, WafControl};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Check the timeline timezone
/// - GeoIP locator (or NullLocator fallback)
/// - WAF control client (or NullWafClient when unconfigured)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - PostgreSQL does not know `TIMELINE_TIMEZONE`
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    check_timezone(&pool, &config.timeline_timezone).await?;

    let geo = open_geoip(&config.geoip_db_path);
    let waf = build_waf_client(&config);

    let pool_arc = Arc::new(pool);
    let state = AppState::new(
        Arc::new(PgLogRepository::new(pool_arc.clone())),
        Arc::new(PgSettingsRepository::new(pool_arc)),
        geo,
        waf,
        &config.timeline_timezone,
    );

    let app = app_router(state, cors::layer(&config.cors_allowed_origins));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Opens the PostgreSQL pool using the configured pool settings.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Verifies that PostgreSQL knows the timeline timezone.
///
/// Timeline buckets are computed with `AT TIME ZONE`, so an unknown zone
/// would make every timeline query fail.
///
/// # Errors
///
/// Returns an error if PostgreSQL rejects the zone name.
pub async fn check_timezone(pool: &PgPool, timezone: &str) -> Result<()> {
    sqlx::query("SELECT NOW() AT TIME ZONE $1")
        .bind(timezone)
        .execute(pool)
        .await
        .with_context(|| format!("TIMELINE_TIMEZONE '{timezone}' is not a known time zone"))?;

    Ok(())
}

/// Opens the GeoIP database, falling back to [`NullLocator`].
///
/// A missing database only disables the attack origin map; the rest of the
/// dashboard keeps working and `/health` reports `degraded`.
pub fn open_geoip(path: &str) -> Arc<dyn GeoLocator> {
    match MaxMindLocator::open(path) {
        Ok(locator) => {
            tracing::info!(path, "GeoIP enabled");
            Arc::new(locator)
        }
        Err(e) => {
            tracing::warn!("Failed to open GeoIP database: {}. Using NullLocator.", e);
            Arc::new(NullLocator::new())
        }
    }
}

/// Builds the WAF control client, falling back to [`NullWafClient`].
pub fn build_waf_client(config: &Config) -> Arc<dyn WafControl> {
    let Some(base_url) = &config.waf_api_url else {
        tracing::info!("WAF forwarding disabled (WAF_API_URL not set)");
        return Arc::new(NullWafClient::new());
    };

    match HttpWafClient::new(base_url, Duration::from_secs(config.waf_api_timeout)) {
        Ok(client) => {
            tracing::info!(url = %client.prevention_url(), "WAF forwarding enabled");
            Arc::new(client)
        }
        Err(e) => {
            tracing::warn!("Invalid WAF client configuration: {}. Using NullWafClient.", e);
            Arc::new(NullWafClient::new())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
