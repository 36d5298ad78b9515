//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, worker spawning, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::dns::HickoryDnsResolver;
use crate::infrastructure::payments::{
    CoinbaseGateway, PaymentGateway, PaypalGateway, StripeGateway,
};
use crate::infrastructure::persistence::PgClickRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Redis cache (or NullCache fallback)
/// - DNS resolver for domain verification
/// - Payment gateways for each configured provider
/// - Background click worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let resolver = Arc::new(HickoryDnsResolver::new(
        Duration::from_secs(config.dns_timeout_seconds),
        config.dns_attempts,
    ));

    let http = reqwest::Client::new();
    let mut gateways: Vec<Arc<dyn PaymentGateway>> = Vec::new();
    if let Some(key) = &config.stripe_secret_key {
        gateways.push(Arc::new(StripeGateway::new(http.clone(), key.clone())));
    }
    if let Some(secret) = &config.paypal_client_secret {
        gateways.push(Arc::new(PaypalGateway::new(http.clone(), secret.clone())));
    }
    if let Some(key) = &config.coinbase_api_key {
        gateways.push(Arc::new(CoinbaseGateway::new(http, key.clone())));
    }
    tracing::info!("Payment gateways configured: {}", gateways.len());

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let pool = Arc::new(pool);
    let click_repository = Arc::new(PgClickRepository::new(pool.clone()));
    tokio::spawn(run_click_worker(click_rx, click_repository));
    tracing::info!("Click worker started");

    let state = AppState::new(
        pool,
        cache,
        click_tx,
        resolver,
        gateways,
        config.token_signing_secret.clone(),
        config.hosting_domain.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
