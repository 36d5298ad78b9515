//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching short-code to target-URL mappings on the redirect path.
///
/// Implementations must be thread-safe and handle errors gracefully without
/// disrupting the application (cache failures should degrade to database lookups).
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the target URL for a short code from cache.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get_target(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a target URL in cache with optional TTL.
    ///
    /// Implementations should log errors and return `Ok(())` rather than
    /// disrupting the request flow.
    async fn set_target(
        &self,
        short_code: &str,
        target_url: &str,
        ttl_seconds: Option<usize>,
    ) -> CacheResult<()>;

    /// Removes a cached mapping. Used when a link is updated or archived.
    async fn invalidate(&self, short_code: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health check endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
