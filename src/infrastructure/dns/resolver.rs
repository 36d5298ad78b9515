//! DNS resolution for custom-domain verification.

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::rr::{RData, RecordType};
use std::time::Duration;
use tokio_retry::{Retry, strategy::ExponentialBackoff};

/// Errors that can occur during DNS lookups.
///
/// The verification flow treats any lookup error as "check not passed" for
/// that check, never as a request failure.
#[derive(Debug, thiserror::Error)]
pub enum DnsError {
    #[error("DNS lookup failed: {0}")]
    Lookup(String),
}

/// Trait for the DNS lookups the verification flow needs.
///
/// An absent record set is an empty `Ok` vector; `Err` is reserved for
/// resolution failures (timeout, network, SERVFAIL). The two lookups fail
/// independently.
///
/// # Implementations
///
/// - [`HickoryDnsResolver`] - system-configured recursive resolution
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolves CNAME targets for a domain, trailing dots trimmed.
    async fn cname_records(&self, domain: &str) -> Result<Vec<String>, DnsError>;

    /// Resolves TXT record strings at a name.
    async fn txt_records(&self, name: &str) -> Result<Vec<String>, DnsError>;
}

/// DNS resolver backed by hickory-resolver.
///
/// Every lookup has a bounded per-request timeout and is retried with
/// exponential backoff on transient failures, so a slow or flaky upstream
/// resolver cannot stall a verification request indefinitely.
pub struct HickoryDnsResolver {
    resolver: TokioAsyncResolver,
    attempts: usize,
}

/// Initial backoff delay between lookup attempts.
const BACKOFF_BASE_MS: u64 = 200;

/// Upper bound on the backoff delay.
const BACKOFF_MAX: Duration = Duration::from_secs(2);

impl HickoryDnsResolver {
    /// Creates a resolver using the default upstream configuration.
    ///
    /// # Arguments
    ///
    /// - `timeout` - per-request timeout for a single lookup attempt
    /// - `attempts` - total attempts per lookup, including the first
    pub fn new(timeout: Duration, attempts: usize) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        // Internal protocol-level retries are disabled; retrying is handled
        // here with backoff so attempts are observable and bounded.
        opts.attempts = 1;

        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), opts),
            attempts: attempts.max(1),
        }
    }

    fn backoff(&self) -> impl Iterator<Item = Duration> {
        ExponentialBackoff::from_millis(BACKOFF_BASE_MS)
            .max_delay(BACKOFF_MAX)
            .take(self.attempts - 1)
    }
}

#[async_trait]
impl DnsResolver for HickoryDnsResolver {
    async fn cname_records(&self, domain: &str) -> Result<Vec<String>, DnsError> {
        Retry::spawn(self.backoff(), || async {
            match self.resolver.lookup(domain, RecordType::CNAME).await {
                Ok(lookup) => Ok(lookup
                    .iter()
                    .filter_map(|rdata| match rdata {
                        RData::CNAME(target) => {
                            Some(target.to_string().trim_end_matches('.').to_string())
                        }
                        _ => None,
                    })
                    .collect()),
                Err(e) => match e.kind() {
                    ResolveErrorKind::NoRecordsFound { .. } => Ok(Vec::new()),
                    _ => Err(DnsError::Lookup(e.to_string())),
                },
            }
        })
        .await
    }

    async fn txt_records(&self, name: &str) -> Result<Vec<String>, DnsError> {
        Retry::spawn(self.backoff(), || async {
            match self.resolver.txt_lookup(name).await {
                Ok(lookup) => Ok(lookup
                    .iter()
                    .map(|txt| {
                        txt.txt_data()
                            .iter()
                            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
                            .collect::<String>()
                    })
                    .collect()),
                Err(e) => match e.kind() {
                    ResolveErrorKind::NoRecordsFound { .. } => Ok(Vec::new()),
                    _ => Err(DnsError::Lookup(e.to_string())),
                },
            }
        })
        .await
    }
}
