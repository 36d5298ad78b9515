//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{
    AnalyticsService, AuthService, BillingService, DomainService, LinkService, ProfileService,
    TrackingService,
};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::dns::DnsResolver;
use crate::infrastructure::payments::PaymentGateway;
use crate::infrastructure::persistence::{
    PgClickRepository, PgDomainRepository, PgLinkRepository, PgSessionRepository, PgUserRepository,
};

pub type Analytics = AnalyticsService<PgUserRepository, PgClickRepository, PgLinkRepository>;
pub type Links = LinkService<PgLinkRepository>;
pub type Domains = DomainService<PgDomainRepository>;
pub type Profiles = ProfileService<PgUserRepository, PgLinkRepository>;
pub type Billing = BillingService<PgUserRepository>;
pub type Auth = AuthService<PgSessionRepository>;
pub type Tracking = TrackingService<PgClickRepository>;

/// Shared state for all request handlers.
///
/// Services are constructed once at startup and cloned per request via `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub analytics_service: Arc<Analytics>,
    pub link_service: Arc<Links>,
    pub domain_service: Arc<Domains>,
    pub profile_service: Arc<Profiles>,
    pub billing_service: Arc<Billing>,
    pub auth_service: Arc<Auth>,
    pub tracking_service: Arc<Tracking>,
    pub cache: Arc<dyn CacheService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
}

impl AppState {
    /// Wires repositories and services over a connection pool.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: Arc<PgPool>,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
        resolver: Arc<dyn DnsResolver>,
        gateways: Vec<Arc<dyn PaymentGateway>>,
        signing_secret: String,
        hosting_domain: String,
    ) -> Self {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let links = Arc::new(PgLinkRepository::new(pool.clone()));
        let clicks = Arc::new(PgClickRepository::new(pool.clone()));
        let domains = Arc::new(PgDomainRepository::new(pool.clone()));
        let sessions = Arc::new(PgSessionRepository::new(pool.clone()));

        Self {
            pool,
            analytics_service: Arc::new(AnalyticsService::new(
                users.clone(),
                clicks.clone(),
                links.clone(),
            )),
            link_service: Arc::new(LinkService::new(links.clone())),
            domain_service: Arc::new(DomainService::new(domains, resolver, hosting_domain)),
            profile_service: Arc::new(ProfileService::new(users.clone(), links)),
            billing_service: Arc::new(BillingService::new(users, gateways)),
            auth_service: Arc::new(AuthService::new(sessions, signing_secret)),
            tracking_service: Arc::new(TrackingService::new(clicks)),
            cache,
            click_sender,
        }
    }
}
