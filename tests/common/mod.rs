#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use reflinks::domain::click_event::ClickEvent;
use reflinks::infrastructure::cache::NullCache;
use reflinks::infrastructure::dns::{DnsError, DnsResolver};
use reflinks::state::AppState;

pub const TEST_HOSTING_DOMAIN: &str = "edge.reflinks.test";

/// DNS resolver returning fixed records, for driving verification outcomes.
pub struct StubDnsResolver {
    pub cname: Vec<String>,
    pub txt: Vec<String>,
}

impl StubDnsResolver {
    pub fn empty() -> Self {
        Self {
            cname: vec![],
            txt: vec![],
        }
    }

    pub fn valid_for(domain_id: i64) -> Self {
        Self {
            cname: vec![TEST_HOSTING_DOMAIN.to_string()],
            txt: vec![format!("reflinks-verify={domain_id}")],
        }
    }
}

#[async_trait]
impl DnsResolver for StubDnsResolver {
    async fn cname_records(&self, _domain: &str) -> Result<Vec<String>, DnsError> {
        Ok(self.cname.clone())
    }

    async fn txt_records(&self, _name: &str) -> Result<Vec<String>, DnsError> {
        Ok(self.txt.clone())
    }
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    create_test_state_with_dns(pool, Arc::new(StubDnsResolver::empty()))
}

pub fn create_test_state_with_dns(
    pool: PgPool,
    resolver: Arc<dyn DnsResolver>,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        Arc::new(pool),
        Arc::new(NullCache::new()),
        tx,
        resolver,
        vec![],
        "test-signing-secret".to_string(),
        TEST_HOSTING_DOMAIN.to_string(),
    );

    (state, rx)
}

pub async fn create_test_user(pool: &PgPool, email: &str, username: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (email, username) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_link(pool: &PgPool, user_id: i64, name: &str, code: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (user_id, name, short_code, target_url) \
         VALUES ($1, $2, $3, 'https://example.com') RETURNING id",
    )
    .bind(user_id)
    .bind(name)
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_archived_link(pool: &PgPool, user_id: i64, name: &str, code: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (user_id, name, short_code, target_url, status) \
         VALUES ($1, $2, $3, 'https://example.com', 'archived') RETURNING id",
    )
    .bind(user_id)
    .bind(name)
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_click(
    pool: &PgPool,
    link_id: i64,
    device: Option<&str>,
    country: Option<&str>,
    converted: bool,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO clicks (link_id, device_type, country, converted) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(link_id)
    .bind(device)
    .bind(country)
    .bind(converted)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_click_at(
    pool: &PgPool,
    link_id: i64,
    clicked_at: DateTime<Utc>,
    converted: bool,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO clicks (link_id, clicked_at, converted) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(link_id)
    .bind(clicked_at)
    .bind(converted)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_domain(pool: &PgPool, user_id: i64, domain: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO custom_domains (user_id, domain) VALUES ($1, $2) RETURNING id",
    )
    .bind(user_id)
    .bind(domain)
    .fetch_one(pool)
    .await
    .unwrap()
}
