mod common;

use sqlx::PgPool;
use std::sync::Arc;

use reflinks::domain::entities::{DomainStatus, NewCustomDomain, VerificationUpdate};
use reflinks::domain::repositories::DomainRepository;
use reflinks::infrastructure::persistence::PgDomainRepository;

#[sqlx::test]
async fn test_create_domain_starts_pending(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;

    let repo = PgDomainRepository::new(Arc::new(pool));

    let domain = repo
        .create(NewCustomDomain {
            user_id,
            domain: "go.customer.com".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(domain.domain, "go.customer.com");
    assert_eq!(domain.status, DomainStatus::Pending);
    assert!(!domain.verified);
    assert!(!domain.dns_verified);
    assert!(!domain.ssl_provisioned);
    assert!(domain.error_message.is_none());
}

#[sqlx::test]
async fn test_find_by_name(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    common::create_test_domain(&pool, user_id, "find-me.example.com").await;

    let repo = PgDomainRepository::new(Arc::new(pool));

    let found = repo.find_by_name("find-me.example.com").await.unwrap();
    assert!(found.is_some());

    let missing = repo.find_by_name("ghost.example.com").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_apply_verification_passed(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    let domain_id = common::create_test_domain(&pool, user_id, "go.customer.com").await;

    let repo = PgDomainRepository::new(Arc::new(pool));

    let domain = repo
        .apply_verification(domain_id, VerificationUpdate::passed())
        .await
        .unwrap();

    assert_eq!(domain.status, DomainStatus::Active);
    assert!(domain.verified);
    assert!(domain.dns_verified);
    assert!(domain.ssl_provisioned);
    assert!(domain.error_message.is_none());
}

#[sqlx::test]
async fn test_apply_verification_failed_then_passed(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    let domain_id = common::create_test_domain(&pool, user_id, "go.customer.com").await;

    let repo = PgDomainRepository::new(Arc::new(pool));

    let failed = repo
        .apply_verification(domain_id, VerificationUpdate::failed("CNAME record not found"))
        .await
        .unwrap();
    assert_eq!(failed.status, DomainStatus::Error);
    assert_eq!(failed.error_message.as_deref(), Some("CNAME record not found"));

    // Re-verification clears the error and activates.
    let passed = repo
        .apply_verification(domain_id, VerificationUpdate::passed())
        .await
        .unwrap();
    assert_eq!(passed.status, DomainStatus::Active);
    assert!(passed.error_message.is_none());
}

#[sqlx::test]
async fn test_apply_verification_unknown_domain(pool: PgPool) {
    let repo = PgDomainRepository::new(Arc::new(pool));

    let result = repo
        .apply_verification(9999, VerificationUpdate::passed())
        .await;

    assert!(matches!(
        result.unwrap_err(),
        reflinks::AppError::NotFound { .. }
    ));
}

#[sqlx::test]
async fn test_delete_domain(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "a@example.com", "alice").await;
    let domain_id = common::create_test_domain(&pool, user_id, "go.customer.com").await;

    let repo = PgDomainRepository::new(Arc::new(pool));

    repo.delete(domain_id).await.unwrap();

    assert!(repo.find_by_id(domain_id).await.unwrap().is_none());
    assert!(matches!(
        repo.delete(domain_id).await.unwrap_err(),
        reflinks::AppError::NotFound { .. }
    ));
}
