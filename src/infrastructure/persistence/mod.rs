//! PostgreSQL repository implementations.

mod pg_click_repository;
mod pg_domain_repository;
mod pg_link_repository;
mod pg_session_repository;
mod pg_user_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_domain_repository::PgDomainRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;
