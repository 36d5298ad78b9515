//! Repository traits decoupling the application layer from storage.

mod click_repository;
mod domain_repository;
mod link_repository;
mod session_repository;
mod user_repository;

pub use click_repository::ClickRepository;
pub use domain_repository::DomainRepository;
pub use link_repository::LinkRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use domain_repository::MockDomainRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
