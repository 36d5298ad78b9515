//! Core business entities.

mod click;
mod custom_domain;
mod link;
mod session;
mod user;

pub use click::{Click, NewClick};
pub use custom_domain::{CustomDomain, DomainStatus, NewCustomDomain, VerificationUpdate};
pub use link::{LinkPatch, LinkStatus, NewLink, ReferralLink};
pub use session::Session;
pub use user::{NewUser, ProfilePatch, SubscriptionPlan, User};
