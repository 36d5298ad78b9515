//! REST API handlers.

mod analytics;
mod billing;
mod domains;
mod health;
mod links;
mod profile;
mod redirect;
mod tracking;

pub use analytics::{
    devices_handler, geography_handler, link_performance_handler, time_series_handler,
};
pub use billing::checkout_handler;
pub use domains::{
    create_domain_handler, delete_domain_handler, domain_list_handler, verify_domain_handler,
};
pub use health::health_handler;
pub use links::{
    archive_link_handler, create_link_handler, link_list_handler, update_link_handler,
};
pub use profile::{get_profile_handler, public_profile_handler, update_profile_handler};
pub use redirect::redirect_handler;
pub use tracking::conversion_handler;
