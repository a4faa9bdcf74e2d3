//! HTTP request handlers.

pub mod campaign_handler;
pub mod request_handler;
pub mod user_handler;
pub mod volunteer_handler;

pub use campaign_handler::campaign_routes;
pub use request_handler::{owner_request_routes, request_routes};
pub use user_handler::user_routes;
pub use volunteer_handler::volunteer_routes;
