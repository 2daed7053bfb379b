//! HTTP API handlers for finisher-api

pub mod checkout;
pub mod health;
pub mod lyrics;
pub mod plans;

pub use checkout::create_checkout_session;
pub use health::health_routes;
pub use lyrics::generate_lyrics;
pub use plans::list_plans;
