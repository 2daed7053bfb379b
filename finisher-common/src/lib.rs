//! # Finisher Common Library
//!
//! Shared code for The Finisher backend including:
//! - Error taxonomy
//! - Generation request parameters and validation
//! - Subscription plan catalog and entitlement queries
//! - Configuration loading

pub mod config;
pub mod error;
pub mod params;
pub mod plans;

pub use error::{Error, Result};
