//! # Mega Menu Shared
//! 
//! Shared configuration, telemetry, and id helpers for the mega menu crates.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
