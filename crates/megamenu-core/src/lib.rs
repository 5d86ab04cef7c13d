//! # Mega Menu Core
//! 
//! Menu tree domain, the pure tree engine, validation of untrusted input,
//! repository traits (ports), and the services that own application state.

pub mod domain;
pub mod tree;
pub mod validation;
pub mod repositories;
pub mod services;
pub mod state;
pub mod seed;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
