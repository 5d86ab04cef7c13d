//! # Mega Menu Infrastructure
//! 
//! Storage and host implementations (adapters).

pub mod storage;
pub mod host;

pub use storage::{FileStore, MemoryStore};
pub use host::{ConfiguredHost, Launcher, SystemBrowser};
