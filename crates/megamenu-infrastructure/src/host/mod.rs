//! Host adapters

pub mod browser;
pub mod configured;

pub use browser::{Launcher, SystemBrowser};
pub use configured::ConfiguredHost;
