//! Repository traits (ports)

pub mod storage_repository;
pub mod host_repository;

pub use storage_repository::StorageRepository;
pub use host_repository::{HostRepository, ThemeChangeHandler};

#[cfg(test)]
pub use storage_repository::MockStorageRepository;
#[cfg(test)]
pub use host_repository::MockHostRepository;
