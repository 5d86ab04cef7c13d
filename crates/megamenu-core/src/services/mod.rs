//! Application services

pub mod bootstrap;
pub mod event_bus;
pub mod host_service;
pub mod menu_service;
pub mod persistence;

pub use bootstrap::initialize_app;
pub use event_bus::{EventBus, MenuEvent, StateEvent};
pub use host_service::HostService;
pub use menu_service::MenuService;
pub use persistence::MenuPersistence;
