//! # Service Container
//!
//! Holds the shared bus, the correlation registry, the query bridge and every
//! module's store and service.
//!
//! - Modules never hold each other's services, only query façades
//! - Stores are behind their outbound port traits

pub mod config;
pub mod services;

pub use config::{BusConfig, ConfigError, RuntimeConfig};
pub use services::ServiceContainer;
