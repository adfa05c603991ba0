//! MongoDB connection management
//!
//! Configuration, connecting (optionally with retry), and ping-based health checks.

mod config;
mod connector;
mod health;

#[cfg(feature = "config")]
pub use config::atlas_url;
pub use config::{DEFAULT_DATABASE, MongoConfig};
pub use connector::{connect_from_config, connect_from_config_with_retry, ping};
pub use health::{HealthStatus, check_health_detailed};
