pub mod config;
pub mod logging;
pub mod repository;

pub use config::{AppConfig, ContactInfo};
pub use logging::{init_logging, LoggingConfig};
pub use repository::{AccountRepositoryTrait, PostgresAccountRepository, RepositoryError};
