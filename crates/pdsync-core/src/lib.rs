pub mod app_config;
pub mod config;
pub mod listings;

#[cfg(test)]
mod config_test;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use listings::{
    ImportStatus, NewListing, ACTIVE_STATUS, MAXIMUM_SIZE, MINIMUM_SIZE, MINIMUM_TERM,
    TARGET_PRODUCT_NAME,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
