//! MongoDB connectivity for the products service.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::{RetryConfig, mongodb::{MongoConfig, connect_with_retry}};
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_with_retry(&config, RetryConfig::default()).await?;
//! let products = client.database(&config.database).collection::<Product>("products");
//! ```

pub mod common;
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};
