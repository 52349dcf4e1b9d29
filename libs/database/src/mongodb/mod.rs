//! MongoDB client construction and liveness probing

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{connect, connect_with_retry};
pub use health::ping;

pub use mongodb::{Client, Collection, Database};
