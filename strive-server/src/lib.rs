//! strive-server: HTTP API for Strive workout stats
//!
//! Startup path: resolve [`Settings`], connect a [`ConnectionManager`], serve
//! the router, close the manager on shutdown.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, Settings};
pub use db::{ConnectionManager, DbError, MongoConnector};
