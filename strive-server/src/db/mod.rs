//! Database layer - connection lifecycle and data access
//!
//! - One client per process, owned by `ConnectionManager`
//! - Handlers borrow the shared handle, never close or replace it
//! - Store writes are single-document inserts; no handler-level locking

pub mod error;
pub mod manager;
pub mod mongo;
pub mod store;

#[cfg(test)]
pub(crate) mod memory;

pub use error::DbError;
pub use manager::{ConnectionManager, ConnectionState, Connector};
pub use mongo::{ConnectOptions, MongoConnector, MongoHandle};
pub use store::{StatsStore, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT};
