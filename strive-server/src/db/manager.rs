//! Connection lifecycle
//!
//! `Uninitialized → Connected → Closed`. There is no way back from `Closed`;
//! a fresh manager is required.
//!
//! Handlers only ever read the shared handle. `connect` and `close` are
//! called once each, at process start and stop.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{DbError, StatsStore};
use crate::config::Settings;

/// Backend-specific client construction.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Handle: StatsStore;

    /// Build a client for `settings.mongodb_url` and select
    /// `settings.database_name`.
    async fn open(&self, settings: &Settings) -> Result<Self::Handle, DbError>;

    /// Administrative no-op round trip.
    async fn ping(&self, handle: &Self::Handle) -> Result<(), DbError>;

    /// Release client resources.
    async fn shutdown(&self, handle: &Self::Handle);
}

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Uninitialized,
    Connected,
    Closed,
}

enum Slot<H> {
    Uninitialized,
    Connected(Arc<H>),
    Closed,
}

/// Owns the database client for the lifetime of the process.
pub struct ConnectionManager<C: Connector> {
    connector: C,
    settings: Settings,
    slot: RwLock<Slot<C::Handle>>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, settings: Settings) -> Self {
        Self {
            connector,
            settings,
            slot: RwLock::new(Slot::Uninitialized),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Open the client and verify it with a ping.
    ///
    /// On failure the half-built client is shut down and the manager stays
    /// `Uninitialized`. Calling this on a connected or closed manager is an
    /// error, never a silent reconnect.
    pub async fn connect(&self) -> Result<Arc<C::Handle>, DbError> {
        let mut slot = self.slot.write().await;
        match *slot {
            Slot::Uninitialized => {}
            Slot::Connected(_) => return Err(DbError::AlreadyConnected),
            Slot::Closed => return Err(DbError::Closed),
        }

        let handle = self
            .connector
            .open(&self.settings)
            .await
            .map_err(DbError::into_connection)?;
        if let Err(e) = self.connector.ping(&handle).await {
            warn!(error = %e, "ping failed, discarding client");
            self.connector.shutdown(&handle).await;
            return Err(e.into_connection());
        }

        let handle = Arc::new(handle);
        *slot = Slot::Connected(Arc::clone(&handle));

        info!(
            database = %self.settings.database_name,
            url = %self.settings.redacted_url(),
            "connected to MongoDB"
        );
        Ok(handle)
    }

    /// Shared handle for request handlers.
    pub async fn handle(&self) -> Result<Arc<C::Handle>, DbError> {
        match &*self.slot.read().await {
            Slot::Connected(handle) => Ok(Arc::clone(handle)),
            Slot::Uninitialized | Slot::Closed => Err(DbError::NotConnected),
        }
    }

    /// Release the client. Idempotent; never fails.
    pub async fn close(&self) {
        let mut slot = self.slot.write().await;
        if let Slot::Connected(handle) = std::mem::replace(&mut *slot, Slot::Closed) {
            self.connector.shutdown(&handle).await;
            info!("closed MongoDB connection");
        }
    }

    pub async fn state(&self) -> ConnectionState {
        match &*self.slot.read().await {
            Slot::Uninitialized => ConnectionState::Uninitialized,
            Slot::Connected(_) => ConnectionState::Connected,
            Slot::Closed => ConnectionState::Closed,
        }
    }
}
