//! In-memory connector for tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::{Connector, DbError, StatsStore};
use crate::config::Settings;
use crate::models::StoredStats;

pub fn test_settings() -> Settings {
    Settings {
        environment: "test".into(),
        debug: true,
        mongodb_url: "mongodb://localhost:27017".into(),
        database_name: "strive_test".into(),
    }
}

/// Documents shared between the connector, its handles and the test body.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<Vec<StoredStats>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn docs(&self) -> Vec<StoredStats> {
        self.docs.lock().unwrap().clone()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct MemoryHandle {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl StatsStore for MemoryHandle {
    async fn insert_stats(&self, doc: &StoredStats) -> Result<ObjectId, DbError> {
        if self.store.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::Write("connection reset by peer".into()));
        }
        let id = ObjectId::new();
        let mut doc = doc.clone();
        doc.id = Some(id);
        self.store.docs.lock().unwrap().push(doc);
        Ok(id)
    }

    async fn recent_stats(&self, limit: u32) -> Result<Vec<StoredStats>, DbError> {
        let mut docs = self.store.docs();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        docs.truncate(limit as usize);
        Ok(docs)
    }
}

#[derive(Default)]
pub struct MemoryConnector {
    store: Arc<MemoryStore>,
    unreachable: bool,
    ping_times_out: bool,
    shutdowns: Arc<AtomicUsize>,
}

impl MemoryConnector {
    /// Connector whose ping always fails.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Connector whose ping never answers within its deadline.
    pub fn timing_out() -> Self {
        Self {
            ping_times_out: true,
            ..Self::default()
        }
    }

    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.store)
    }

    pub fn shutdown_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.shutdowns)
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    type Handle = MemoryHandle;

    async fn open(&self, _settings: &Settings) -> Result<MemoryHandle, DbError> {
        Ok(MemoryHandle {
            store: Arc::clone(&self.store),
        })
    }

    async fn ping(&self, _handle: &MemoryHandle) -> Result<(), DbError> {
        if self.unreachable {
            return Err(DbError::Connection("server selection timeout".into()));
        }
        if self.ping_times_out {
            return Err(DbError::Timeout {
                operation: "ping",
                seconds: 10,
            });
        }
        Ok(())
    }

    async fn shutdown(&self, _handle: &MemoryHandle) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}
