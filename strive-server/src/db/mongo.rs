//! MongoDB backend

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::debug;

use super::{Connector, DbError, StatsStore, MAX_RECENT_LIMIT};
use crate::config::Settings;
use crate::models::{StoredStats, STATS_COLLECTION};

const APP_NAME: &str = "strive-api";
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeouts applied to every client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions {
    /// TCP connect, server selection and the startup ping.
    pub connect_timeout: Duration,
    /// Upper bound on a single store operation.
    pub operation_timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MongoConnector {
    options: ConnectOptions,
}

impl MongoConnector {
    pub fn new(options: ConnectOptions) -> Self {
        Self { options }
    }
}

/// Open client plus the selected database.
pub struct MongoHandle {
    client: Client,
    database: Database,
    operation_timeout: Duration,
}

impl MongoHandle {
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn stats(&self) -> Collection<StoredStats> {
        self.database.collection(STATS_COLLECTION)
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = MongoHandle;

    async fn open(&self, settings: &Settings) -> Result<MongoHandle, DbError> {
        let mut options = ClientOptions::parse(settings.mongodb_url.as_str())
            .await
            .map_err(|e| DbError::Connection(e.to_string()))?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(self.options.connect_timeout);
        options.server_selection_timeout = Some(self.options.connect_timeout);

        let client = Client::with_options(options).map_err(|e| DbError::Connection(e.to_string()))?;
        let database = client.database(&settings.database_name);

        Ok(MongoHandle {
            client,
            database,
            operation_timeout: self.options.operation_timeout,
        })
    }

    async fn ping(&self, handle: &MongoHandle) -> Result<(), DbError> {
        let admin = handle.client.database("admin");
        bounded("ping", self.options.connect_timeout, async {
            admin.run_command(doc! { "ping": 1 }).await
        })
        .await
        .map_err(DbError::into_connection)?
        .map_err(|e| DbError::Connection(e.to_string()))?;
        debug!("ping ok");
        Ok(())
    }

    async fn shutdown(&self, handle: &MongoHandle) {
        handle.client.clone().shutdown().await;
    }
}

#[async_trait]
impl StatsStore for MongoHandle {
    async fn insert_stats(&self, doc: &StoredStats) -> Result<ObjectId, DbError> {
        let result = bounded("insert", self.operation_timeout, async {
            self.stats().insert_one(doc).await
        })
        .await?
        .map_err(|e| DbError::Write(e.to_string()))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| DbError::Write("store returned a non-ObjectId _id".to_string()))
    }

    async fn recent_stats(&self, limit: u32) -> Result<Vec<StoredStats>, DbError> {
        let limit = limit.clamp(1, MAX_RECENT_LIMIT);
        let query = async {
            let mut cursor = self
                .stats()
                .find(doc! {})
                .sort(doc! { "created_at": -1 })
                .limit(i64::from(limit))
                .await?;

            let mut docs = Vec::with_capacity(limit as usize);
            while cursor.advance().await? {
                docs.push(cursor.deserialize_current()?);
            }
            Ok::<_, mongodb::error::Error>(docs)
        };

        bounded("find", self.operation_timeout, query)
            .await?
            .map_err(|e| DbError::Read(e.to_string()))
    }
}

/// Apply a deadline to a store future.
async fn bounded<F: Future>(operation: &'static str, limit: Duration, fut: F) -> Result<F::Output, DbError> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| DbError::Timeout {
            operation,
            seconds: limit.as_secs(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ConnectionManager;
    use chrono::Utc;

    fn local_settings() -> Settings {
        Settings {
            environment: "test".into(),
            debug: true,
            mongodb_url: std::env::var("MONGODB_URL")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: format!("strive_test_{}", std::process::id()),
        }
    }

    #[test]
    fn default_timeouts() {
        let options = ConnectOptions::default();
        assert_eq!(options.connect_timeout, Duration::from_secs(10));
        assert_eq!(options.operation_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn bounded_reports_timeout() {
        let err = bounded("sleep", Duration::from_millis(10), tokio::time::sleep(Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Timeout { operation: "sleep", .. }));
    }

    #[tokio::test]
    async fn invalid_url_is_a_connection_error() {
        let connector = MongoConnector::default();
        let mut settings = local_settings();
        settings.mongodb_url = "http://not-mongo".into();

        let err = connector.open(&settings).await.err().expect("should fail");
        assert!(matches!(err, DbError::Connection(_)));
    }

    #[tokio::test]
    async fn unreachable_server_fails_connect() {
        let connector = MongoConnector::new(ConnectOptions {
            connect_timeout: Duration::from_millis(200),
            operation_timeout: Duration::from_millis(200),
        });
        let mut settings = local_settings();
        // reserved port, nothing listens here
        settings.mongodb_url = "mongodb://127.0.0.1:1".into();

        let manager = ConnectionManager::new(connector, settings);
        let err = manager.connect().await.err().expect("should fail");
        assert!(matches!(err, DbError::Connection(_)), "got {:?}", err);
        assert!(matches!(manager.handle().await, Err(DbError::NotConnected)));
    }

    #[tokio::test]
    #[ignore = "requires MongoDB"]
    async fn inserts_and_lists_against_live_server() {
        let manager = ConnectionManager::new(MongoConnector::default(), local_settings());
        let handle = manager.connect().await.expect("connect failed");

        let doc = StoredStats {
            id: None,
            session_time: 1800,
            exercises: Vec::new(),
            total_weight: 0.0,
            timestamp: mongodb::bson::DateTime::now(),
            created_at: crate::models::document::to_bson_datetime(Utc::now()),
        };
        let id = handle.insert_stats(&doc).await.expect("insert failed");

        let recent = handle.recent_stats(5).await.expect("find failed");
        assert_eq!(recent.first().and_then(|d| d.id), Some(id));

        handle.database().drop().await.expect("drop failed");
        manager.close().await;
    }
}
