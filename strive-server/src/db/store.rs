//! Data access seam used by request handlers

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::DbError;
use crate::models::StoredStats;

/// Default page size for session listings.
pub const DEFAULT_RECENT_LIMIT: u32 = 20;
/// Upper bound on a single listing.
pub const MAX_RECENT_LIMIT: u32 = 100;

/// Operations on the stats collection.
///
/// Submissions are append-only: there is no update or delete.
#[async_trait]
pub trait StatsStore: Send + Sync + 'static {
    /// Insert one session document, returning the store-assigned id.
    async fn insert_stats(&self, doc: &StoredStats) -> Result<ObjectId, DbError>;

    /// Most recent sessions first, by `created_at`.
    async fn recent_stats(&self, limit: u32) -> Result<Vec<StoredStats>, DbError>;
}
