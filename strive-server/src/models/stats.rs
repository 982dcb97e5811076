//! Workout session statistics
//!
//! Wire shape (camelCase, as sent by the frontend):
//!
//! ```json
//! {
//!   "sessionTime": 1800,
//!   "exercises": [{"id": "1", "bodyPart": "chest", "exercise": "bench",
//!                  "sets": 3, "reps": 10, "weight": 60.5}],
//!   "totalWeight": 181.5,
//!   "timestamp": "2024-01-01T00:00:00Z"
//! }
//! ```
//!
//! Stored shape: the same fields in snake_case, BSON datetimes, plus the
//! server-assigned `created_at` and the store-assigned `_id`.
//!
//! BSON datetimes hold milliseconds. A client `timestamp` with finer precision
//! is truncated to the millisecond when stored; every other field is kept
//! exactly.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use super::document::{from_bson_datetime, id_to_wire, to_bson_datetime};

/// Collection holding one document per submitted session.
pub const STATS_COLLECTION: &str = "stats";

/// One exercise within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseInput {
    pub id: String,
    pub body_part: String,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
}

/// `POST /stats` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSubmission {
    pub session_time: i64,
    pub exercises: Vec<ExerciseInput>,
    pub total_weight: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredExercise {
    pub id: String,
    pub body_part: String,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
}

/// Document persisted in the `stats` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredStats {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub session_time: i64,
    pub exercises: Vec<StoredExercise>,
    pub total_weight: f64,
    pub timestamp: bson::DateTime,
    pub created_at: bson::DateTime,
}

impl From<ExerciseInput> for StoredExercise {
    fn from(e: ExerciseInput) -> Self {
        Self {
            id: e.id,
            body_part: e.body_part,
            exercise: e.exercise,
            sets: e.sets,
            reps: e.reps,
            weight: e.weight,
        }
    }
}

impl StoredStats {
    /// Build the document to insert. The id is left for the store to assign.
    pub fn from_submission(submission: StatsSubmission, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            session_time: submission.session_time,
            exercises: submission
                .exercises
                .into_iter()
                .map(StoredExercise::from)
                .collect(),
            total_weight: submission.total_weight,
            timestamp: to_bson_datetime(submission.timestamp),
            created_at: to_bson_datetime(created_at),
        }
    }
}

/// Outbound view of a stored session, with `_id` renamed to `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub session_time: i64,
    pub exercises: Vec<ExerciseInput>,
    pub total_weight: f64,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<StoredStats> for StatsRecord {
    fn from(doc: StoredStats) -> Self {
        Self {
            id: id_to_wire(doc.id),
            session_time: doc.session_time,
            exercises: doc
                .exercises
                .into_iter()
                .map(|e| ExerciseInput {
                    id: e.id,
                    body_part: e.body_part,
                    exercise: e.exercise,
                    sets: e.sets,
                    reps: e.reps,
                    weight: e.weight,
                })
                .collect(),
            total_weight: doc.total_weight,
            timestamp: from_bson_datetime(doc.timestamp),
            created_at: from_bson_datetime(doc.created_at),
        }
    }
}
