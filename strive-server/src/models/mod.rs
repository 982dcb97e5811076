//! Data models with explicit wire/store mapping
//!
//! Each model has an inbound wire shape, a stored document shape and a
//! mapping between them. Invalid input returns ValidationError, not panic.

pub mod document;
pub mod item;
pub mod stats;
pub mod user;
pub mod validation;

pub use item::{Item, ItemDocument, NewItem};
pub use stats::{ExerciseInput, StatsRecord, StatsSubmission, StoredExercise, StoredStats, STATS_COLLECTION};
pub use user::{NewUser, User, UserDocument};
pub use validation::{parse_json, ValidationError};
