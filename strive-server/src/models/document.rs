//! Conversions at the wire/store boundary
//!
//! Stored documents carry `_id: ObjectId` and BSON datetimes; wire shapes carry
//! `id: String` and RFC 3339 timestamps. All renaming happens here, explicitly.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};

use super::ValidationError;

/// Wire form of a store-assigned identifier.
pub fn id_to_wire(id: Option<ObjectId>) -> Option<String> {
    id.map(|oid| oid.to_hex())
}

/// Parse a client-supplied reference to a stored document.
pub fn parse_object_id(field: &'static str, raw: &str) -> Result<ObjectId, ValidationError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| ValidationError::InvalidFormat {
        field,
        reason: "expected a 24 character hex object id",
    })
}

pub fn to_bson_datetime(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

/// BSON datetimes are millisecond precision; anything out of chrono's range
/// clamps to the epoch.
pub fn from_bson_datetime(dt: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}
