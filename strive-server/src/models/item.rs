//! Items owned by users

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use super::document::{from_bson_datetime, id_to_wire, parse_object_id, to_bson_datetime};
use super::ValidationError;

const MAX_TITLE_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewItem {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewItem {
    /// Build the stored document for `owner`.
    ///
    /// The owner id must be well formed; whether that user exists is not
    /// checked here.
    pub fn into_document(self, owner: &str, now: DateTime<Utc>) -> Result<ItemDocument, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::InvalidFormat {
                field: "title",
                reason: "exceeds 256 characters",
            });
        }
        let user_id = parse_object_id("user_id", owner)?;
        let stamp = to_bson_datetime(now);

        Ok(ItemDocument {
            id: None,
            title: title.to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            user_id,
            created_at: stamp,
            updated_at: stamp,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub user_id: ObjectId,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ItemDocument> for Item {
    fn from(doc: ItemDocument) -> Self {
        Self {
            id: id_to_wire(doc.id),
            title: doc.title,
            description: doc.description,
            user_id: doc.user_id.to_hex(),
            created_at: from_bson_datetime(doc.created_at),
            updated_at: from_bson_datetime(doc.updated_at),
        }
    }
}
