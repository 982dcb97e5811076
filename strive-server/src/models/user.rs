//! User accounts

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use super::document::{from_bson_datetime, id_to_wire, to_bson_datetime};
use super::ValidationError;

/// Identity fields accepted from clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub name: String,
}

impl NewUser {
    /// Reject blank identity fields and emails without an `@`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("email", &self.email),
            ("username", &self.username),
            ("name", &self.name),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Empty { field });
            }
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must contain '@'",
            });
        }
        Ok(())
    }

    pub fn into_document(self, now: DateTime<Utc>) -> Result<UserDocument, ValidationError> {
        self.validate()?;
        let stamp = to_bson_datetime(now);
        Ok(UserDocument {
            id: None,
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
            name: self.name.trim().to_string(),
            created_at: stamp,
            updated_at: stamp,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub username: String,
    pub name: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// User as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Option<String>,
    pub email: String,
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: id_to_wire(doc.id),
            email: doc.email,
            username: doc.username,
            name: doc.name,
            created_at: from_bson_datetime(doc.created_at),
            updated_at: from_bson_datetime(doc.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_json;

    fn new_user() -> NewUser {
        NewUser {
            email: "ada@example.com".into(),
            username: "ada".into(),
            name: "Ada Lovelace".into(),
        }
    }

    #[test]
    fn client_cannot_set_id() {
        let user: NewUser = parse_json(
            br#"{"_id": "65a000000000000000000000", "id": "x",
                 "email": "ada@example.com", "username": "ada", "name": "Ada"}"#,
        )
        .unwrap();
        let doc = user.into_document(Utc::now()).unwrap();
        assert_eq!(doc.id, None);
    }

    #[test]
    fn missing_username_is_reported() {
        let err = parse_json::<NewUser>(br#"{"email": "a@b.c", "name": "A"}"#).unwrap_err();
        assert_eq!(err.field(), Some("username"));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut user = new_user();
        user.name = "   ".into();
        assert_eq!(user.validate(), Err(ValidationError::Empty { field: "name" }));
    }

    #[test]
    fn email_needs_at_sign() {
        let mut user = new_user();
        user.email = "ada.example.com".into();
        assert_eq!(user.validate().unwrap_err().field(), Some("email"));
    }

    #[test]
    fn timestamps_start_equal() {
        let doc = new_user().into_document(Utc::now()).unwrap();
        assert_eq!(doc.created_at, doc.updated_at);
    }

    #[test]
    fn wire_shape_renames_id() {
        let mut doc = new_user().into_document(Utc::now()).unwrap();
        let oid = ObjectId::new();
        doc.id = Some(oid);

        let json = serde_json::to_value(User::from(doc)).unwrap();
        assert_eq!(json["id"], oid.to_hex());
        assert!(json.get("_id").is_none());
        assert_eq!(json["username"], "ada");
    }
}
