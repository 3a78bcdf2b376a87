use serde_json::Value;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use time::OffsetDateTime;

use super::Entity;

pub type SessionId = String;

/// An open session. Only the username outlives the login request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub username: String,
    pub opened: OffsetDateTime,
}

/// Properties readable through `/sessions/{id}/{field}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SessionField {
    Username,
}

impl SessionField {
    /// Names listed by a session's item resource.
    pub fn names() -> Vec<&'static str> {
        SessionField::iter().map(Into::into).collect()
    }
}

impl Session {
    pub fn field(&self, field: SessionField) -> Value {
        match field {
            SessionField::Username => Value::from(self.username.as_str()),
        }
    }
}

impl Entity for Session {
    /// The authenticated username.
    type Payload = String;

    const COLLECTION: &'static str = "sessions";

    fn create(id: String, username: String, now: OffsetDateTime) -> Self {
        Session {
            id,
            username,
            opened: now,
        }
    }
}
