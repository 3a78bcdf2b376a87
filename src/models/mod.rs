use serde::Serialize;
use time::OffsetDateTime;

pub mod photos;
pub mod sessions;
pub mod sites;
pub mod users;

/// A kind of entity kept in a [`crate::db::Collection`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// What a client sends to create one.
    type Payload: Send + 'static;

    /// Collection name, used in logs and error messages.
    const COLLECTION: &'static str;

    /// Builds a fresh entity from its server-assigned identifier and creation time.
    fn create(id: String, payload: Self::Payload, now: OffsetDateTime) -> Self;
}

/// Entities that can be overwritten in place through `PUT`.
pub trait Replace: Entity {
    /// Overwrites every mutable attribute. Identity is kept; the timestamp is refreshed.
    fn replace(&mut self, payload: Self::Payload, now: OffsetDateTime);
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Coordinates only count as a pair.
    pub fn from_pair(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Position {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

/// Current time truncated to whole seconds, which is all RFC 3339 readers need.
pub fn now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(0).unwrap_or(now)
}
