//! Resource identifiers.
//!
//! Every entity gets a random version 4 UUID in its lowercase hyphenated form,
//! e.g. `5c2e9b4a-1d3f-4e8a-9b2c-7f6d5e4c3b2a`.

use uuid::Uuid;

pub fn generate() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// Whether `id` is written exactly the way [`generate`] writes identifiers.
///
/// Uppercase, braced, URN and simple forms all parse as UUIDs but are never
/// handed out, so they can't name a stored entity.
pub fn is_canonical(id: &str) -> bool {
    match Uuid::try_parse(id) {
        Ok(uuid) => uuid.hyphenated().to_string() == id,
        Err(_) => false,
    }
}
