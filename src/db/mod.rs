use async_std::sync::RwLock;
use thiserror::Error;

use crate::models::photos::Photo;
use crate::models::sessions::Session;
use crate::models::sites::Site;
use crate::models::users::User;

pub mod collection;
pub mod photos;
pub mod sessions;
pub mod sites;
pub mod users;

pub use collection::Collection;
pub use sessions::{AnyCredentials, Authenticator, StaticCredentials};

#[derive(Error, Debug)]
pub enum Error {
    #[error("identifier {id} is already taken in {collection}")]
    DuplicateIdentifier {
        collection: &'static str,
        id: String,
    },
}

/// In-memory storage shared by every connection.
///
/// Each collection sits behind its own lock, so a write to one collection
/// never waits on another and readers never see a half-applied write.
#[derive(Debug)]
pub struct Database {
    sites: RwLock<Collection<Site>>,
    photos: RwLock<Collection<Photo>>,
    users: RwLock<Collection<User>>,
    sessions: RwLock<Collection<Session>>,
    authenticator: Box<dyn Authenticator>,
}

impl Database {
    pub fn new(authenticator: Box<dyn Authenticator>) -> Self {
        Database {
            sites: RwLock::default(),
            photos: RwLock::default(),
            users: RwLock::default(),
            sessions: RwLock::default(),
            authenticator,
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Database::new(Box::new(AnyCredentials))
    }
}
