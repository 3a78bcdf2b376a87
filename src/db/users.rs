use phototrack_api_structs::UserPayload;

use super::{Database, Error};
use crate::models::users::{User, UserId};

#[async_trait::async_trait]
pub trait UserProvider {
    async fn list_users(&self) -> Vec<User>;

    async fn get_user(&self, user_id: &str) -> Option<User>;

    async fn insert_user(&self, payload: UserPayload) -> Result<UserId, Error>;

    /// Returns `false` if no user has that identifier.
    async fn replace_user(&self, user_id: &str, payload: UserPayload) -> bool;

    async fn delete_user(&self, user_id: &str) -> Option<User>;
}

#[async_trait::async_trait]
impl UserProvider for Database {
    async fn list_users(&self) -> Vec<User> {
        self.users.read().await.list()
    }

    async fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.read().await.get(user_id)
    }

    async fn insert_user(&self, payload: UserPayload) -> Result<UserId, Error> {
        self.users.write().await.create(payload)
    }

    async fn replace_user(&self, user_id: &str, payload: UserPayload) -> bool {
        self.users.write().await.replace(user_id, payload)
    }

    async fn delete_user(&self, user_id: &str) -> Option<User> {
        self.users.write().await.remove(user_id)
    }
}
