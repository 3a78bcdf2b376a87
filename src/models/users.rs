use serde::Serialize;
use serde_json::Value;
use strum::{EnumIter, EnumString, IntoStaticStr};
use time::OffsetDateTime;

use phototrack_api_structs::UserPayload;

use super::{Entity, Replace};

pub type UserId = String;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub uuid: UserId,
    pub full_name: String,
    pub email: String,
    pub organization: String,
    pub user_name: String,
    pub password: String,
    pub is_admin: bool,
    pub is_supervisor: bool,
}

/// Attributes readable through `/users/{id}/{field}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum UserField {
    Email,
    FullName,
    IsAdmin,
    IsSupervisor,
    Organization,
    Password,
    Username,
}

impl User {
    pub fn field(&self, field: UserField) -> Value {
        match field {
            UserField::Email => Value::from(self.email.as_str()),
            UserField::FullName => Value::from(self.full_name.as_str()),
            UserField::IsAdmin => Value::from(self.is_admin),
            UserField::IsSupervisor => Value::from(self.is_supervisor),
            UserField::Organization => Value::from(self.organization.as_str()),
            UserField::Password => Value::from(self.password.as_str()),
            UserField::Username => Value::from(self.user_name.as_str()),
        }
    }
}

impl Entity for User {
    type Payload = UserPayload;

    const COLLECTION: &'static str = "users";

    fn create(id: String, payload: UserPayload, _now: OffsetDateTime) -> Self {
        User {
            uuid: id,
            full_name: payload.full_name,
            email: payload.email,
            organization: payload.organization,
            user_name: payload.user_name,
            password: payload.password,
            is_admin: payload.is_admin,
            is_supervisor: payload.is_supervisor,
        }
    }
}

impl Replace for User {
    fn replace(&mut self, payload: UserPayload, now: OffsetDateTime) {
        let uuid = std::mem::take(&mut self.uuid);
        *self = User::create(uuid, payload, now);
    }
}
