use serde::de::DeserializeOwned;
use serde::Serialize;
use tide::http::StatusCode;
use tide::{Body, Request, Response};

use super::error::ApiError;
use super::routes::Resource;
use crate::ids;

/// The `:id` segment of an item path.
///
/// Only canonical identifiers can name an entity, so anything else is
/// rejected before the store is asked.
pub fn item_id(req: &Request<crate::State>, resource: Resource) -> Result<&str, ApiError> {
    let id = req
        .param("id")
        .map_err(|_| ApiError::invalid_identifier(resource, ""))?;

    if !ids::is_canonical(id) {
        return Err(ApiError::invalid_identifier(resource, id));
    }

    Ok(id)
}

/// The `:field` segment of a field path, parsed into the resource's field enum.
pub fn field<F: std::str::FromStr>(req: &Request<crate::State>) -> Result<F, ApiError> {
    let name = req
        .param("field")
        .map_err(|_| ApiError::UnknownField(String::new()))?;

    name.parse()
        .map_err(|_| ApiError::UnknownField(name.to_string()))
}

pub async fn read_json<T: DeserializeOwned>(
    req: &mut Request<crate::State>,
) -> Result<T, ApiError> {
    req.body_json()
        .await
        .map_err(|err| ApiError::BadPayload(err.to_string()))
}

pub fn json_response<T: Serialize>(body: &T) -> tide::Result<Response> {
    Ok(Response::builder(StatusCode::Ok)
        .body(Body::from_json(body)?)
        .build())
}

/// The `{}` answered by replace and delete calls.
pub fn empty_object() -> tide::Result<Response> {
    json_response(&serde_json::json!({}))
}
