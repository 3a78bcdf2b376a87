use tide::{Request, Response};
use tracing::{debug, info};

use super::error::ApiError;
use super::routes::{reject_other_methods, Resource, Shape};
use super::utils::{empty_object, field, item_id, json_response, read_json};
use crate::db::users::UserProvider;
use crate::models::users::UserField;
use phototrack_api_structs::{UserCreated, UserPayload};

const RESOURCE: Resource = Resource::Users;

pub(super) fn mount(app: &mut tide::Server<crate::State>) {
    if let Some(path) = RESOURCE.path(Shape::Collection) {
        let mut route = app.at(&path);
        route.get(list_users).head(list_users).post(create_user);
        reject_other_methods(&mut route, RESOURCE, Shape::Collection);
    }

    if let Some(path) = RESOURCE.path(Shape::Item) {
        let mut route = app.at(&path);
        route
            .get(get_user)
            .head(get_user)
            .put(replace_user)
            .delete(delete_user);
        reject_other_methods(&mut route, RESOURCE, Shape::Item);
    }

    if let Some(path) = RESOURCE.path(Shape::Field) {
        let mut route = app.at(&path);
        route.get(get_user_field).head(get_user_field);
        reject_other_methods(&mut route, RESOURCE, Shape::Field);
    }
}

async fn list_users(req: Request<crate::State>) -> tide::Result<Response> {
    let users = req.state().db.list_users().await;
    json_response(&users)
}

async fn create_user(mut req: Request<crate::State>) -> tide::Result<Response> {
    let payload: UserPayload = read_json(&mut req).await?;
    debug!(user_name = %payload.user_name, "Received user payload");

    let user_id = req
        .state()
        .db
        .insert_user(payload)
        .await
        .map_err(ApiError::from)?;
    info!(%user_id, "Created user");

    json_response(&UserCreated { user_id })
}

async fn get_user(req: Request<crate::State>) -> tide::Result<Response> {
    let user_id = item_id(&req, RESOURCE)?;

    match req.state().db.get_user(user_id).await {
        Some(user) => json_response(&user),
        None => Err(ApiError::invalid_identifier(RESOURCE, user_id).into()),
    }
}

async fn get_user_field(req: Request<crate::State>) -> tide::Result<Response> {
    let user_id = item_id(&req, RESOURCE)?;
    let user = match req.state().db.get_user(user_id).await {
        Some(user) => user,
        None => return Err(ApiError::invalid_identifier(RESOURCE, user_id).into()),
    };

    let user_field: UserField = field(&req)?;
    json_response(&user.field(user_field))
}

async fn replace_user(mut req: Request<crate::State>) -> tide::Result<Response> {
    let user_id = item_id(&req, RESOURCE)?.to_string();
    let payload: UserPayload = read_json(&mut req).await?;
    debug!(%user_id, user_name = %payload.user_name, "Received user payload");

    if !req.state().db.replace_user(&user_id, payload).await {
        return Err(ApiError::invalid_identifier(RESOURCE, &user_id).into());
    }
    info!(%user_id, "Replaced user");

    empty_object()
}

async fn delete_user(req: Request<crate::State>) -> tide::Result<Response> {
    let user_id = item_id(&req, RESOURCE)?;

    if req.state().db.delete_user(user_id).await.is_none() {
        return Err(ApiError::invalid_identifier(RESOURCE, user_id).into());
    }
    info!(%user_id, "Deleted user");

    empty_object()
}
