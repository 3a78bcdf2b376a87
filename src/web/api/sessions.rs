use tide::http::cookies::Cookie;
use tide::{Request, Response};
use tracing::debug;

use super::error::ApiError;
use super::routes::{reject_other_methods, Resource, Shape};
use super::utils::{empty_object, field, item_id, json_response, read_json};
use crate::db::sessions::SessionProvider;
use crate::models::sessions::{Session, SessionField};
use phototrack_api_structs::{LoginPayload, SessionCreated};

const RESOURCE: Resource = Resource::Sessions;

const SESSION_COOKIE: &str = "session";

pub(super) fn mount(app: &mut tide::Server<crate::State>) {
    if let Some(path) = RESOURCE.path(Shape::Collection) {
        let mut route = app.at(&path);
        route.get(list_sessions).head(list_sessions).post(open_session);
        reject_other_methods(&mut route, RESOURCE, Shape::Collection);
    }

    if let Some(path) = RESOURCE.path(Shape::Item) {
        let mut route = app.at(&path);
        route
            .get(get_session_fields)
            .head(get_session_fields)
            .delete(close_session);
        reject_other_methods(&mut route, RESOURCE, Shape::Item);
    }

    if let Some(path) = RESOURCE.path(Shape::Field) {
        let mut route = app.at(&path);
        route.get(get_session_field).head(get_session_field);
        reject_other_methods(&mut route, RESOURCE, Shape::Field);
    }
}

async fn lookup(req: &Request<crate::State>) -> Result<Session, ApiError> {
    let session_id = item_id(req, RESOURCE)?;

    req.state()
        .db
        .get_session(session_id)
        .await
        .ok_or_else(|| ApiError::invalid_identifier(RESOURCE, session_id))
}

async fn list_sessions(req: Request<crate::State>) -> tide::Result<Response> {
    let session_ids = req.state().db.list_session_ids().await;
    json_response(&session_ids)
}

async fn open_session(mut req: Request<crate::State>) -> tide::Result<Response> {
    let login: LoginPayload = read_json(&mut req).await?;
    debug!("Received login: {:?}", login);

    let session_id = match req
        .state()
        .db
        .open_session(&login)
        .await
        .map_err(ApiError::from)?
    {
        Some(session_id) => session_id,
        None => return Err(ApiError::Unauthorized.into()),
    };

    let mut res = json_response(&SessionCreated {
        session_id: session_id.clone(),
    })?;
    res.insert_cookie(
        Cookie::build(SESSION_COOKIE, session_id)
            .path("/")
            .http_only(true)
            .finish(),
    );

    Ok(res)
}

/// Lists the names of the readable properties, not their values.
async fn get_session_fields(req: Request<crate::State>) -> tide::Result<Response> {
    lookup(&req).await?;
    json_response(&SessionField::names())
}

async fn get_session_field(req: Request<crate::State>) -> tide::Result<Response> {
    let session = lookup(&req).await?;
    let session_field: SessionField = field(&req)?;

    json_response(&session.field(session_field))
}

async fn close_session(req: Request<crate::State>) -> tide::Result<Response> {
    let session_id = item_id(&req, RESOURCE)?;

    if req.state().db.close_session(session_id).await.is_none() {
        return Err(ApiError::invalid_identifier(RESOURCE, session_id).into());
    }

    let mut res = empty_object()?;
    res.insert_cookie(reset_cookie()?);

    Ok(res)
}

/// An expired, empty `session` cookie.
///
/// Sent on every close, whether or not the request carried the cookie.
fn reset_cookie() -> tide::Result<Cookie<'static>> {
    let cookie = Cookie::parse(format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE))?;
    Ok(cookie)
}
