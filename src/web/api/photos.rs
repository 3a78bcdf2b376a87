use tide::http::{Mime, StatusCode};
use tide::{Body, Request, Response};
use tracing::{debug, info};

use super::error::ApiError;
use super::routes::{reject_other_methods, Resource, Shape};
use super::utils::{empty_object, item_id, json_response, read_json};
use crate::db::photos::PhotoProvider;
use phototrack_api_structs::{PhotoCreated, PhotoPayload};

const RESOURCE: Resource = Resource::Photos;

pub(super) fn mount(app: &mut tide::Server<crate::State>) {
    if let Some(path) = RESOURCE.path(Shape::Collection) {
        let mut route = app.at(&path);
        route.get(list_photos).head(list_photos).post(create_photo);
        reject_other_methods(&mut route, RESOURCE, Shape::Collection);
    }

    if let Some(path) = RESOURCE.path(Shape::Item) {
        let mut route = app.at(&path);
        route.get(get_photo).head(get_photo).delete(delete_photo);
        reject_other_methods(&mut route, RESOURCE, Shape::Item);
    }

    if let Some(path) = RESOURCE.path(Shape::Image) {
        let mut route = app.at(&path);
        route.get(get_photo_image).head(get_photo_image);
        reject_other_methods(&mut route, RESOURCE, Shape::Image);
    }
}

async fn list_photos(req: Request<crate::State>) -> tide::Result<Response> {
    let photos = req.state().db.list_photos().await;
    json_response(&photos)
}

async fn create_photo(mut req: Request<crate::State>) -> tide::Result<Response> {
    let payload: PhotoPayload = read_json(&mut req).await?;
    debug!(
        site_uuid = %payload.site_uuid,
        tag = %payload.tag,
        image_len = payload.image.len(),
        "Received photo payload"
    );

    let photo_id = req
        .state()
        .db
        .insert_photo(payload)
        .await
        .map_err(ApiError::from)?;
    info!(%photo_id, "Created photo");

    json_response(&PhotoCreated { photo_id })
}

async fn get_photo(req: Request<crate::State>) -> tide::Result<Response> {
    let photo_id = item_id(&req, RESOURCE)?;

    match req.state().db.get_photo(photo_id).await {
        Some(photo) => json_response(&photo),
        None => Err(ApiError::invalid_identifier(RESOURCE, photo_id).into()),
    }
}

async fn get_photo_image(req: Request<crate::State>) -> tide::Result<Response> {
    let photo_id = item_id(&req, RESOURCE)?;

    let photo = match req.state().db.get_photo(photo_id).await {
        Some(photo) => photo,
        None => return Err(ApiError::invalid_identifier(RESOURCE, photo_id).into()),
    };
    let mime: Mime = photo.image_mime.parse()?;

    Ok(Response::builder(StatusCode::Ok)
        .body(Body::from_bytes(photo.image_bytes()))
        .content_type(mime)
        .build())
}

async fn delete_photo(req: Request<crate::State>) -> tide::Result<Response> {
    let photo_id = item_id(&req, RESOURCE)?;

    if req.state().db.delete_photo(photo_id).await.is_none() {
        return Err(ApiError::invalid_identifier(RESOURCE, photo_id).into());
    }
    info!(%photo_id, "Deleted photo");

    empty_object()
}
